use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::TokenError;
use super::handler::JwtHandler;
use crate::config::JwtCredentials;

/// Default lifetime of issued tokens.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Tolerance subtracted from issued-at to form the not-before claim.
pub const NOT_BEFORE_SKEW_SECONDS: i64 = 60;

/// Capability for issuing auth tokens.
pub trait Issuer: Send + Sync {
    /// Issue a signed token for a subject with a role.
    ///
    /// # Errors
    /// * `InvalidContent` - Subject or role is empty
    /// * `InvalidLifetime` - Expiry falls outside the representable time range
    /// * `SigningFailed` - Token could not be signed
    fn issue(&self, subject: &str, role: &str) -> Result<String, TokenError>;
}

/// Issuer of HS256 signed JWTs.
pub struct JwtIssuer {
    name: String,
    handler: JwtHandler,
    token_lifetime: Duration,
}

impl JwtIssuer {
    /// Create an issuer with the default 24 hour token lifetime.
    ///
    /// # Arguments
    /// * `credentials` - Issuer name and signing secret
    pub fn new(credentials: &JwtCredentials) -> Self {
        Self {
            name: credentials.issuer.clone(),
            handler: JwtHandler::new(credentials.secret.as_bytes()),
            token_lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
        }
    }

    /// Override the token lifetime. Non-positive lifetimes yield tokens that
    /// are already expired.
    pub fn with_token_lifetime(mut self, token_lifetime: Duration) -> Self {
        self.token_lifetime = token_lifetime;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Issuer for JwtIssuer {
    fn issue(&self, subject: &str, role: &str) -> Result<String, TokenError> {
        if subject.is_empty() || role.is_empty() {
            tracing::debug!(
                issuer = %self.name,
                "Refusing to issue token with empty subject or role"
            );
            return Err(TokenError::InvalidContent);
        }

        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().trunc_subsecs(0);
        let not_before = created_at - Duration::seconds(NOT_BEFORE_SKEW_SECONDS);
        let expires_at = created_at
            .checked_add_signed(self.token_lifetime)
            .ok_or_else(|| {
                tracing::warn!(
                    issuer = %self.name,
                    lifetime_seconds = self.token_lifetime.num_seconds(),
                    "Token lifetime overflows the expiry timestamp"
                );
                TokenError::InvalidLifetime
            })?;

        let claims = Claims::new()
            .with_subject(subject)
            .with_id(&id)
            .with_issuer(&self.name)
            .with_not_before(not_before.timestamp())
            .with_issued_at(created_at.timestamp())
            .with_expiration(expires_at.timestamp())
            .with_role(role);

        let token = self.handler.encode(&claims)?;
        tracing::debug!(issuer = %self.name, token_id = %id, "Token issued");

        Ok(token)
    }
}
