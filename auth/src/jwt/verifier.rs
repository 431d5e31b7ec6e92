use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::TokenError;
use super::handler::JwtHandler;
use super::token::Token;
use crate::config::JwtCredentials;

/// Capability for verifying auth tokens.
pub trait Verifier: Send + Sync {
    /// Verify a raw token string and extract its content.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, badly signed or not yet valid
    /// * `InvalidContent` - Wrong issuer or incomplete claims
    /// * `ExpiredToken` - Past expiry plus leeway
    fn verify(&self, raw_token: &str) -> Result<Token, TokenError>;
}

/// Verifier of HS256 signed JWTs.
pub struct JwtVerifier {
    handler: JwtHandler,
    expected_issuer: String,
    leeway: Duration,
}

impl JwtVerifier {
    /// Create a verifier.
    ///
    /// # Arguments
    /// * `credentials` - Expected issuer name and signing secret
    /// * `leeway` - Tolerance added to the expiry check
    pub fn new(credentials: &JwtCredentials, leeway: Duration) -> Self {
        Self {
            handler: JwtHandler::new(credentials.secret.as_bytes()),
            expected_issuer: credentials.issuer.clone(),
            leeway,
        }
    }

    fn validate_claims(&self, claims: &Claims) -> Result<(), TokenError> {
        if claims.iss.as_deref() != Some(self.expected_issuer.as_str()) {
            tracing::debug!(
                expected = %self.expected_issuer,
                actual = ?claims.iss,
                "Token issuer mismatch"
            );
            return Err(TokenError::InvalidContent);
        }

        let now = Utc::now().timestamp();
        if claims.is_premature(now) {
            tracing::debug!(nbf = ?claims.nbf, now, "Token used before not-before");
            return Err(TokenError::InvalidToken);
        }
        if claims.is_expired(now, self.leeway.num_seconds()) {
            tracing::debug!(exp = ?claims.exp, now, "Token expired");
            return Err(TokenError::ExpiredToken);
        }

        if claims.sub.as_deref().map_or(true, str::is_empty) {
            return Err(TokenError::InvalidContent);
        }
        if claims.jti.as_deref().map_or(true, str::is_empty) {
            return Err(TokenError::InvalidContent);
        }

        Ok(())
    }
}

impl Verifier for JwtVerifier {
    fn verify(&self, raw_token: &str) -> Result<Token, TokenError> {
        let claims = self.handler.decode(raw_token)?;
        self.validate_claims(&claims)?;

        let created_at = claims
            .iat
            .and_then(|iat| DateTime::<Utc>::from_timestamp(iat, 0))
            .ok_or(TokenError::InvalidContent)?;

        Ok(Token {
            id: claims.jti.unwrap_or_default(),
            subject: claims.sub.unwrap_or_default(),
            role: claims.role.unwrap_or_default(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::issuer::Issuer;
    use crate::jwt::issuer::JwtIssuer;
    use crate::jwt::token::Role;

    const SECRET: &str = "super-secret-token";

    fn credentials(issuer: &str, secret: &str) -> JwtCredentials {
        JwtCredentials {
            issuer: issuer.to_string(),
            secret: secret.to_string(),
        }
    }

    fn verifier() -> JwtVerifier {
        JwtVerifier::new(&credentials("issuer-name", SECRET), Duration::minutes(1))
    }

    fn sign(claims: &Claims) -> String {
        JwtHandler::new(SECRET.as_bytes())
            .encode(claims)
            .expect("Failed to encode token")
    }

    fn valid_claims() -> Claims {
        let now = Utc::now().timestamp();
        Claims::new()
            .with_subject("user-id-1")
            .with_id("token-id-1")
            .with_issuer("issuer-name")
            .with_not_before(now - 60)
            .with_issued_at(now)
            .with_expiration(now + 3600)
            .with_role(Role::User)
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = JwtIssuer::new(&credentials("issuer-name", SECRET));
        let loop_start = Utc::now() - Duration::seconds(2);

        for (subject, role) in [("user-id-1", Role::User), ("user-id-2", Role::Admin)] {
            let raw = issuer
                .issue(subject, role.as_str())
                .expect("Failed to issue token");
            let token = verifier().verify(&raw).expect("Failed to verify token");

            assert_eq!(token.subject, subject);
            assert_eq!(token.role, role.as_str());
            assert_eq!(token.role_tag(), Some(role));
            assert!(!token.id.is_empty());
            assert!(token.created_at >= loop_start);
            assert!(token.created_at <= Utc::now());
        }
    }

    #[test]
    fn test_expired_token() {
        let issuer = JwtIssuer::new(&credentials("issuer-name", SECRET))
            .with_token_lifetime(Duration::minutes(-5));

        let raw = issuer.issue("user-id-3", "USER").expect("Failed to issue token");

        assert_eq!(verifier().verify(&raw), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn test_expired_within_leeway() {
        let now = Utc::now().timestamp();
        let raw = sign(&valid_claims().with_expiration(now - 30));

        assert!(verifier().verify(&raw).is_ok());
        assert_eq!(
            JwtVerifier::new(&credentials("issuer-name", SECRET), Duration::zero()).verify(&raw),
            Err(TokenError::ExpiredToken)
        );
    }

    #[test]
    fn test_wrong_issuer_name() {
        let issuer = JwtIssuer::new(&credentials("issuer-name", SECRET));
        let wrong_issuer = JwtVerifier::new(
            &credentials("wrong-issuer-name", SECRET),
            Duration::minutes(1),
        );

        let raw = issuer.issue("user-id-1", "USER").expect("Failed to issue token");

        assert_eq!(wrong_issuer.verify(&raw), Err(TokenError::InvalidContent));
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = JwtIssuer::new(&credentials("issuer-name", SECRET));
        let wrong_secret = JwtVerifier::new(
            &credentials("issuer-name", "super-secret-token-but-wrong"),
            Duration::minutes(1),
        );

        let raw = issuer.issue("user-id-1", "USER").expect("Failed to issue token");

        assert_eq!(wrong_secret.verify(&raw), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(verifier().verify("not-a-token"), Err(TokenError::InvalidToken));
        assert_eq!(verifier().verify("a.b.c"), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_not_yet_valid() {
        let now = Utc::now().timestamp();
        let raw = sign(&valid_claims().with_not_before(now + 600));

        assert_eq!(verifier().verify(&raw), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_missing_claims() {
        let mut missing_subject = valid_claims();
        missing_subject.sub = None;
        let empty_id = valid_claims().with_id("");
        let mut missing_issued_at = valid_claims();
        missing_issued_at.iat = None;
        let mut missing_issuer = valid_claims();
        missing_issuer.iss = None;

        for claims in [missing_subject, empty_id, missing_issued_at, missing_issuer] {
            assert_eq!(
                verifier().verify(&sign(&claims)),
                Err(TokenError::InvalidContent),
                "{claims:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_expiry() {
        let mut claims = valid_claims();
        claims.exp = None;

        assert_eq!(verifier().verify(&sign(&claims)), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn test_created_at_from_issued_at() {
        let issued_at = Utc::now().timestamp() - 3000;
        let raw = sign(&valid_claims().with_issued_at(issued_at));

        let token = verifier().verify(&raw).expect("Failed to verify token");

        assert_eq!(token.created_at.timestamp(), issued_at);
        assert_eq!(token.id, "token-id-1");
    }
}
