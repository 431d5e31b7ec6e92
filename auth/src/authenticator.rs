use std::sync::Arc;

use crate::credentials::Credentials;
use crate::jwt::Issuer;
use crate::jwt::JwtIssuer;
use crate::jwt::JwtVerifier;
use crate::jwt::Token;
use crate::jwt::TokenError;
use crate::jwt::Verifier;
use crate::password::gen_salt;
use crate::password::Hasher;
use crate::password::PasswordError;

/// Default number of random salt bytes per credential.
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Authentication coordinator combining password verification and token issuing.
///
/// The two halves never call each other; this type only sequences them the way
/// a signup or login flow does.
pub struct Authenticator {
    hasher: Arc<dyn Hasher>,
    issuer: JwtIssuer,
    verifier: JwtVerifier,
    salt_length: usize,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `hasher` - Hasher used for new credentials and for verification
    /// * `issuer` - Token issuer
    /// * `verifier` - Token verifier
    pub fn new(hasher: Arc<dyn Hasher>, issuer: JwtIssuer, verifier: JwtVerifier) -> Self {
        Self {
            hasher,
            issuer,
            verifier,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }

    /// Override the number of random salt bytes.
    pub fn with_salt_length(mut self, salt_length: usize) -> Self {
        self.salt_length = salt_length;
        self
    }

    /// Shared handle to the hasher, for offloading with
    /// [`hash_blocking`](crate::password::hash_blocking) and
    /// [`verify_blocking`](crate::password::verify_blocking).
    pub fn hasher(&self) -> Arc<dyn Hasher> {
        Arc::clone(&self.hasher)
    }

    /// Create credentials for a password: fresh salt, then hash.
    ///
    /// Password policy (length, confirmation) is checked by the caller.
    ///
    /// # Errors
    /// * `PasswordError` - Salt generation or hashing failed
    pub fn create_credentials(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<Credentials, PasswordError> {
        let salt = gen_salt(self.salt_length)?;
        let password_hash = self.hasher.hash(password, &salt)?;

        Ok(Credentials {
            user_id: user_id.to_string(),
            password_hash,
            salt,
        })
    }

    /// Verify a password against stored credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `credentials` - Stored credentials of the user
    /// * `role` - Role claim of the issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        credentials: &Credentials,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        match self
            .hasher
            .verify(password, &credentials.salt, &credentials.password_hash)
        {
            Ok(()) => {}
            Err(PasswordError::HashMismatch) => {
                return Err(AuthenticationError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(
                    user_id = %credentials.user_id,
                    error = %e,
                    "Password verification failed"
                );
                return Err(e.into());
            }
        }

        let access_token = self.issuer.issue(&credentials.user_id, role)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Useful right after signup, when the password was just set.
    pub fn issue_token(&self, subject: &str, role: &str) -> Result<String, TokenError> {
        self.issuer.issue(subject, role)
    }

    /// Validate a token presented on a request.
    pub fn validate_token(&self, token: &str) -> Result<Token, TokenError> {
        self.verifier.verify(token)
    }
}
