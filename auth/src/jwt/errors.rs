use thiserror::Error;

/// Error type for token issuing and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token content")]
    InvalidContent,

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token lifetime out of range")]
    InvalidLifetime,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}
