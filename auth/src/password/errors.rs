use thiserror::Error;

/// Error type for password operations.
///
/// `HashMismatch` deliberately carries no detail: a wrong password, wrong salt,
/// wrong pepper and a tampered stored hash all look the same to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Hash and data do not match")]
    HashMismatch,

    #[error("Invalid encoded hash: {0}")]
    InvalidEncoding(String),

    #[error("Random salt generation failed: {0}")]
    Entropy(String),

    #[error("Keyed MAC computation failed: {0}")]
    KeyedMac(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParameters(String),

    #[error("Hashing worker failed: {0}")]
    WorkerFailed(String),
}
