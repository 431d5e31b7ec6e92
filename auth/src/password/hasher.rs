use serde::Deserialize;

use super::encoding::EncodedHash;
use super::errors::PasswordError;
use super::mac::hmac_hex;
use super::scrypt::ScryptHasher;
use super::scrypt::ScryptParams;

/// Capability for computing and verifying password hashes.
///
/// Implementations differ only in how *new* hashes are derived. Verification
/// always reads the scheme and its parameters from the stored hash, so any
/// implementation verifies hashes produced by any other (given the same pepper).
pub trait Hasher: Send + Sync {
    /// Hash a plaintext password with a per-credential salt.
    ///
    /// # Arguments
    /// * `plaintext` - Password chosen by the user
    /// * `salt` - Per-credential salt, stored next to the hash
    ///
    /// # Returns
    /// Self-describing encoded hash
    ///
    /// # Errors
    /// * `KeyedMac` - Peppering failed
    /// * `InvalidParameters` - The KDF rejected the configured parameters
    fn hash(&self, plaintext: &str, salt: &str) -> Result<String, PasswordError>;

    /// Verify a plaintext candidate against a stored encoded hash.
    ///
    /// # Errors
    /// * `HashMismatch` - Candidate does not reproduce the stored hash
    /// * `InvalidEncoding` - Stored hash does not parse under any known scheme
    fn verify(&self, plaintext: &str, salt: &str, hash: &str) -> Result<(), PasswordError>;
}

/// Key derivation scheme used for new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    #[default]
    Scrypt,
    Pbkdf2,
    Sha512,
}

/// Create the recommended hasher: scrypt with default parameters.
pub fn new_hasher(pepper: impl AsRef<[u8]>) -> Result<ScryptHasher, PasswordError> {
    ScryptHasher::new(pepper, ScryptParams::default())
}

/// Pepper `plaintext` and `salt` into the password fed to the KDF.
///
/// The result is the hex HMAC of `"{plaintext}-{salt}"` keyed with the pepper.
pub(crate) fn peppered_input(
    pepper: &[u8],
    plaintext: &str,
    salt: &str,
) -> Result<String, PasswordError> {
    hmac_hex(format!("{plaintext}-{salt}").as_bytes(), pepper)
}

/// Re-derive `stored` with its own scheme and parameters and compare.
pub(crate) fn verify_encoded(
    pepper: &[u8],
    plaintext: &str,
    salt: &str,
    stored: &str,
) -> Result<(), PasswordError> {
    let expected: EncodedHash = stored.parse().map_err(|e| {
        tracing::warn!(error = %e, "Stored password hash could not be parsed");
        e
    })?;

    let input = peppered_input(pepper, plaintext, salt)?;
    let candidate = expected.rederive(input.as_bytes(), salt.as_bytes())?;

    if candidate.to_string() != stored {
        tracing::debug!(scheme = expected.scheme(), "Password hash mismatch");
        return Err(PasswordError::HashMismatch);
    }

    Ok(())
}
