use sha2::Digest;
use sha2::Sha512;

use super::encoding::EncodedHash;
use super::errors::PasswordError;
use super::hasher::peppered_input;
use super::hasher::verify_encoded;
use super::hasher::Hasher;

pub(crate) fn digest_hex(input: &[u8]) -> String {
    hex::encode(Sha512::digest(input))
}

/// Plain keyed-hash password hasher: one SHA-512 over the peppered input.
///
/// There is no cost parameter. Kept so that legacy hashes, which carry no
/// scheme tag, can still be produced and verified; do not use for new
/// credentials.
pub struct Sha512Hasher {
    pepper: Vec<u8>,
}

impl Sha512Hasher {
    /// Create a legacy hasher keyed with `pepper`.
    pub fn new(pepper: impl AsRef<[u8]>) -> Self {
        Self {
            pepper: pepper.as_ref().to_vec(),
        }
    }
}

impl Hasher for Sha512Hasher {
    fn hash(&self, plaintext: &str, salt: &str) -> Result<String, PasswordError> {
        let input = peppered_input(&self.pepper, plaintext, salt)?;

        Ok(EncodedHash::Sha512 {
            hash: digest_hex(input.as_bytes()),
        }
        .to_string())
    }

    fn verify(&self, plaintext: &str, salt: &str, hash: &str) -> Result<(), PasswordError> {
        verify_encoded(&self.pepper, plaintext, salt, hash)
    }
}
