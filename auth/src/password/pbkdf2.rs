use sha2::Sha512;

use super::encoding::EncodedHash;
use super::errors::PasswordError;
use super::hasher::peppered_input;
use super::hasher::verify_encoded;
use super::hasher::Hasher;

/// Largest derived key length accepted, in bytes.
pub const MAX_KEY_LEN: usize = 1024;

/// Largest iteration count accepted.
pub const MAX_ITERATIONS: u32 = 10_000_000;

/// Tunable parameters of the iterated PBKDF2-HMAC-SHA512 scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// Number of HMAC-SHA512 rounds
    pub iterations: u32,
    /// Derived key length in bytes
    pub key_len: usize,
}

impl Pbkdf2Params {
    /// Check that a derivation with these parameters is possible and bounded.
    pub fn check(&self) -> Result<(), String> {
        if self.iterations == 0 || self.iterations > MAX_ITERATIONS {
            return Err(format!(
                "iterations {} outside 1..={}",
                self.iterations, MAX_ITERATIONS
            ));
        }
        if self.key_len == 0 || self.key_len > MAX_KEY_LEN {
            return Err(format!(
                "key length {} outside 1..={}",
                self.key_len, MAX_KEY_LEN
            ));
        }

        Ok(())
    }

    pub(crate) fn derive(&self, input: &[u8], salt: &[u8]) -> String {
        let mut key = vec![0u8; self.key_len];
        ::pbkdf2::pbkdf2_hmac::<Sha512>(input, salt, self.iterations, &mut key);

        hex::encode(key)
    }
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            iterations: 210_000,
            key_len: 64,
        }
    }
}

/// Password hasher using PBKDF2 with HMAC-SHA512 as the inner primitive.
pub struct Pbkdf2Hasher {
    pepper: Vec<u8>,
    params: Pbkdf2Params,
}

impl Pbkdf2Hasher {
    /// Create a new PBKDF2 hasher.
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters fail validation
    pub fn new(pepper: impl AsRef<[u8]>, params: Pbkdf2Params) -> Result<Self, PasswordError> {
        params.check().map_err(PasswordError::InvalidParameters)?;

        Ok(Self {
            pepper: pepper.as_ref().to_vec(),
            params,
        })
    }

    /// Parameters used for new hashes.
    pub fn params(&self) -> &Pbkdf2Params {
        &self.params
    }
}

impl Hasher for Pbkdf2Hasher {
    fn hash(&self, plaintext: &str, salt: &str) -> Result<String, PasswordError> {
        let input = peppered_input(&self.pepper, plaintext, salt)?;

        Ok(EncodedHash::Pbkdf2 {
            params: self.params,
            hash: self.params.derive(input.as_bytes(), salt.as_bytes()),
        }
        .to_string())
    }

    fn verify(&self, plaintext: &str, salt: &str, hash: &str) -> Result<(), PasswordError> {
        verify_encoded(&self.pepper, plaintext, salt, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_HASH: &str = "PBKDF2$100$64$66d2f4812bd6a27acc9c27b7d590097654612a2d2189d88cc4272055bfcdfe0d864e26494a252ad6cdaa37c78d3662d4bae7dfa410d71884dc6896667e008e6f";

    fn hasher(pepper: &str, iterations: u32) -> Pbkdf2Hasher {
        Pbkdf2Hasher::new(
            pepper,
            Pbkdf2Params {
                iterations,
                key_len: 64,
            },
        )
        .expect("Failed to create hasher")
    }

    #[test]
    fn test_known_vector() {
        let hash = hasher("secret-pepper", 100)
            .hash("my-password", "random-salt")
            .expect("Failed to hash password");
        assert_eq!(hash, KNOWN_HASH);
    }

    #[test]
    fn test_different_iterations_produce_different_hash() {
        let first = hasher("secret-pepper", 100)
            .hash("other-secret-password", "long-random-salt")
            .expect("Failed to hash password");
        let second = hasher("secret-pepper", 200)
            .hash("other-secret-password", "long-random-salt")
            .expect("Failed to hash password");

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify() {
        let default_hasher = hasher("secret-pepper", 100);
        let double_iterations = hasher("secret-pepper", 200);
        let wrong_pepper = hasher("wrong-secret-pepper", 100);
        let tampered = KNOWN_HASH.replacen("$66d2", "$06d2", 1);

        assert_eq!(
            default_hasher.verify("my-password", "random-salt", KNOWN_HASH),
            Ok(())
        );
        assert_eq!(
            double_iterations.verify("my-password", "random-salt", KNOWN_HASH),
            Ok(())
        );
        assert_eq!(
            default_hasher.verify("my-password", "random-salt", &tampered),
            Err(PasswordError::HashMismatch)
        );
        assert_eq!(
            default_hasher.verify("my-password", "random-salt-wrong", KNOWN_HASH),
            Err(PasswordError::HashMismatch)
        );
        assert_eq!(
            default_hasher.verify("my-password-wrong", "random-salt", KNOWN_HASH),
            Err(PasswordError::HashMismatch)
        );
        assert_eq!(
            wrong_pepper.verify("my-password", "random-salt", KNOWN_HASH),
            Err(PasswordError::HashMismatch)
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let result = Pbkdf2Hasher::new(
            "pepper",
            Pbkdf2Params {
                iterations: 0,
                key_len: 64,
            },
        );
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));

        let result = Pbkdf2Hasher::new(
            "pepper",
            Pbkdf2Params {
                iterations: MAX_ITERATIONS + 1,
                key_len: 64,
            },
        );
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }
}
