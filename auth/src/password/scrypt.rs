use ::scrypt::Params;

use super::encoding::EncodedHash;
use super::errors::PasswordError;
use super::hasher::peppered_input;
use super::hasher::verify_encoded;
use super::hasher::Hasher;

/// Smallest key length accepted by the scrypt implementation.
pub const MIN_KEY_LEN: usize = 10;

/// Largest key length accepted by the scrypt implementation.
pub const MAX_KEY_LEN: usize = 64;

/// Upper bound on `128 * block_size * (cost + parallelization)`, the working
/// memory of one derivation.
pub const MAX_MEMORY_BYTES: u128 = 1 << 30;

/// Tunable parameters of the memory-hard scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// CPU/memory cost (N), a power of two
    pub cost: u64,
    /// Parallelization factor (p)
    pub parallelization: u32,
    /// Block size factor (r)
    pub block_size: u32,
    /// Derived key length in bytes
    pub key_len: usize,
}

impl ScryptParams {
    /// Check that a derivation with these parameters is possible and bounded.
    pub fn check(&self) -> Result<(), String> {
        if self.cost < 2 || !self.cost.is_power_of_two() {
            return Err(format!("cost {} is not a power of two above 1", self.cost));
        }
        if self.parallelization == 0 {
            return Err("parallelization must be positive".to_string());
        }
        if self.block_size == 0 {
            return Err("block size must be positive".to_string());
        }
        if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&self.key_len) {
            return Err(format!(
                "key length {} outside {}..={}",
                self.key_len, MIN_KEY_LEN, MAX_KEY_LEN
            ));
        }
        let blocks = u128::from(self.cost) + u128::from(self.parallelization);
        if 128 * u128::from(self.block_size) * blocks > MAX_MEMORY_BYTES {
            return Err(format!(
                "cost {} with block size {} and parallelization {} exceeds the memory bound",
                self.cost, self.block_size, self.parallelization
            ));
        }

        Ok(())
    }

    /// Run scrypt over `input` and return the hex encoded key.
    pub(crate) fn derive(&self, input: &[u8], salt: &[u8]) -> Result<String, PasswordError> {
        self.check().map_err(PasswordError::InvalidParameters)?;

        let log_n = self.cost.trailing_zeros() as u8;
        let params = Params::new(log_n, self.block_size, self.parallelization, self.key_len)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        let mut key = vec![0u8; self.key_len];
        ::scrypt::scrypt(input, salt, &params, &mut key)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(hex::encode(key))
    }
}

impl Default for ScryptParams {
    /// Recommended production parameters.
    fn default() -> Self {
        Self {
            cost: 32768,
            parallelization: 1,
            block_size: 8,
            key_len: 64,
        }
    }
}

/// Memory-hard password hasher (scrypt).
///
/// Hashing is CPU and memory intensive by design; async callers should go
/// through [`hash_blocking`](super::blocking::hash_blocking).
pub struct ScryptHasher {
    pepper: Vec<u8>,
    params: ScryptParams,
}

impl ScryptHasher {
    /// Create a new scrypt hasher.
    ///
    /// # Arguments
    /// * `pepper` - Server-side secret mixed into every hash
    /// * `params` - Parameters used for newly created hashes
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters fail validation
    pub fn new(pepper: impl AsRef<[u8]>, params: ScryptParams) -> Result<Self, PasswordError> {
        params.check().map_err(PasswordError::InvalidParameters)?;

        Ok(Self {
            pepper: pepper.as_ref().to_vec(),
            params,
        })
    }

    /// Parameters used for new hashes.
    pub fn params(&self) -> &ScryptParams {
        &self.params
    }
}

impl Hasher for ScryptHasher {
    fn hash(&self, plaintext: &str, salt: &str) -> Result<String, PasswordError> {
        let input = peppered_input(&self.pepper, plaintext, salt)?;
        let hash = self.params.derive(input.as_bytes(), salt.as_bytes())?;

        Ok(EncodedHash::Scrypt {
            params: self.params,
            hash,
        }
        .to_string())
    }

    fn verify(&self, plaintext: &str, salt: &str, hash: &str) -> Result<(), PasswordError> {
        verify_encoded(&self.pepper, plaintext, salt, hash)
    }
}
