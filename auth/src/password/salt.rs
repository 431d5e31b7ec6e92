use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use super::errors::PasswordError;

/// Generate a random hex encoded salt.
///
/// Bytes are drawn from the operating system's CSPRNG.
///
/// # Arguments
/// * `length` - Number of random bytes (the result has `2 * length` characters)
///
/// # Errors
/// * `Entropy` - The entropy source was unavailable
pub fn gen_salt(length: usize) -> Result<String, PasswordError> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| PasswordError::Entropy(e.to_string()))?;

    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_gen_salt_distinct() {
        let salts: Vec<String> = (0..100)
            .map(|_| gen_salt(10).expect("Failed to generate salt"))
            .collect();

        let unique: HashSet<&String> = salts.iter().collect();
        assert_eq!(unique.len(), salts.len());
        for salt in &salts {
            assert_eq!(salt.len(), 20);
            assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_gen_salt_zero_length() {
        let salt = gen_salt(0).expect("Failed to generate salt");
        assert!(salt.is_empty());
    }
}
