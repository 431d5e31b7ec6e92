use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

use super::errors::PasswordError;

type HmacSha256 = Hmac<Sha256>;

/// Compute a hex encoded HMAC-SHA256 of `plaintext` under `key`.
///
/// # Arguments
/// * `plaintext` - Bytes to authenticate
/// * `key` - Shared secret (the pepper when used for password hashing)
///
/// # Returns
/// Lowercase hex string, 64 characters long
///
/// # Errors
/// * `KeyedMac` - The MAC could not be keyed
pub fn hmac_hex(plaintext: &[u8], key: &[u8]) -> Result<String, PasswordError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| PasswordError::KeyedMac(e.to_string()))?;
    mac.update(plaintext);

    Ok(hex::encode(mac.finalize().into_bytes()))
}
