use std::fmt;
use std::str::FromStr;

use super::errors::PasswordError;
use super::pbkdf2::Pbkdf2Params;
use super::scrypt::ScryptParams;
use super::sha512;

/// Field delimiter of the encoded hash format.
pub const DELIMITER: char = '$';

/// Scheme tag of scrypt encoded hashes.
pub const SCRYPT_TAG: &str = "SCRYPT";

/// Scheme tag of PBKDF2 encoded hashes.
pub const PBKDF2_TAG: &str = "PBKDF2";

const SCRYPT_FIELDS: usize = 6;
const PBKDF2_FIELDS: usize = 4;

/// Self-describing password hash as persisted by the credential store.
///
/// The string form names the scheme and every parameter needed to reproduce
/// the derivation, so a hash keeps verifying after the deployed defaults change:
///
/// ```text
/// SCRYPT$<cost>$<parallelization>$<block size>$<key length>$<hex>
/// PBKDF2$<iterations>$<key length>$<hex>
/// <hex>                                   (legacy SHA-512, no tag)
/// ```
///
/// The legacy form is recognised only by the absence of a delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedHash {
    Scrypt { params: ScryptParams, hash: String },
    Pbkdf2 { params: Pbkdf2Params, hash: String },
    Sha512 { hash: String },
}

impl EncodedHash {
    /// Human readable scheme name, for logs.
    pub fn scheme(&self) -> &'static str {
        match self {
            EncodedHash::Scrypt { .. } => "scrypt",
            EncodedHash::Pbkdf2 { .. } => "pbkdf2",
            EncodedHash::Sha512 { .. } => "sha512",
        }
    }

    /// Hex encoded key material.
    pub fn hash(&self) -> &str {
        match self {
            EncodedHash::Scrypt { hash, .. }
            | EncodedHash::Pbkdf2 { hash, .. }
            | EncodedHash::Sha512 { hash } => hash,
        }
    }

    /// Derive a new hash with this hash's scheme and parameters.
    ///
    /// # Arguments
    /// * `input` - Peppered password (keyed MAC hex string)
    /// * `salt` - KDF salt
    ///
    /// # Errors
    /// * `InvalidParameters` - The underlying KDF rejected the parameters
    pub fn rederive(&self, input: &[u8], salt: &[u8]) -> Result<EncodedHash, PasswordError> {
        let rederived = match self {
            EncodedHash::Scrypt { params, .. } => EncodedHash::Scrypt {
                params: *params,
                hash: params.derive(input, salt)?,
            },
            EncodedHash::Pbkdf2 { params, .. } => EncodedHash::Pbkdf2 {
                params: *params,
                hash: params.derive(input, salt),
            },
            EncodedHash::Sha512 { .. } => EncodedHash::Sha512 {
                hash: sha512::digest_hex(input),
            },
        };

        Ok(rederived)
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodedHash::Scrypt { params, hash } => write!(
                f,
                "{SCRYPT_TAG}${}${}${}${}${hash}",
                params.cost, params.parallelization, params.block_size, params.key_len
            ),
            EncodedHash::Pbkdf2 { params, hash } => write!(
                f,
                "{PBKDF2_TAG}${}${}${hash}",
                params.iterations, params.key_len
            ),
            EncodedHash::Sha512 { hash } => f.write_str(hash),
        }
    }
}

impl FromStr for EncodedHash {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PasswordError::InvalidEncoding("empty hash".to_string()));
        }

        if !s.contains(DELIMITER) {
            return Ok(EncodedHash::Sha512 {
                hash: s.to_string(),
            });
        }

        let fields: Vec<&str> = s.split(DELIMITER).collect();
        match fields[0] {
            SCRYPT_TAG => parse_scrypt(&fields),
            PBKDF2_TAG => parse_pbkdf2(&fields),
            tag => Err(PasswordError::InvalidEncoding(format!(
                "unknown scheme tag '{tag}'"
            ))),
        }
    }
}

fn parse_scrypt(fields: &[&str]) -> Result<EncodedHash, PasswordError> {
    check_field_count(SCRYPT_TAG, fields, SCRYPT_FIELDS)?;

    let params = ScryptParams {
        cost: parse_number(SCRYPT_TAG, "cost", fields[1])?,
        parallelization: parse_number(SCRYPT_TAG, "parallelization", fields[2])?,
        block_size: parse_number(SCRYPT_TAG, "block size", fields[3])?,
        key_len: parse_number(SCRYPT_TAG, "key length", fields[4])?,
    };
    params
        .check()
        .map_err(|e| PasswordError::InvalidEncoding(format!("{SCRYPT_TAG}: {e}")))?;

    Ok(EncodedHash::Scrypt {
        params,
        hash: fields[5].to_string(),
    })
}

fn parse_pbkdf2(fields: &[&str]) -> Result<EncodedHash, PasswordError> {
    check_field_count(PBKDF2_TAG, fields, PBKDF2_FIELDS)?;

    let params = Pbkdf2Params {
        iterations: parse_number(PBKDF2_TAG, "iterations", fields[1])?,
        key_len: parse_number(PBKDF2_TAG, "key length", fields[2])?,
    };
    params
        .check()
        .map_err(|e| PasswordError::InvalidEncoding(format!("{PBKDF2_TAG}: {e}")))?;

    Ok(EncodedHash::Pbkdf2 {
        params,
        hash: fields[3].to_string(),
    })
}

fn check_field_count(tag: &str, fields: &[&str], expected: usize) -> Result<(), PasswordError> {
    if fields.len() != expected {
        return Err(PasswordError::InvalidEncoding(format!(
            "{tag} expects {expected} fields, got {}",
            fields.len()
        )));
    }

    Ok(())
}

fn parse_number<T: FromStr>(tag: &str, name: &str, field: &str) -> Result<T, PasswordError> {
    field
        .parse()
        .map_err(|_| PasswordError::InvalidEncoding(format!("{tag} {name} '{field}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRYPT_HASH: &str = "SCRYPT$1024$1$8$64$65fe22a1e99bdf22bab227fca3c06be019e5ee9aee6f462d7c07626dca7bf41c4ee60cc15d575471c3a407f16b8bf2fb096a1a3a336bdafcc98accdb6e11d626";
    const PBKDF2_HASH: &str = "PBKDF2$100$64$66d2f4812bd6a27acc9c27b7d590097654612a2d2189d88cc4272055bfcdfe0d864e26494a252ad6cdaa37c78d3662d4bae7dfa410d71884dc6896667e008e6f";

    #[test]
    fn test_parse_scrypt() {
        let encoded: EncodedHash = SCRYPT_HASH.parse().expect("Failed to parse scrypt hash");

        match &encoded {
            EncodedHash::Scrypt { params, hash } => {
                assert_eq!(params.cost, 1024);
                assert_eq!(params.parallelization, 1);
                assert_eq!(params.block_size, 8);
                assert_eq!(params.key_len, 64);
                assert!(hash.starts_with("65fe22a1"));
            }
            other => panic!("Expected scrypt hash, got {:?}", other),
        }
        assert_eq!(encoded.to_string(), SCRYPT_HASH);
    }

    #[test]
    fn test_parse_pbkdf2() {
        let encoded: EncodedHash = PBKDF2_HASH.parse().expect("Failed to parse pbkdf2 hash");

        assert_eq!(encoded.scheme(), "pbkdf2");
        assert_eq!(
            encoded,
            EncodedHash::Pbkdf2 {
                params: Pbkdf2Params {
                    iterations: 100,
                    key_len: 64,
                },
                hash: encoded.hash().to_string(),
            }
        );
        assert_eq!(encoded.to_string(), PBKDF2_HASH);
    }

    #[test]
    fn test_parse_legacy() {
        let encoded: EncodedHash = "abcdef0123".parse().expect("Failed to parse legacy hash");
        assert_eq!(
            encoded,
            EncodedHash::Sha512 {
                hash: "abcdef0123".to_string()
            }
        );
        assert_eq!(encoded.to_string(), "abcdef0123");
    }

    #[test]
    fn test_parse_unknown_tag() {
        let result = "BCRYPT$10$abcdef".parse::<EncodedHash>();
        assert!(matches!(result, Err(PasswordError::InvalidEncoding(_))));

        let result = "scrypt$1024$1$8$64$abcdef".parse::<EncodedHash>();
        assert!(matches!(result, Err(PasswordError::InvalidEncoding(_))));
    }

    #[test]
    fn test_parse_wrong_field_count() {
        for encoded in [
            "SCRYPT$1024$1$8$abcdef",
            "SCRYPT$1024$1$8$64$abcdef$extra",
            "PBKDF2$100$abcdef",
            "PBKDF2$100$64$abcdef$extra",
        ] {
            let result = encoded.parse::<EncodedHash>();
            assert!(
                matches!(result, Err(PasswordError::InvalidEncoding(_))),
                "{encoded} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_bare_tag_as_legacy() {
        for encoded in ["PBKDF2", "SCRYPT"] {
            let result = encoded.parse::<EncodedHash>();
            assert_eq!(
                result,
                Ok(EncodedHash::Sha512 {
                    hash: encoded.to_string()
                })
            );
        }
    }

    #[test]
    fn test_parse_non_numeric_field() {
        for encoded in [
            "SCRYPT$abc$1$8$64$abcdef",
            "SCRYPT$1024$-1$8$64$abcdef",
            "SCRYPT$1024$1$8$6.4$abcdef",
            "PBKDF2$$64$abcdef",
            "PBKDF2$100$sixty$abcdef",
        ] {
            let result = encoded.parse::<EncodedHash>();
            assert!(
                matches!(result, Err(PasswordError::InvalidEncoding(_))),
                "{encoded} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_impossible_parameters() {
        for encoded in [
            "SCRYPT$1000$1$8$64$abcdef",
            "SCRYPT$1024$0$8$64$abcdef",
            "SCRYPT$1024$1$8$4$abcdef",
            "SCRYPT$1099511627776$1$8$64$abcdef",
            "SCRYPT$2$536870912$1$10$abcdef",
            "PBKDF2$0$64$abcdef",
            "PBKDF2$4294967295$64$abcdef",
            "PBKDF2$100$0$abcdef",
        ] {
            let result = encoded.parse::<EncodedHash>();
            assert!(
                matches!(result, Err(PasswordError::InvalidEncoding(_))),
                "{encoded} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_empty() {
        let result = "".parse::<EncodedHash>();
        assert!(matches!(result, Err(PasswordError::InvalidEncoding(_))));
    }
}
