pub mod blocking;
pub mod encoding;
pub mod errors;
pub mod hasher;
pub mod mac;
pub mod pbkdf2;
pub mod salt;
pub mod scrypt;
pub mod sha512;

pub use self::blocking::hash_blocking;
pub use self::blocking::verify_blocking;
pub use self::encoding::EncodedHash;
pub use self::errors::PasswordError;
pub use self::hasher::new_hasher;
pub use self::hasher::HashScheme;
pub use self::hasher::Hasher;
pub use self::mac::hmac_hex;
pub use self::pbkdf2::Pbkdf2Hasher;
pub use self::pbkdf2::Pbkdf2Params;
pub use self::salt::gen_salt;
pub use self::scrypt::ScryptHasher;
pub use self::scrypt::ScryptParams;
pub use self::sha512::Sha512Hasher;
