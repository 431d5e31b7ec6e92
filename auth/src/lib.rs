//! Credential verification for the user service
//!
//! Provides the two stateless halves of authentication:
//! - Password hashing behind a [`Hasher`] capability with three schemes
//!   (scrypt, PBKDF2-HMAC-SHA512, legacy SHA-512), all peppered with a keyed
//!   MAC and stored in a self-describing `$`-delimited encoding
//! - Signed token (HS256 JWT) issuing and verification with role claims,
//!   expiry and clock-skew leeway
//!
//! Both halves are configured at construction and hold no mutable state, so a
//! single instance can be shared across threads. Storage, HTTP and password
//! policy live with the caller.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use user_auth::password::gen_salt;
//! use user_auth::password::Pbkdf2Params;
//! use user_auth::Hasher;
//! use user_auth::Pbkdf2Hasher;
//!
//! let params = Pbkdf2Params { iterations: 1000, key_len: 64 };
//! let hasher = Pbkdf2Hasher::new("pepper", params).unwrap();
//!
//! let salt = gen_salt(16).unwrap();
//! let hash = hasher.hash("my_password", &salt).unwrap();
//! assert!(hash.starts_with("PBKDF2$1000$64$"));
//! assert!(hasher.verify("my_password", &salt, &hash).is_ok());
//! ```
//!
//! ## Tokens
//! ```
//! use chrono::Duration;
//! use user_auth::{Issuer, JwtCredentials, JwtIssuer, JwtVerifier, Verifier};
//!
//! let credentials = JwtCredentials {
//!     issuer: "user-service".to_string(),
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//! };
//!
//! let raw = JwtIssuer::new(&credentials).issue("user123", "USER").unwrap();
//! let token = JwtVerifier::new(&credentials, Duration::minutes(1))
//!     .verify(&raw)
//!     .unwrap();
//! assert_eq!(token.subject, "user123");
//! assert_eq!(token.role, "USER");
//! ```

pub mod authenticator;
pub mod config;
pub mod credentials;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use self::config::Config;
pub use self::config::JwtCredentials;
pub use credentials::Credentials;
pub use jwt::Issuer;
pub use jwt::JwtIssuer;
pub use jwt::JwtVerifier;
pub use jwt::Role;
pub use jwt::Token;
pub use jwt::TokenError;
pub use jwt::Verifier;
pub use password::Hasher;
pub use password::PasswordError;
pub use password::Pbkdf2Hasher;
pub use password::ScryptHasher;
pub use password::Sha512Hasher;
