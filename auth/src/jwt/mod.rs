pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;
pub mod token;
pub mod verifier;

pub use claims::Claims;
pub use errors::TokenError;
pub use handler::JwtHandler;
pub use issuer::Issuer;
pub use issuer::JwtIssuer;
pub use token::Role;
pub use token::Token;
pub use verifier::JwtVerifier;
pub use verifier::Verifier;
