use std::env;
use std::io::Read;
use std::sync::Arc;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

use crate::authenticator::Authenticator;
use crate::jwt::JwtIssuer;
use crate::jwt::JwtVerifier;
use crate::password::HashScheme;
use crate::password::Hasher;
use crate::password::PasswordError;
use crate::password::Pbkdf2Hasher;
use crate::password::Pbkdf2Params;
use crate::password::ScryptHasher;
use crate::password::ScryptParams;
use crate::password::Sha512Hasher;

/// Credentials to issue and verify tokens.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct JwtCredentials {
    pub issuer: String,
    pub secret: String,
}

impl JwtCredentials {
    /// Read credentials from a JSON document with `issuer` and `secret` keys.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub secret: String,
    #[serde(default = "default_leeway_seconds")]
    pub leeway_seconds: i64,
    #[serde(default = "default_token_lifetime_hours")]
    pub token_lifetime_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub pepper: String,
    #[serde(default)]
    pub scheme: HashScheme,
    #[serde(default = "default_salt_length")]
    pub salt_length: usize,
    #[serde(default = "default_cost")]
    pub cost: u64,
    #[serde(default = "default_parallelization")]
    pub parallelization: u32,
    #[serde(default = "default_block_size")]
    pub block_size: u32,
    #[serde(default = "default_key_length")]
    pub key_length: usize,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

fn default_leeway_seconds() -> i64 {
    60
}

fn default_token_lifetime_hours() -> i64 {
    crate::jwt::issuer::DEFAULT_TOKEN_LIFETIME_HOURS
}

fn default_salt_length() -> usize {
    crate::authenticator::DEFAULT_SALT_LENGTH
}

fn default_cost() -> u64 {
    ScryptParams::default().cost
}

fn default_parallelization() -> u32 {
    ScryptParams::default().parallelization
}

fn default_block_size() -> u32 {
    ScryptParams::default().block_size
}

fn default_key_length() -> usize {
    ScryptParams::default().key_len
}

fn default_iterations() -> u32 {
    Pbkdf2Params::default().iterations
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, PASSWORD__PEPPER, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        tracing::debug!(
            run_mode = %run_mode,
            issuer = %config.jwt.issuer,
            scheme = ?config.password.scheme,
            "Auth configuration loaded"
        );

        Ok(config)
    }

    /// Build configuration from an in-memory document.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(content, format))
            .build()?
            .try_deserialize()
    }

    /// Build the credential coordinator described by this configuration.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Hashing parameters or token durations are unusable
    pub fn authenticator(&self) -> Result<Authenticator, ConfigError> {
        let hasher = self
            .password
            .hasher()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(
            Authenticator::new(hasher, self.jwt.issuer()?, self.jwt.verifier()?)
                .with_salt_length(self.password.salt_length),
        )
    }
}

impl JwtConfig {
    pub fn credentials(&self) -> JwtCredentials {
        JwtCredentials {
            issuer: self.issuer.clone(),
            secret: self.secret.clone(),
        }
    }

    /// Build the token issuer.
    ///
    /// # Errors
    /// * `ConfigError::Message` - `token_lifetime_hours` is out of range
    pub fn issuer(&self) -> Result<JwtIssuer, ConfigError> {
        let lifetime = Duration::try_hours(self.token_lifetime_hours).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.token_lifetime_hours {} is out of range",
                self.token_lifetime_hours
            ))
        })?;

        Ok(JwtIssuer::new(&self.credentials()).with_token_lifetime(lifetime))
    }

    /// Build the token verifier.
    ///
    /// # Errors
    /// * `ConfigError::Message` - `leeway_seconds` is out of range
    pub fn verifier(&self) -> Result<JwtVerifier, ConfigError> {
        let leeway = Duration::try_seconds(self.leeway_seconds).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.leeway_seconds {} is out of range",
                self.leeway_seconds
            ))
        })?;

        Ok(JwtVerifier::new(&self.credentials(), leeway))
    }
}

impl PasswordConfig {
    /// Build the hasher used for new credentials.
    ///
    /// # Errors
    /// * `InvalidParameters` - Configured cost parameters are unusable
    pub fn hasher(&self) -> Result<Arc<dyn Hasher>, PasswordError> {
        let hasher: Arc<dyn Hasher> = match self.scheme {
            HashScheme::Scrypt => Arc::new(ScryptHasher::new(
                &self.pepper,
                ScryptParams {
                    cost: self.cost,
                    parallelization: self.parallelization,
                    block_size: self.block_size,
                    key_len: self.key_length,
                },
            )?),
            HashScheme::Pbkdf2 => Arc::new(Pbkdf2Hasher::new(
                &self.pepper,
                Pbkdf2Params {
                    iterations: self.iterations,
                    key_len: self.key_length,
                },
            )?),
            HashScheme::Sha512 => {
                tracing::warn!("Legacy sha512 password hashing configured for new credentials");
                Arc::new(Sha512Hasher::new(&self.pepper))
            }
        };

        Ok(hasher)
    }
}
