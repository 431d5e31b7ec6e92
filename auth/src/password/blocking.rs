use std::sync::Arc;

use super::errors::PasswordError;
use super::hasher::Hasher;

/// Hash a password on tokio's blocking thread pool.
///
/// Memory-hard hashing takes tens of milliseconds and must not run inline on
/// an async worker thread.
///
/// # Errors
/// * Any error of [`Hasher::hash`]
/// * `WorkerFailed` - The blocking task panicked or was cancelled
pub async fn hash_blocking(
    hasher: Arc<dyn Hasher>,
    plaintext: String,
    salt: String,
) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hasher.hash(&plaintext, &salt))
        .await
        .map_err(|e| PasswordError::WorkerFailed(e.to_string()))?
}

/// Verify a password on tokio's blocking thread pool.
///
/// # Errors
/// * Any error of [`Hasher::verify`]
/// * `WorkerFailed` - The blocking task panicked or was cancelled
pub async fn verify_blocking(
    hasher: Arc<dyn Hasher>,
    plaintext: String,
    salt: String,
    hash: String,
) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &salt, &hash))
        .await
        .map_err(|e| PasswordError::WorkerFailed(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::sha512::Sha512Hasher;

    #[tokio::test]
    async fn test_hash_and_verify_blocking() {
        let hasher: Arc<dyn Hasher> = Arc::new(Sha512Hasher::new("pepper"));

        let hash = hash_blocking(Arc::clone(&hasher), "password".into(), "salt".into())
            .await
            .expect("Failed to hash password");

        let result = verify_blocking(
            Arc::clone(&hasher),
            "password".into(),
            "salt".into(),
            hash.clone(),
        )
        .await;
        assert_eq!(result, Ok(()));

        let result = verify_blocking(hasher, "wrong".into(), "salt".into(), hash).await;
        assert_eq!(result, Err(PasswordError::HashMismatch));
    }
}
