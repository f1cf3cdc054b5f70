use crate::domain::password::PasswordHashingService;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Hashes on the blocking pool; Argon2 must never run on an async worker
pub async fn hash_secret(
    hasher: &Arc<dyn PasswordHashingService>,
    secret: &str,
) -> Result<String, AppError> {
    let hasher = hasher.clone();
    let secret = secret.to_string();

    tokio::task::spawn_blocking(move || hasher.hash_password(&secret))
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .map_err(AppError::InternalServerError)
}

pub async fn verify_secret(
    hasher: &Arc<dyn PasswordHashingService>,
    secret: &str,
    hash: &str,
) -> Result<bool, AppError> {
    let hasher = hasher.clone();
    let secret = secret.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || hasher.verify_password(&secret, &hash))
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))
}
