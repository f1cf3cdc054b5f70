use crate::application::hashing::hash_secret;
use crate::domain::auth::{TokenKind, TokenPair, TokenService};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Serialize;
use std::sync::Arc;

/// Common response structure for token operations
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn new(pair: TokenPair, access_token_expiry: i64) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: access_token_expiry,
        }
    }
}

async fn sign_on_worker(
    token_service: Arc<dyn TokenService>,
    kind: TokenKind,
    user_id: i64,
    username: String,
) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || token_service.sign(kind, user_id, &username))
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .map_err(AppError::InternalServerError)
}

/// Sign the access and refresh tokens concurrently. Either both succeed or no pair exists.
pub async fn issue_token_pair(
    token_service: &Arc<dyn TokenService>,
    user_id: i64,
    username: &str,
) -> Result<TokenPair, AppError> {
    let (access_token, refresh_token) = futures::try_join!(
        sign_on_worker(
            token_service.clone(),
            TokenKind::Access,
            user_id,
            username.to_string()
        ),
        sign_on_worker(
            token_service.clone(),
            TokenKind::Refresh,
            user_id,
            username.to_string()
        ),
    )?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Issue a fresh pair and make its refresh token the only one honoured for the user
pub async fn issue_and_store_tokens(
    user_id: i64,
    username: &str,
    token_service: &Arc<dyn TokenService>,
    password_service: &Arc<dyn PasswordHashingService>,
    user_repo: &Arc<dyn UserRepository>,
    access_token_expiry: i64,
) -> Result<TokenResponse, AppError> {
    let pair = issue_token_pair(token_service, user_id, username).await?;

    let token_hash = hash_secret(password_service, &pair.refresh_token).await?;

    user_repo
        .update_refresh_token_hash(user_id, &token_hash)
        .await
        .map_err(AppError::DatabaseError)?;

    tracing::debug!(user_id, "refresh token rotated");

    Ok(TokenResponse::new(pair, access_token_expiry))
}
