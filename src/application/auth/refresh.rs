use crate::application::auth::token_utils::{TokenResponse, issue_and_store_tokens};
use crate::application::hashing::verify_secret;
use crate::domain::auth::{TokenKind, TokenService};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

pub type RefreshTokenResponse = TokenResponse;

pub struct RefreshTokenUseCase {
    user_repo: Arc<dyn UserRepository>,
    token_service: Arc<dyn TokenService>,
    password_service: Arc<dyn PasswordHashingService>,
    access_token_expiry: i64,
}

impl RefreshTokenUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_service: Arc<dyn TokenService>,
        password_service: Arc<dyn PasswordHashingService>,
        access_token_expiry: i64,
    ) -> Self {
        Self {
            user_repo,
            token_service,
            password_service,
            access_token_expiry,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        req: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, AppError> {
        let claims = self
            .token_service
            .verify(TokenKind::Refresh, &req.refresh_token)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        let user_id = claims
            .user_id()
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(AppError::DatabaseError)?
            .ok_or_else(|| AppError::Unauthorized("Access denied".to_string()))?;

        // Cleared on logout
        let stored_hash = user
            .refresh_token_hash
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Access denied".to_string()))?;

        // Anything but the most recently issued token fails here
        if !verify_secret(&self.password_service, &req.refresh_token, stored_hash).await? {
            tracing::warn!(user_id, "Refresh token does not match the active session");
            return Err(AppError::Unauthorized(
                "Refresh token has been revoked".to_string(),
            ));
        }

        issue_and_store_tokens(
            user.id,
            &user.username,
            &self.token_service,
            &self.password_service,
            &self.user_repo,
            self.access_token_expiry,
        )
        .await
    }
}
