use crate::application::auth::token_utils::{TokenResponse, issue_and_store_tokens};
use crate::application::hashing::verify_secret;
use crate::domain::auth::TokenService;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "pw1234")]
    pub password: String,
}

pub type SignInResponse = TokenResponse;

pub struct SignInUseCase {
    user_repo: Arc<dyn UserRepository>,
    token_service: Arc<dyn TokenService>,
    password_service: Arc<dyn PasswordHashingService>,
    access_token_expiry: i64,
}

impl SignInUseCase {
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

    #[tracing::instrument(skip(self, req), fields(username = %req.username))]
    pub async fn execute(&self, req: SignInRequest) -> Result<SignInResponse, AppError> {
        let user = self
            .user_repo
            .find_by_username(&req.username)
            .await
            .map_err(AppError::DatabaseError)?
            .ok_or_else(|| {
                tracing::warn!("Sign-in for unknown username");
                AppError::NotFound("User does not exist".to_string())
            })?;

        if !verify_secret(&self.password_service, &req.password, &user.password_hash).await? {
            tracing::warn!(user_id = user.id, "Password verification failed");
            return Err(AppError::Unauthorized("Password is incorrect".to_string()));
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
