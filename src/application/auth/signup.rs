use crate::application::auth::token_utils::{TokenResponse, issue_and_store_tokens};
use crate::application::users::create::{CreateUserRequest, CreateUserUseCase};
use crate::domain::auth::TokenService;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use std::sync::Arc;

pub type SignUpRequest = CreateUserRequest;
pub type SignUpResponse = TokenResponse;

pub struct SignUpUseCase {
    user_repo: Arc<dyn UserRepository>,
    token_service: Arc<dyn TokenService>,
    password_service: Arc<dyn PasswordHashingService>,
    access_token_expiry: i64,
}

impl SignUpUseCase {
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
    pub async fn execute(&self, req: SignUpRequest) -> Result<SignUpResponse, AppError> {
        let user = CreateUserUseCase::new(self.user_repo.clone(), self.password_service.clone())
            .execute(req)
            .await?;

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
