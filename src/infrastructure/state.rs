use crate::domain::auth::TokenService;
use crate::domain::authorization::{AccessPolicy, AllowAuthenticated};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::infrastructure::auth::JwtTokenService;
use crate::infrastructure::config::AuthConfig;
use crate::infrastructure::password::Argon2PasswordService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordHashingService>,
    pub access_policy: Arc<dyn AccessPolicy>,
    pub access_token_expiry: i64,
}

impl AppState {
    pub fn new(user_repo: Arc<dyn UserRepository>, auth: &AuthConfig) -> Self {
        Self {
            user_repo,
            token_service: Arc::new(JwtTokenService::new(auth)),
            password_service: Arc::new(Argon2PasswordService::new()),
            access_policy: Arc::new(AllowAuthenticated),
            access_token_expiry: auth.access_token_expiry,
        }
    }

    pub fn with_password_service(mut self, service: Arc<dyn PasswordHashingService>) -> Self {
        self.password_service = service;
        self
    }

    pub fn with_access_policy(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
        self.access_policy = policy;
        self
    }
}
