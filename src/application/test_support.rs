use crate::domain::auth::TokenService;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::infrastructure::auth::JwtTokenService;
use crate::infrastructure::config::AuthConfig;
use crate::infrastructure::password::Argon2PasswordService;
use crate::infrastructure::repositories::memory::InMemoryUserRepository;
use std::sync::Arc;

pub const ACCESS_EXPIRY: i64 = 900;

pub struct Services {
    pub repo: Arc<InMemoryUserRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordHashingService>,
}

/// In-memory store, real JWT signing, and cheap Argon2 parameters
pub fn services() -> Services {
    let repo = Arc::new(InMemoryUserRepository::new());
    let config = AuthConfig::new("test-access", "test-refresh", ACCESS_EXPIRY, 604_800)
        .expect("valid test config");

    Services {
        user_repo: repo.clone(),
        repo,
        token_service: Arc::new(JwtTokenService::new(&config)),
        password_service: Arc::new(
            Argon2PasswordService::with_params(1024, 1, 1).expect("valid argon2 params"),
        ),
    }
}
