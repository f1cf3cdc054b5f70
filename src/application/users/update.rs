use crate::application::hashing::hash_secret;
use crate::application::users::create::ensure_unique;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{UpdateUser, User, UserRepository};
use crate::shared::error::AppError;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 255, message = "Username must be 3 to 255 characters"))]
    #[schema(example = "alice_updated", min_length = 3)]
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.org")]
    pub email: Option<String>,
    /// Omit to keep the current name, send `null` to clear it
    #[serde(default, deserialize_with = "present_or_null")]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    #[schema(value_type = Option<String>, nullable, example = "Alice Liddell")]
    pub name: Option<Option<String>>,
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    #[schema(example = "newpassword123", min_length = 5)]
    pub password: Option<String>,
}

/// A present key, even `null`, becomes `Some`; `default` covers the absent key
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

pub struct UpdateUserUseCase {
    repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHashingService>,
}

impl UpdateUserUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            repo,
            password_hasher,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, id: i64, req: UpdateUserRequest) -> Result<User, AppError> {
        ensure_unique(
            &self.repo,
            req.username.as_deref(),
            req.email.as_deref(),
            Some(id),
        )
        .await?;

        let password_hash = match req.password.as_deref() {
            Some(password) => Some(hash_secret(&self.password_hasher, password).await?),
            None => None,
        };

        let update = UpdateUser {
            username: req.username,
            email: req.email,
            name: req.name,
            password_hash,
        };

        self.repo
            .update(id, update)
            .await
            .map_err(AppError::DatabaseError)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
