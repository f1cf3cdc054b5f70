use crate::application::hashing::hash_secret;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{NewUser, UniqueField, User, UserRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 255, message = "Username must be 3 to 255 characters"))]
    #[schema(example = "alice", min_length = 3)]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    #[schema(example = "pw123", min_length = 5)]
    pub password: String,
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    #[schema(example = "Alice Liddell")]
    pub name: Option<String>,
}

/// Reject values another account already holds. Two independent lookups, then
/// the caller writes: concurrent requests can both pass, in which case the
/// schema's UNIQUE constraints stop the second insert.
pub async fn ensure_unique(
    repo: &Arc<dyn UserRepository>,
    username: Option<&str>,
    email: Option<&str>,
    exclude_id: Option<i64>,
) -> Result<(), AppError> {
    let username_taken = async {
        match username {
            Some(value) => {
                repo.exists_by_field(UniqueField::Username, value, exclude_id)
                    .await
            }
            None => Ok(false),
        }
    };
    let email_taken = async {
        match email {
            Some(value) => repo.exists_by_field(UniqueField::Email, value, exclude_id).await,
            None => Ok(false),
        }
    };

    let (username_taken, email_taken) = futures::try_join!(username_taken, email_taken)
        .map_err(AppError::DatabaseError)?;

    if username_taken {
        return Err(AppError::ValidationError(
            "Username already taken".to_string(),
        ));
    }
    if email_taken {
        return Err(AppError::ValidationError(
            "Email address is already taken".to_string(),
        ));
    }
    Ok(())
}

pub struct CreateUserUseCase {
    repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHashingService>,
}

impl CreateUserUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            repo,
            password_hasher,
        }
    }

    #[tracing::instrument(skip(self, req), fields(username = %req.username))]
    pub async fn execute(&self, req: CreateUserRequest) -> Result<User, AppError> {
        ensure_unique(&self.repo, Some(&req.username), Some(&req.email), None).await?;

        let password_hash = hash_secret(&self.password_hasher, &req.password).await?;

        let new_user = NewUser {
            username: req.username,
            email: req.email,
            name: req.name,
            password_hash,
        };

        let user = self
            .repo
            .create(new_user)
            .await
            .map_err(AppError::DatabaseError)?;

        tracing::info!(user_id = user.id, "user created");
        Ok(user)
    }
}
