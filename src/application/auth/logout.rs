use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Ends the user's session by dropping the stored refresh-token hash.
/// Access tokens already handed out stay valid until they expire.
pub struct LogoutUseCase {
    user_repo: Arc<dyn UserRepository>,
}

impl LogoutUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, user_id: i64) -> Result<(), AppError> {
        self.user_repo
            .clear_refresh_token_hash(user_id)
            .await
            .map_err(AppError::DatabaseError)?;

        tracing::info!("user logged out");
        Ok(())
    }
}
