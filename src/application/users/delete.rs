use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct DeleteUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl DeleteUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await.map_err(AppError::DatabaseError)?;
        if !deleted {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        tracing::info!("user deleted");
        Ok(())
    }
}
