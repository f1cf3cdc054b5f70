use crate::domain::users::User;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct UserDbModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub refresh_token_hash: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<UserDbModel> for User {
    fn from(model: UserDbModel) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            name: model.name,
            password_hash: model.password_hash,
            refresh_token_hash: model.refresh_token_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
