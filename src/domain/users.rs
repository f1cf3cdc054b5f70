use async_trait::async_trait;
use time::OffsetDateTime;

/// Stored account record. Carries credential material, so it is never
/// serialized directly; responses go through `UserResource`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub refresh_token_hash: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    /// `None` keeps the name, `Some(None)` clears it
    pub name: Option<Option<String>>,
    pub password_hash: Option<String>,
}

/// Columns that must be unique across all users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    pub fn column(&self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, anyhow::Error>;

    /// True when another user (anyone but `exclude_id`) already holds `value` in `field`
    async fn exists_by_field(
        &self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, anyhow::Error>;

    async fn update(&self, id: i64, update: UpdateUser) -> Result<Option<User>, anyhow::Error>;
    async fn update_refresh_token_hash(&self, id: i64, hash: &str) -> Result<(), anyhow::Error>;
    async fn clear_refresh_token_hash(&self, id: i64) -> Result<(), anyhow::Error>;
    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error>;

    /// Cheap round trip used by the health check
    async fn ping(&self) -> Result<(), anyhow::Error>;
}
