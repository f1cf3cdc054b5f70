use crate::domain::users::{NewUser, UniqueField, UpdateUser, User, UserRepository};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use time::OffsetDateTime;

#[derive(Default)]
struct Store {
    users: Vec<User>,
    last_id: i64,
}

/// Process-local user store. Mirrors the schema's unique constraints so that
/// tests see the same failures Postgres would produce.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, anyhow::Error> {
        self.store
            .lock()
            .map_err(|_| anyhow::anyhow!("user store lock poisoned"))
    }
}

fn holds(user: &User, field: UniqueField, value: &str) -> bool {
    match field {
        UniqueField::Username => user.username == value,
        UniqueField::Email => user.email == value,
    }
}

fn check_unique(
    users: &[User],
    field: UniqueField,
    value: &str,
    exclude_id: Option<i64>,
) -> Result<(), anyhow::Error> {
    if users
        .iter()
        .any(|u| Some(u.id) != exclude_id && holds(u, field, value))
    {
        anyhow::bail!(
            "duplicate key value violates unique constraint \"users_{}_key\"",
            field.column()
        );
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let mut store = self.lock()?;
        check_unique(&store.users, UniqueField::Username, &new_user.username, None)?;
        check_unique(&store.users, UniqueField::Email, &new_user.email, None)?;

        store.last_id += 1;
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: store.last_id,
            username: new_user.username,
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
        };
        store.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error> {
        let store = self.lock()?;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, anyhow::Error> {
        let store = self.lock()?;
        Ok(store.users.iter().find(|u| u.username == username).cloned())
    }

    async fn exists_by_field(
        &self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, anyhow::Error> {
        let store = self.lock()?;
        Ok(store
            .users
            .iter()
            .any(|u| Some(u.id) != exclude_id && holds(u, field, value)))
    }

    async fn update(&self, id: i64, update: UpdateUser) -> Result<Option<User>, anyhow::Error> {
        let mut store = self.lock()?;
        if let Some(username) = &update.username {
            check_unique(&store.users, UniqueField::Username, username, Some(id))?;
        }
        if let Some(email) = &update.email {
            check_unique(&store.users, UniqueField::Email, email, Some(id))?;
        }

        let Some(user) = store.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = OffsetDateTime::now_utc();
        Ok(Some(user.clone()))
    }

    async fn update_refresh_token_hash(&self, id: i64, hash: &str) -> Result<(), anyhow::Error> {
        let mut store = self.lock()?;
        if let Some(user) = store.users.iter_mut().find(|u| u.id == id) {
            user.refresh_token_hash = Some(hash.to_string());
            user.updated_at = OffsetDateTime::now_utc();
        }
        Ok(())
    }

    async fn clear_refresh_token_hash(&self, id: i64) -> Result<(), anyhow::Error> {
        let mut store = self.lock()?;
        if let Some(user) = store.users.iter_mut().find(|u| u.id == id) {
            user.refresh_token_hash = None;
            user.updated_at = OffsetDateTime::now_utc();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error> {
        let mut store = self.lock()?;
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        Ok(store.users.len() < before)
    }

    async fn ping(&self) -> Result<(), anyhow::Error> {
        self.lock().map(|_| ())
    }
}
