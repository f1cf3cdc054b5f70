use crate::domain::users::{NewUser, UniqueField, UpdateUser, User, UserRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::users::UserDbModel;
use async_trait::async_trait;

const USER_COLUMNS: &str =
    "id, username, email, name, password_hash, refresh_token_hash, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let query = format!(
            r#"
            INSERT INTO users (username, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, UserDbModel>(&query)
            .bind(new_user.username)
            .bind(new_user.email)
            .bind(new_user.name)
            .bind(new_user.password_hash)
            .fetch_one(&self.pool)
            .await?;

        Ok(user.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, UserDbModel>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, anyhow::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        let user = sqlx::query_as::<_, UserDbModel>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user.map(Into::into))
    }

    async fn exists_by_field(
        &self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, anyhow::Error> {
        // Column name comes from a closed enum, never from input
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM users WHERE {} = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
            field.column()
        );

        let exists: bool = sqlx::query_scalar(&query)
            .bind(value)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn update(&self, id: i64, update: UpdateUser) -> Result<Option<User>, anyhow::Error> {
        let query = format!(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                name = CASE WHEN $4 THEN $5 ELSE name END,
                password_hash = COALESCE($6, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, UserDbModel>(&query)
            .bind(id)
            .bind(update.username)
            .bind(update.email)
            .bind(update.name.is_some())
            .bind(update.name.flatten())
            .bind(update.password_hash)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user.map(Into::into))
    }

    async fn update_refresh_token_hash(&self, id: i64, hash: &str) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_refresh_token_hash(&self, id: i64) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), anyhow::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
