pub mod models;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::env;
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let max_connections = env_or("DB_MAX_CONNECTIONS", 20);
    let min_connections = env_or("DB_MIN_CONNECTIONS", 5);
    let acquire_timeout_secs = env_or("DB_ACQUIRE_TIMEOUT_SECS", 3);
    let idle_timeout_secs = env_or("DB_IDLE_TIMEOUT_SECS", 600);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(idle_timeout_secs))
        .connect(database_url)
        .await
}
