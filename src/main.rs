use warden::infrastructure::config::AppConfig;
use warden::infrastructure::repositories::users::PostgresUserRepository;
use warden::infrastructure::state::AppState;
use warden::infrastructure;
use warden::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Ignore the error: tests may initialise the subscriber more than once
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "warden=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!("invalid configuration: {}", e);
    })?;

    run(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run<F>(config: AppConfig, shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (listener, app) = bootstrap(&config).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn bootstrap(config: &AppConfig) -> anyhow::Result<(tokio::net::TcpListener, axum::Router)> {
    let pool = infrastructure::db::create_pool(&config.database_url).await?;

    sqlx::migrate!().run(&pool).await?;

    let state = AppState::new(Arc::new(PostgresUserRepository::new(pool)), &config.auth);
    let app = presentation::router::app(state, &config.http)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    Ok((listener, app))
}
