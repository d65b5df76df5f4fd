use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movies_api::config::AppConfig;
use movies_api::database::DatabaseManager;
use movies_api::router;
use movies_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SQLALCHEMY_DATABASE_URI / DATABASE_URL
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "movies_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env().context("failed to read configuration")?;
    tracing::info!("Starting Movies API in {:?} mode", config.environment);

    let database = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    database.ensure_schema().await.context("failed to create schema")?;

    let bind_addr = config.bind_addr();
    let app = router::app(AppState::new(database.clone(), config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Movies API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
