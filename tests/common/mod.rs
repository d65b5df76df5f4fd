#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::task::JoinHandle;

use movies_api::config::{AppConfig, Environment};
use movies_api::database::DatabaseManager;
use movies_api::router;
use movies_api::state::AppState;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn products_url(&self) -> String {
        format!("{}/api/products/", self.base_url)
    }

    pub fn product_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/api/products/{}", self.base_url, id)
    }

    /// POST a payload and return (status, body)
    pub async fn create(&self, payload: &Value) -> Result<(reqwest::StatusCode, Value)> {
        let res = self.client.post(self.products_url()).json(payload).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        let res = self.client.get(self.products_url()).send().await?;
        anyhow::ensure!(res.status().is_success(), "list failed: {}", res.status());
        Ok(res.json().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start the real router on an unused port, backed by a fresh in-memory SQLite database.
pub async fn spawn_server() -> Result<TestServer> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let config = AppConfig::for_environment(Environment::Development, "sqlite::memory:")?;
    let database = DatabaseManager::connect(&config.database).await?;
    database.ensure_schema().await?;

    let app = router::app(AppState::new(database, config));
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    Ok(TestServer {
        port,
        base_url,
        client: reqwest::Client::new(),
        handle,
    })
}
