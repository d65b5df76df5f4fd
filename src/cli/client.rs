use anyhow::{bail, Context};
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::database::models::Movie;
use crate::types::MovieId;

/// Thin HTTP client over the `/api/products` endpoints
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("movies-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/products/", self.base_url)
    }

    fn item_url(&self, id: MovieId) -> String {
        format!("{}/api/products/{}", self.base_url, id)
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Movie>> {
        let res = self.http.get(self.collection_url()).send().await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn get(&self, id: MovieId) -> anyhow::Result<Movie> {
        let res = self.http.get(self.item_url(id)).send().await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn create(&self, payload: &Value) -> anyhow::Result<Movie> {
        let res = self.http.post(self.collection_url()).json(payload).send().await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn update(&self, id: MovieId, payload: &Value) -> anyhow::Result<Movie> {
        let res = self.http.put(self.item_url(id)).json(payload).send().await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn delete(&self, id: MovieId) -> anyhow::Result<()> {
        let res = self.http.delete(self.item_url(id)).send().await?;
        check(res).await?;
        Ok(())
    }

    pub async fn health(&self) -> anyhow::Result<Value> {
        let res = self.http.get(format!("{}/health", self.base_url)).send().await?;
        // A degraded server still answers with a JSON report
        if res.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Ok(res.json().await?);
        }
        Ok(check(res).await?.json().await?)
    }
}

async fn check(res: Response) -> anyhow::Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.json::<Value>().await.unwrap_or(Value::Null);
    bail!("{} ({})", describe_error(&body), status)
}

/// Render an error body from the API as a single line.
pub fn describe_error(body: &Value) -> String {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    match body.as_object() {
        Some(fields) if !fields.is_empty() => fields
            .iter()
            .map(|(field, messages)| {
                let joined = messages
                    .as_array()
                    .map(|m| m.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(" "))
                    .unwrap_or_else(|| messages.to_string());
                format!("{}: {}", field, joined)
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => "request failed".to_string(),
    }
}
