use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - describe the service and its endpoints
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Movies API",
        "version": version,
        "description": "Movie inventory CRUD service",
        "environment": state.config.environment,
        "database": state.config.database.backend,
        "endpoints": {
            "health": "GET /health",
            "list": "GET /api/products/",
            "create": "POST /api/products/",
            "show": "GET /api/products/:id",
            "update": "PUT /api/products/:id",
            "delete": "DELETE /api/products/:id",
        }
    }))
}

/// GET /health - ping the backing store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.database.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
