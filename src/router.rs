use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{products, public};
use crate::state::AppState;

/// Build the full application router around an explicitly constructed state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(product_routes())
        // Global middleware
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn product_routes() -> Router<AppState> {
    Router::new()
        // Collection, served with and without the trailing slash
        .route("/api/products/", get(products::list).post(products::create))
        .route("/api/products", get(products::list).post(products::create))
        // Single product
        .route(
            "/api/products/:id",
            get(products::show).put(products::update).delete(products::delete),
        )
}
