use axum::extract::State;
use tracing::{info, warn};

use crate::api::{describe, load_new_movie, load_patch, JsonBody, ProductId};
use crate::database::models::Movie;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/products/ - list every movie ordered by id
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Movie>> {
    let movies = state.movies.select_all().await?;
    Ok(ApiResponse::success(movies))
}

/// POST /api/products/ - validate the payload and insert a new movie
pub async fn create(State(state): State<AppState>, JsonBody(payload): JsonBody) -> ApiResult<Movie> {
    let new_movie = load_new_movie(&payload).map_err(|errors| {
        warn!("Rejected movie payload: {:?}", errors);
        ApiError::validation_error(errors)
    })?;

    let movie = state.movies.insert(&new_movie).await?;
    info!("Created movie {}", movie);
    Ok(ApiResponse::created(movie))
}

/// GET /api/products/:id
pub async fn show(State(state): State<AppState>, ProductId(id): ProductId) -> ApiResult<Movie> {
    let movie = state.movies.select_404(id).await?;
    Ok(ApiResponse::success(movie))
}

/// PUT /api/products/:id - overwrite only the fields present in the body
///
/// The row is looked up before the body is examined, so a missing id is a 404
/// whatever the payload.
pub async fn update(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    body: Result<JsonBody, ApiError>,
) -> ApiResult<Movie> {
    let mut movie = state.movies.select_404(id).await?;
    let JsonBody(payload) = body?;

    let patch = load_patch(&payload).map_err(|errors| {
        warn!("Rejected update for movie #{}: {:?}", id, errors);
        ApiError::invalid_json(format!("Invalid update payload: {}", describe(&errors)))
    })?;

    if patch.is_empty() {
        return Ok(ApiResponse::success(movie));
    }

    patch.apply(&mut movie);
    let movie = state.movies.update(&movie).await?;
    info!("Updated movie {}", movie);
    Ok(ApiResponse::success(movie))
}

/// DELETE /api/products/:id
pub async fn delete(State(state): State<AppState>, ProductId(id): ProductId) -> ApiResult<()> {
    state.movies.delete(id).await?;
    info!("Deleted movie #{}", id);
    Ok(ApiResponse::no_content())
}
