use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::types::MovieId;

/// JSON request body whose rejections are reported as `ApiError`
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::unsupported_media_type(rejection.body_text()),
            _ => ApiError::invalid_json(rejection.body_text()),
        }
    }
}

/// Integer id segment of `/api/products/:id`.
///
/// A segment that is not an integer does not address any product, so it is
/// reported as 404 rather than a bad request.
#[derive(Debug, Clone, Copy)]
pub struct ProductId(pub MovieId);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<MovieId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(ProductId(id)),
            Err(_) => Err(ApiError::not_found(format!("no product at {}", parts.uri.path()))),
        }
    }
}
