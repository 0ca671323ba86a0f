//! HTTP error mapping for store failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stafftrack_store::StoreError;

/// A store failure translated to an HTTP status and JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    category: String,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::AlreadyExists { .. } => StatusCode::CONFLICT,
            StoreError::InvalidRecord { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::Connection { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            category: err.category().to_string(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(
            status = %self.status.as_u16(),
            category = %self.category,
            "{}",
            self.message
        );
        let body = json!({
            "error": self.message,
            "category": self.category,
        });
        (self.status, Json(body)).into_response()
    }
}
