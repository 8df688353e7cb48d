//! API response types.
//!
//! Success payloads are wrapped in a `data` envelope. Error bodies are
//! produced by `AppError`'s `IntoResponse` and carry an `error` object
//! with a stable code, so the two shapes never mix in one response.

use axum::{response::IntoResponse, response::Response, Json};
use serde::Serialize;

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload.
    pub const fn ok(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
