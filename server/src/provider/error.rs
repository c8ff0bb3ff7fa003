//! Provider API errors.
//!
//! The provider answers rejected requests with a bare `400 Bad Request`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed to parse or validate.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Failure injected through the simulation settings.
    #[error("Simulated failure")]
    Injected,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(error = %self, "Provider request rejected");
        StatusCode::BAD_REQUEST.into_response()
    }
}
