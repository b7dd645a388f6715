//! HTTP handlers for the server.

pub mod deck;
pub mod export;
pub mod generate;
pub mod present;

use axum::http::StatusCode;
use tracing::warn;

use crate::error::PresentifyError;

/// Error response: status plus the error message as body.
pub type ApiError = (StatusCode, String);

/// Map a library error to an HTTP error response.
pub fn api_error(e: PresentifyError) -> ApiError {
    let status = match &e {
        PresentifyError::SlideNotFound(_) | PresentifyError::TextBoxNotFound { .. } => StatusCode::NOT_FOUND,
        PresentifyError::DuplicateTextBox { .. } | PresentifyError::LastSlide => StatusCode::CONFLICT,
        PresentifyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        PresentifyError::Backend(_) | PresentifyError::Generation(_) => StatusCode::BAD_GATEWAY,
        PresentifyError::Export(_) | PresentifyError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        warn!(status = %status, error = %e, "request failed");
    }
    (status, e.to_string())
}
