//! PPTX download handler.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use super::{ApiError, api_error};
use crate::export::{DEFAULT_FILE_NAME, PPTX_CONTENT_TYPE, PptxWriter};

use super::super::state::AppState;

/// Handle GET /api/export - download the deck as `presentation.pptx`.
pub async fn download(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    // Snapshot the deck; packaging happens off the lock.
    let deck = state.store.read().await.deck().clone();

    let bytes = tokio::task::spawn_blocking(move || PptxWriter::new().deck_to_bytes(&deck))
        .await
        .map_err(|e| api_error(crate::PresentifyError::Export(format!("task error: {}", e))))?
        .map_err(api_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, PPTX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DEFAULT_FILE_NAME),
            ),
        ],
        bytes,
    ))
}
