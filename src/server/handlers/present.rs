//! Presentation mode handlers.
//!
//! Locks are always taken store first, then presentation. Every request
//! resizes the presentation to the current deck before using it.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::{ApiError, api_error};
use crate::error::PresentifyError;
use crate::playback::{PlaybackCommand, Presentation, SlideFrame};

use super::super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PresentKeyBody {
    pub key: String,
}

/// Playback state after a request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentResponse {
    pub active: bool,
    pub command: Option<PlaybackCommand>,
    pub frame: Option<SlideFrame>,
}

fn not_presenting() -> ApiError {
    api_error(PresentifyError::InvalidRequest("no presentation running".to_string()))
}

/// Handle POST /api/present - start presenting from the first slide.
pub async fn start(State(state): State<Arc<AppState>>) -> Result<Json<PresentResponse>, ApiError> {
    let store = state.store.read().await;
    let deck = store.deck();
    if deck.is_empty() {
        return Err(api_error(PresentifyError::InvalidRequest(
            "cannot present an empty deck".to_string(),
        )));
    }
    let show = Presentation::new(deck.len());
    let frame = show.frame(deck);
    *state.presentation.write().await = Some(show);
    debug!(slides = deck.len(), "presentation started");
    Ok(Json(PresentResponse {
        active: true,
        command: None,
        frame,
    }))
}

/// Handle GET /api/present - the current slide frame.
pub async fn frame(State(state): State<Arc<AppState>>) -> Result<Json<PresentResponse>, ApiError> {
    let store = state.store.read().await;
    let mut presentation = state.presentation.write().await;
    let show = presentation.as_mut().ok_or_else(not_presenting)?;
    show.resize(store.deck().len());
    Ok(Json(PresentResponse {
        active: show.is_active(),
        command: None,
        frame: show.frame(store.deck()),
    }))
}

/// Handle POST /api/present/keys - navigation keys.
///
/// `Escape` ends the presentation; unknown keys leave it unchanged.
pub async fn key(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PresentKeyBody>,
) -> Result<Json<PresentResponse>, ApiError> {
    let store = state.store.read().await;
    let mut presentation = state.presentation.write().await;
    let show = presentation.as_mut().ok_or_else(not_presenting)?;
    // Slides may have been added or removed since the last request.
    show.resize(store.deck().len());
    let command = show.handle_key(&body.key);
    let response = PresentResponse {
        active: show.is_active(),
        command,
        frame: show.frame(store.deck()),
    };
    if !show.is_active() {
        *presentation = None;
    }
    Ok(Json(response))
}
