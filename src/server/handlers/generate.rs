//! Deck generation handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::{ApiError, api_error};
use crate::backend::{GenerateRequest, generate_deck, parse_slide_count};
use crate::deck::DeckStore;

use super::super::state::AppState;

/// Slide count as typed into the creation form, or as a number.
/// Either way it ends up clamped into the backend's range.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SlideCount {
    Number(u32),
    Text(String),
}

impl SlideCount {
    fn resolve(&self) -> u32 {
        match self {
            SlideCount::Number(n) => *n,
            SlideCount::Text(s) => parse_slide_count(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateForm {
    pub text: String,
    pub num_slides: SlideCount,
}

/// Handle POST /api/generate - replace the deck with generated slides.
///
/// The backend call runs without holding the session lock; the deck is
/// replaced only when generation succeeds.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(form): Json<GenerateForm>,
) -> Result<Json<DeckStore>, ApiError> {
    let request = GenerateRequest::new(form.text, form.num_slides.resolve()).map_err(api_error)?;
    let deck = generate_deck(state.generator.as_ref(), &request)
        .await
        .map_err(api_error)?;

    let mut store = state.store.write().await;
    store.replace_deck(deck);
    *state.presentation.write().await = None;
    info!(slides = store.deck().len(), topic = %request.text, "deck replaced by generation");
    Ok(Json(store.clone()))
}
