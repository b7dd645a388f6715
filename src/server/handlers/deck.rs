//! Editing handlers: slides, text boxes, selection and keyboard.
//!
//! Each handler works on a copy of the session and commits it with a
//! single write, so a failed request leaves the session untouched.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, api_error};
use crate::deck::{Animation, Deck, DeckStore, KeyOutcome, Position, SlideId, StyleEdit, TextBox, TextStyle};
use crate::error::Result;
use crate::placement::{CanvasRect, PointerEvent};

use super::super::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBody {
    pub content: String,
    /// Replaces the image reference when present; `""` clears it.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlideAnimationBody {
    pub animation: Animation,
}

#[derive(Debug, Deserialize)]
pub struct TextBoxAnimationBody {
    #[serde(default)]
    pub animation: Option<Animation>,
}

#[derive(Debug, Deserialize)]
pub struct TextBoxContentBody {
    pub content: String,
}

/// A pointer event over the slide canvas.
#[derive(Debug, Deserialize)]
pub struct PointerBody {
    pub canvas: CanvasRect,
    pub pointer: PointerEvent,
}

#[derive(Debug, Deserialize)]
pub struct SelectBody {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyBody {
    pub key: String,
    /// True while a text box is in inline text-edit mode.
    #[serde(default)]
    pub editing_text: bool,
}

#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub id: T,
    pub session: DeckStore,
}

#[derive(Debug, Serialize)]
pub struct StyleResponse {
    pub style: TextStyle,
    pub session: DeckStore,
}

#[derive(Debug, Serialize)]
pub struct KeyResponse {
    #[serde(flatten)]
    pub outcome: KeyOutcome,
    pub session: DeckStore,
}

/// Run `edit` against a copy of the session and commit it on success.
async fn commit<T>(
    state: &AppState,
    edit: impl FnOnce(&mut DeckStore) -> Result<T>,
) -> std::result::Result<(T, DeckStore), ApiError> {
    let mut store = state.store.write().await;
    let mut next = store.clone();
    let value = edit(&mut next).map_err(api_error)?;
    *store = next.clone();
    Ok((value, next))
}

/// Handle GET /api/deck - current session snapshot.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<DeckStore> {
    Json(state.store.read().await.clone())
}

/// Handle PUT /api/deck - bulk-load a deck.
pub async fn replace(
    State(state): State<Arc<AppState>>,
    Json(deck): Json<Deck>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| {
        deck.validate()?;
        store.replace_deck(deck);
        Ok(())
    })
    .await?;
    Ok(Json(session))
}

/// Handle POST /api/slides - append a blank slide.
pub async fn append_slide(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<Created<SlideId>>, ApiError> {
    let (id, session) = commit(&state, |store| Ok(store.append_slide())).await?;
    Ok(Json(Created { id, session }))
}

/// Handle DELETE /api/slides/:id
pub async fn delete_slide(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SlideId>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| store.delete_slide(id)).await?;
    Ok(Json(session))
}

/// Handle POST /api/slides/:id/select
pub async fn select_slide(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SlideId>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| store.select_slide(id)).await?;
    Ok(Json(session))
}

/// Handle PUT /api/slides/:id/content - body text and optional image.
pub async fn update_slide_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SlideId>,
    Json(body): Json<ContentBody>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| {
        store.update_slide_content(id, &body.content)?;
        if let Some(url) = body.image_url {
            store.update_slide_image(id, Some(url))?;
        }
        Ok(())
    })
    .await?;
    Ok(Json(session))
}

/// Handle PUT /api/slides/:id/animation
pub async fn update_slide_animation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SlideId>,
    Json(body): Json<SlideAnimationBody>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| store.update_slide_animation(id, body.animation)).await?;
    Ok(Json(session))
}

/// Handle POST /api/slides/:id/text-boxes - add a fully specified text box.
pub async fn add_text_box(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SlideId>,
    Json(text_box): Json<TextBox>,
) -> std::result::Result<Json<Created<String>>, ApiError> {
    let text_box_id = text_box.id.clone();
    let ((), session) = commit(&state, |store| store.add_text_box(id, text_box)).await?;
    Ok(Json(Created {
        id: text_box_id,
        session,
    }))
}

/// Handle POST /api/slides/:id/text-boxes/place - click-to-create.
pub async fn place_text_box(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SlideId>,
    Json(body): Json<PointerBody>,
) -> std::result::Result<Json<Created<String>>, ApiError> {
    let position = body.canvas.click_position(body.pointer);
    let (text_box_id, session) = commit(&state, |store| store.place_text_box(id, position)).await?;
    Ok(Json(Created {
        id: text_box_id,
        session,
    }))
}

/// Handle PUT /api/slides/:id/text-boxes/:tb/content
pub async fn update_text_box_content(
    State(state): State<Arc<AppState>>,
    Path((id, tb)): Path<(SlideId, String)>,
    Json(body): Json<TextBoxContentBody>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| store.update_text_box_content(id, &tb, &body.content)).await?;
    Ok(Json(session))
}

/// Handle PUT /api/slides/:id/text-boxes/:tb/style - replace the style.
pub async fn update_text_box_style(
    State(state): State<Arc<AppState>>,
    Path((id, tb)): Path<(SlideId, String)>,
    Json(style): Json<TextStyle>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| store.update_text_box_style(id, &tb, style)).await?;
    Ok(Json(session))
}

/// Handle POST /api/slides/:id/text-boxes/:tb/style - apply a toolbar edit.
pub async fn edit_text_box_style(
    State(state): State<Arc<AppState>>,
    Path((id, tb)): Path<(SlideId, String)>,
    Json(edit): Json<StyleEdit>,
) -> std::result::Result<Json<StyleResponse>, ApiError> {
    let (style, session) = commit(&state, |store| store.edit_text_box_style(id, &tb, &edit)).await?;
    Ok(Json(StyleResponse { style, session }))
}

/// Handle PUT /api/slides/:id/text-boxes/:tb/animation
pub async fn update_text_box_animation(
    State(state): State<Arc<AppState>>,
    Path((id, tb)): Path<(SlideId, String)>,
    Json(body): Json<TextBoxAnimationBody>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) =
        commit(&state, |store| store.update_text_box_animation(id, &tb, body.animation)).await?;
    Ok(Json(session))
}

/// Handle PUT /api/slides/:id/text-boxes/:tb/position - move to a position.
pub async fn move_text_box(
    State(state): State<Arc<AppState>>,
    Path((id, tb)): Path<(SlideId, String)>,
    Json(position): Json<Position>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| store.move_text_box(id, &tb, position)).await?;
    Ok(Json(session))
}

/// Handle POST /api/slides/:id/text-boxes/:tb/drop - finish a drag.
pub async fn drop_text_box(
    State(state): State<Arc<AppState>>,
    Path((id, tb)): Path<(SlideId, String)>,
    Json(body): Json<PointerBody>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let position = body.canvas.drop_position(body.pointer);
    let ((), session) = commit(&state, |store| store.move_text_box(id, &tb, position)).await?;
    Ok(Json(session))
}

/// Handle DELETE /api/slides/:id/text-boxes/:tb
pub async fn delete_text_box(
    State(state): State<Arc<AppState>>,
    Path((id, tb)): Path<(SlideId, String)>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| store.delete_text_box(id, &tb)).await?;
    Ok(Json(session))
}

/// Handle POST /api/selection/text-box - select (or clear with `null`).
pub async fn select_text_box(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectBody>,
) -> std::result::Result<Json<DeckStore>, ApiError> {
    let ((), session) = commit(&state, |store| store.select_text_box(body.id.as_deref())).await?;
    Ok(Json(session))
}

/// Handle POST /api/keys - editor keyboard shortcuts.
pub async fn key(
    State(state): State<Arc<AppState>>,
    Json(body): Json<KeyBody>,
) -> std::result::Result<Json<KeyResponse>, ApiError> {
    let (outcome, session) = commit(&state, |store| store.handle_key(&body.key, body.editing_text)).await?;
    Ok(Json(KeyResponse { outcome, session }))
}
