//! # HTTP Server for Deck Editing
//!
//! Exposes the editing store, generation, presentation playback and PPTX
//! download as a JSON API.
//!
//! ## Usage
//!
//! ```bash
//! presentify serve --listen 127.0.0.1:8080 --backend http://127.0.0.1:5000/generate_ppt_data
//! ```
//!
//! Mutating endpoints answer with the full session snapshot
//! (`{slides, selectedSlide, selectedTextBox}`).

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;

/// Build the API router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Session
        .route("/api/deck", get(handlers::deck::get).put(handlers::deck::replace))
        .route("/api/generate", post(handlers::generate::generate))
        .route("/api/keys", post(handlers::deck::key))
        .route("/api/selection/text-box", post(handlers::deck::select_text_box))
        // Slides
        .route("/api/slides", post(handlers::deck::append_slide))
        .route("/api/slides/:id", delete(handlers::deck::delete_slide))
        .route("/api/slides/:id/select", post(handlers::deck::select_slide))
        .route("/api/slides/:id/content", put(handlers::deck::update_slide_content))
        .route("/api/slides/:id/animation", put(handlers::deck::update_slide_animation))
        // Text boxes
        .route("/api/slides/:id/text-boxes", post(handlers::deck::add_text_box))
        .route("/api/slides/:id/text-boxes/place", post(handlers::deck::place_text_box))
        .route(
            "/api/slides/:id/text-boxes/:tb",
            delete(handlers::deck::delete_text_box),
        )
        .route(
            "/api/slides/:id/text-boxes/:tb/content",
            put(handlers::deck::update_text_box_content),
        )
        .route(
            "/api/slides/:id/text-boxes/:tb/style",
            put(handlers::deck::update_text_box_style).post(handlers::deck::edit_text_box_style),
        )
        .route(
            "/api/slides/:id/text-boxes/:tb/animation",
            put(handlers::deck::update_text_box_animation),
        )
        .route(
            "/api/slides/:id/text-boxes/:tb/position",
            put(handlers::deck::move_text_box),
        )
        .route("/api/slides/:id/text-boxes/:tb/drop", post(handlers::deck::drop_text_box))
        // Presentation
        .route(
            "/api/present",
            get(handlers::present::frame).post(handlers::present::start),
        )
        .route("/api/present/keys", post(handlers::present::key))
        // Export
        .route("/api/export", get(handlers::export::download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use presentify::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), presentify::error::PresentifyError> {
/// serve(ServerConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::new(config.clone())?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to bind to {}: {}", config.listen_addr, e))
        })?;

    info!(listen = %config.listen_addr, backend = %config.backend_url, "presentify server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
