//! # Presentify - Slide Deck Editing Library
//!
//! Presentify turns a topic into an editable slide deck. It provides:
//!
//! - **Document model**: immutable deck snapshots with structural sharing
//! - **Ingestion**: normalization of AI-generated slide payloads
//! - **Playback**: bounded slide navigation with entrance-animation cues
//! - **Export**: PowerPoint (`.pptx`) packages
//!
//! ## Quick Start
//!
//! ```
//! use presentify::{
//!     deck::{DeckStore, Position, TextBox},
//!     export::PptxWriter,
//!     ingest::GenerateResponse,
//! };
//!
//! let payload = r#"{"slides": [
//!     {"layout": "title", "title": "Rust", "subtitle": "Fearless systems"},
//!     {"layout": "content", "title": "Why", "content": ["Fast", "Safe"]}
//! ]}"#;
//! let response: GenerateResponse = serde_json::from_str(payload)?;
//!
//! let mut store = DeckStore::from_deck(response.into_deck()?);
//! store.add_text_box(2, TextBox::new("note", "Q&A", Position { x: 70.0, y: 80.0 }))?;
//!
//! let bytes = PptxWriter::new().deck_to_bytes(store.deck())?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`deck`] | Slides, text boxes, styles and the editing store |
//! | [`ingest`] | Backend payload schema and normalization |
//! | [`backend`] | Generation backend client |
//! | [`placement`] | Pointer to canvas-percentage mapping |
//! | [`playback`] | Presentation mode state machine |
//! | [`export`] | PPTX serialization |
//! | [`server`] | HTTP JSON API |
//! | [`error`] | Error types |

pub mod backend;
pub mod deck;
pub mod error;
pub mod export;
pub mod ingest;
pub mod placement;
pub mod playback;
pub mod server;

// Re-exports for convenience
pub use deck::{Deck, DeckStore};
pub use error::PresentifyError;
