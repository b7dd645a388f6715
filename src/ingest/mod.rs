//! # Backend Ingestion
//!
//! Deserialize the generation backend's payload and normalize it into the
//! slide/text-box document model.
//!
//! ## Example
//!
//! ```
//! use presentify::ingest::GenerateResponse;
//!
//! let json = r#"{
//!     "slides": [
//!         {"layout": "title", "title": "Rust", "subtitle": "A tour"},
//!         {"layout": "content", "title": "Why", "content": ["Fast", "Safe"]}
//!     ]
//! }"#;
//!
//! let response: GenerateResponse = serde_json::from_str(json).unwrap();
//! let deck = response.into_deck().unwrap();
//! assert_eq!(deck.len(), 2);
//! assert_eq!(deck.slides()[1].text_boxes[1].content, "• Fast\n• Safe");
//! ```

mod convert;
mod schema;

pub use convert::{normalize_slide, normalize_slides};
pub use schema::{GenerateResponse, JsonContent, JsonPoint, JsonPositions, JsonSlide};
