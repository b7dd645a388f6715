//! # Error Types
//!
//! This module defines error types used throughout the presentify library.

use thiserror::Error;

use crate::deck::SlideId;

/// Notice shown when the generation backend could not be reached or
/// returned something unreadable.
pub const GENERATION_FAILED_NOTICE: &str = "Failed to create presentation. Please try again.";

/// Main error type for presentify operations
#[derive(Debug, Error)]
pub enum PresentifyError {
    /// No slide with the given identifier exists in the deck
    #[error("Slide {0} not found")]
    SlideNotFound(SlideId),

    /// No text box with the given identifier exists on the slide
    #[error("Text box '{text_box}' not found on slide {slide}")]
    TextBoxNotFound { slide: SlideId, text_box: String },

    /// A text box with the same identifier already lives on the slide
    #[error("Text box '{text_box}' already exists on slide {slide}")]
    DuplicateTextBox { slide: SlideId, text_box: String },

    /// The editing store never removes its only slide
    #[error("Cannot delete the only slide in the deck")]
    LastSlide,

    /// Invalid user input (empty topic, unknown key, bad style value)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The generation backend answered with an `error` field
    #[error("Error: {0}")]
    Backend(String),

    /// The generation call failed (network error or unreadable payload)
    #[error("{GENERATION_FAILED_NOTICE} ({0})")]
    Generation(String),

    /// Presentation file could not be assembled
    #[error("Export error: {0}")]
    Export(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for PresentifyError {
    fn from(e: zip::result::ZipError) -> Self {
        PresentifyError::Export(e.to_string())
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PresentifyError>;
