//! # Slide Deck Document Model
//!
//! An ordered list of [`Slide`]s, each holding an ordered list of
//! [`TextBox`]es. Every editing operation takes `&self` and returns a new
//! [`Deck`] snapshot; slides and text boxes the operation did not touch are
//! shared with the previous snapshot through `Arc`, so callers can detect
//! unchanged parts with `Arc::ptr_eq`.
//!
//! ```
//! use presentify::deck::{Deck, Position, Slide, Template, TextBox};
//!
//! let deck = Deck::new(vec![Slide::new(1, Template::Content)]);
//! let deck = deck
//!     .add_text_box(1, TextBox::new("a", "Hello", Position { x: 10.0, y: 20.0 }))
//!     .unwrap();
//! let moved = deck.move_text_box(1, "a", Position { x: 30.0, y: 40.0 }).unwrap();
//! assert_eq!(moved.slide(1).unwrap().text_boxes[0].position.x, 30.0);
//! assert_eq!(deck.slide(1).unwrap().text_boxes[0].position.x, 10.0);
//! ```

pub mod store;
pub mod style;
pub mod types;

pub use store::{DeckStore, KeyOutcome};
pub use style::{StyleEdit, TextStyle};
pub use types::*;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{PresentifyError, Result};

/// Body text of a slide created with "add slide".
pub const NEW_SLIDE_CONTENT: &str = "New Slide";

/// Content of a text box created by placement.
pub const NEW_TEXT_BOX_CONTENT: &str = "New text box";

/// Immutable deck snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    slides: Vec<Arc<Slide>>,
}

impl Deck {
    /// Build a deck from owned slides.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides: slides.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn slides(&self) -> &[Arc<Slide>] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, id: SlideId) -> Option<&Arc<Slide>> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: SlideId) -> bool {
        self.slide(id).is_some()
    }

    pub fn first_id(&self) -> Option<SlideId> {
        self.slides.first().map(|s| s.id)
    }

    /// Next free identifier: one past the largest in use.
    pub fn next_slide_id(&self) -> SlideId {
        self.slides.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    /// Check the identifier invariants: unique slide ids, and unique
    /// text-box ids within each slide.
    pub fn validate(&self) -> Result<()> {
        for (i, slide) in self.slides.iter().enumerate() {
            if self.slides[..i].iter().any(|s| s.id == slide.id) {
                return Err(PresentifyError::InvalidRequest(format!(
                    "duplicate slide id {}",
                    slide.id
                )));
            }
            for (j, tb) in slide.text_boxes.iter().enumerate() {
                if slide.text_boxes[..j].iter().any(|other| other.id == tb.id) {
                    return Err(PresentifyError::DuplicateTextBox {
                        slide: slide.id,
                        text_box: tb.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // SLIDE OPERATIONS
    // ========================================================================

    /// Append a blank content slide with the given animation.
    pub fn append_slide(&self, animation: Animation) -> (Deck, SlideId) {
        let id = self.next_slide_id();
        let slide = Slide::new(id, Template::Content)
            .with_content(NEW_SLIDE_CONTENT)
            .with_animation(animation);
        let mut slides = self.slides.clone();
        slides.push(Arc::new(slide));
        (Deck { slides }, id)
    }

    pub fn delete_slide(&self, id: SlideId) -> Result<Deck> {
        if !self.contains(id) {
            return Err(PresentifyError::SlideNotFound(id));
        }
        let slides = self
            .slides
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        Ok(Deck { slides })
    }

    /// Set the legacy body text.
    pub fn update_slide_content(&self, id: SlideId, content: &str) -> Result<Deck> {
        self.map_slide(id, |slide| {
            Ok(Slide {
                content: content.to_string(),
                ..slide.clone()
            })
        })
    }

    /// Set or clear the slide image reference.
    pub fn update_slide_image(&self, id: SlideId, image_url: Option<String>) -> Result<Deck> {
        self.map_slide(id, |slide| {
            Ok(Slide {
                image_url: image_url.filter(|url| !url.is_empty()),
                ..slide.clone()
            })
        })
    }

    pub fn update_slide_animation(&self, id: SlideId, animation: Animation) -> Result<Deck> {
        self.map_slide(id, |slide| {
            Ok(Slide {
                animation,
                ..slide.clone()
            })
        })
    }

    // ========================================================================
    // TEXT BOX OPERATIONS
    // ========================================================================

    /// Append a text box to a slide. The position is clamped into the canvas;
    /// a duplicate identifier is rejected.
    pub fn add_text_box(&self, slide_id: SlideId, text_box: TextBox) -> Result<Deck> {
        self.map_slide(slide_id, |slide| {
            if slide.has_text_box(&text_box.id) {
                return Err(PresentifyError::DuplicateTextBox {
                    slide: slide_id,
                    text_box: text_box.id.clone(),
                });
            }
            let mut next = slide.clone();
            next.text_boxes.push(Arc::new(TextBox {
                position: text_box.position.clamp(),
                ..text_box
            }));
            Ok(next)
        })
    }

    pub fn update_text_box_content(
        &self,
        slide_id: SlideId,
        text_box_id: &str,
        content: &str,
    ) -> Result<Deck> {
        self.map_text_box(slide_id, text_box_id, |tb| TextBox {
            content: content.to_string(),
            ..tb.clone()
        })
    }

    pub fn update_text_box_style(
        &self,
        slide_id: SlideId,
        text_box_id: &str,
        style: TextStyle,
    ) -> Result<Deck> {
        self.map_text_box(slide_id, text_box_id, |tb| TextBox {
            style: Some(style),
            ..tb.clone()
        })
    }

    pub fn update_text_box_animation(
        &self,
        slide_id: SlideId,
        text_box_id: &str,
        animation: Option<Animation>,
    ) -> Result<Deck> {
        self.map_text_box(slide_id, text_box_id, |tb| TextBox {
            animation,
            ..tb.clone()
        })
    }

    /// Reposition a text box. Only `x`/`y` change.
    pub fn move_text_box(
        &self,
        slide_id: SlideId,
        text_box_id: &str,
        position: Position,
    ) -> Result<Deck> {
        self.map_text_box(slide_id, text_box_id, |tb| TextBox {
            position: position.clamp(),
            ..tb.clone()
        })
    }

    pub fn delete_text_box(&self, slide_id: SlideId, text_box_id: &str) -> Result<Deck> {
        self.map_slide(slide_id, |slide| {
            if !slide.has_text_box(text_box_id) {
                return Err(text_box_not_found(slide_id, text_box_id));
            }
            let text_boxes = slide
                .text_boxes
                .iter()
                .filter(|tb| tb.id != text_box_id)
                .cloned()
                .collect();
            Ok(Slide {
                text_boxes,
                ..slide.clone()
            })
        })
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    /// Replace one slide, sharing every other slide with `self`.
    fn map_slide(
        &self,
        id: SlideId,
        f: impl FnOnce(&Slide) -> Result<Slide>,
    ) -> Result<Deck> {
        let index = self
            .slides
            .iter()
            .position(|s| s.id == id)
            .ok_or(PresentifyError::SlideNotFound(id))?;
        let replacement = f(&self.slides[index])?;
        let mut slides = self.slides.clone();
        slides[index] = Arc::new(replacement);
        Ok(Deck { slides })
    }

    /// Replace one text box, sharing every other slide and text box.
    fn map_text_box(
        &self,
        slide_id: SlideId,
        text_box_id: &str,
        f: impl FnOnce(&TextBox) -> TextBox,
    ) -> Result<Deck> {
        self.map_slide(slide_id, |slide| {
            let index = slide
                .text_boxes
                .iter()
                .position(|tb| tb.id == text_box_id)
                .ok_or_else(|| text_box_not_found(slide_id, text_box_id))?;
            let mut next = slide.clone();
            next.text_boxes[index] = Arc::new(f(&slide.text_boxes[index]));
            Ok(next)
        })
    }
}

fn text_box_not_found(slide: SlideId, text_box: &str) -> PresentifyError {
    PresentifyError::TextBoxNotFound {
        slide,
        text_box: text_box.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_deck() -> Deck {
        Deck::new(vec![
            Slide::new(1, Template::Title)
                .with_text_box(TextBox::new("title-1", "Deck", Position { x: 50.0, y: 40.0 })),
            Slide::new(2, Template::Content)
                .with_text_box(TextBox::new("title-2", "Intro", Position { x: 50.0, y: 15.0 }))
                .with_text_box(TextBox::new("content-2", "• a", Position { x: 10.0, y: 30.0 })),
        ])
    }

    #[test]
    fn test_next_slide_id() {
        assert_eq!(Deck::default().next_slide_id(), 1);
        let deck = Deck::new(vec![Slide::new(3, Template::Content), Slide::new(9, Template::Content)]);
        assert_eq!(deck.next_slide_id(), 10);
    }

    #[test]
    fn test_append_slide() {
        let deck = sample_deck();
        let (next, id) = deck.append_slide(Animation::Zoom);
        assert_eq!(id, 3);
        assert_eq!(next.len(), 3);
        let slide = next.slide(3).unwrap();
        assert_eq!(slide.content, NEW_SLIDE_CONTENT);
        assert_eq!(slide.template, Template::Content);
        assert!(slide.text_boxes.is_empty());
        assert_eq!(slide.animation, Animation::Zoom);
        assert!(Arc::ptr_eq(&deck.slides()[0], &next.slides()[0]));
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_delete_slide() {
        let deck = sample_deck();
        let next = deck.delete_slide(1).unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next.first_id(), Some(2));
        assert!(matches!(deck.delete_slide(42), Err(PresentifyError::SlideNotFound(42))));
    }

    #[test]
    fn test_update_slide_fields_share_other_slides() {
        let deck = sample_deck();
        let next = deck.update_slide_content(2, "Speaker notes").unwrap();
        assert_eq!(next.slide(2).unwrap().content, "Speaker notes");
        assert!(Arc::ptr_eq(&deck.slides()[0], &next.slides()[0]));
        assert!(Arc::ptr_eq(
            &deck.slide(2).unwrap().text_boxes[0],
            &next.slide(2).unwrap().text_boxes[0]
        ));

        let animated = next.update_slide_animation(1, Animation::Flip).unwrap();
        assert_eq!(animated.slide(1).unwrap().animation, Animation::Flip);

        let imaged = animated
            .update_slide_image(2, Some("https://img.example/a.jpg".into()))
            .unwrap();
        assert_eq!(
            imaged.slide(2).unwrap().image_url.as_deref(),
            Some("https://img.example/a.jpg")
        );
        let cleared = imaged.update_slide_image(2, Some(String::new())).unwrap();
        assert!(cleared.slide(2).unwrap().image_url.is_none());
    }

    #[test]
    fn test_add_text_box_rejects_duplicates_and_clamps() {
        let deck = sample_deck();
        let dup = deck.add_text_box(2, TextBox::new("title-2", "x", Position::default()));
        assert!(matches!(dup, Err(PresentifyError::DuplicateTextBox { slide: 2, .. })));

        let out_of_bounds = TextBox {
            id: "n".into(),
            content: "n".into(),
            position: Position { x: 140.0, y: -3.0 },
            animation: None,
            style: None,
        };
        let next = deck.add_text_box(2, out_of_bounds).unwrap();
        let tb = next.slide(2).unwrap().text_box("n").unwrap();
        assert_eq!(tb.position, Position { x: 100.0, y: 0.0 });
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_move_text_box_changes_only_position() {
        let deck = sample_deck()
            .update_text_box_style(2, "content-2", TextStyle::new(24, "#333"))
            .unwrap()
            .update_text_box_animation(2, "content-2", Some(Animation::SlideIn))
            .unwrap();
        let before = deck.slide(2).unwrap().text_box("content-2").unwrap().clone();
        let next = deck.move_text_box(2, "content-2", Position { x: 70.0, y: 80.0 }).unwrap();
        let after = next.slide(2).unwrap().text_box("content-2").unwrap();
        assert_eq!(after.position, Position { x: 70.0, y: 80.0 });
        assert_eq!(
            TextBox {
                position: before.position,
                ..(**after).clone()
            },
            *before
        );
        assert!(Arc::ptr_eq(
            &deck.slide(2).unwrap().text_boxes[0],
            &next.slide(2).unwrap().text_boxes[0]
        ));
    }

    #[test]
    fn test_update_text_box_content() {
        let deck = sample_deck();
        let next = deck.update_text_box_content(1, "title-1", "Renamed").unwrap();
        assert_eq!(next.slide(1).unwrap().text_boxes[0].content, "Renamed");
        let missing = deck.update_text_box_content(1, "ghost", "x");
        assert!(matches!(missing, Err(PresentifyError::TextBoxNotFound { .. })));
    }

    #[test]
    fn test_delete_text_box_removes_exactly_one() {
        let deck = sample_deck();
        let next = deck.delete_text_box(2, "title-2").unwrap();
        assert_eq!(next.slide(2).unwrap().text_boxes.len(), 1);
        assert_eq!(next.slide(2).unwrap().text_boxes[0].id, "content-2");
        assert!(Arc::ptr_eq(&deck.slides()[0], &next.slides()[0]));
        assert!(deck.delete_text_box(2, "title-2-missing").is_err());
    }

    #[test]
    fn test_validate_detects_duplicates() {
        let deck = Deck::new(vec![
            Slide::new(1, Template::Content)
                .with_text_box(TextBox::new("a", "", Position::default()))
                .with_text_box(TextBox::new("a", "", Position::default())),
        ]);
        assert!(deck.validate().is_err());
        let deck = Deck::new(vec![Slide::new(1, Template::Content), Slide::new(1, Template::Title)]);
        assert!(deck.validate().is_err());
        assert!(sample_deck().validate().is_ok());
    }

    #[test]
    fn test_deck_serializes_as_array() {
        let value = serde_json::to_value(sample_deck()).unwrap();
        assert!(value.is_array());
        assert_eq!(value[1]["textBoxes"][1]["id"], "content-2");
        let back: Deck = serde_json::from_value(value).unwrap();
        assert_eq!(back, sample_deck());
    }
}
