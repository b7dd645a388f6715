//! Editing session state: the current deck snapshot plus selection.
//!
//! Every mutating method replaces the snapshot at most once. When an
//! operation fails the previous snapshot and selection stay in place.

use serde::Serialize;
use tracing::debug;

use super::{Animation, Deck, NEW_TEXT_BOX_CONTENT, Position, SlideId, StyleEdit, TextBox, TextStyle};
use crate::error::{PresentifyError, Result};

/// What a key press did in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum KeyOutcome {
    /// The selected text box was deleted.
    Deleted { text_box: String },
    /// The text-box selection was cleared.
    Deselected,
    /// Nothing to do for this key in the current state.
    Ignored,
}

/// Deck plus selection for one editing session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStore {
    slides: Deck,
    selected_slide: Option<SlideId>,
    selected_text_box: Option<String>,
}

impl DeckStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session on an existing deck, selecting its first slide.
    pub fn from_deck(deck: Deck) -> Self {
        let mut store = Self::new();
        store.replace_deck(deck);
        store
    }

    pub fn deck(&self) -> &Deck {
        &self.slides
    }

    pub fn selected_slide(&self) -> Option<SlideId> {
        self.selected_slide
    }

    pub fn selected_text_box(&self) -> Option<&str> {
        self.selected_text_box.as_deref()
    }

    // ========================================================================
    // SLIDES
    // ========================================================================

    /// Bulk-load a deck. Selection moves to the first slide (or none).
    pub fn replace_deck(&mut self, deck: Deck) {
        debug!(slides = deck.len(), "replacing deck");
        self.selected_slide = deck.first_id();
        self.selected_text_box = None;
        self.slides = deck;
    }

    /// Append a blank content slide with a random entrance animation.
    pub fn append_slide(&mut self) -> SlideId {
        self.append_slide_with(Animation::random())
    }

    pub fn append_slide_with(&mut self, animation: Animation) -> SlideId {
        let (deck, id) = self.slides.append_slide(animation);
        self.slides = deck;
        if self.selected_slide.is_none() {
            self.selected_slide = Some(id);
        }
        id
    }

    /// Delete a slide. The only remaining slide cannot be deleted. When the
    /// selected slide goes away, selection falls back to the first slide.
    pub fn delete_slide(&mut self, id: SlideId) -> Result<()> {
        if self.slides.len() == 1 && self.slides.contains(id) {
            return Err(PresentifyError::LastSlide);
        }
        let deck = self.slides.delete_slide(id)?;
        if self.selected_slide == Some(id) {
            self.selected_slide = deck.first_id();
            self.selected_text_box = None;
        }
        self.slides = deck;
        Ok(())
    }

    pub fn select_slide(&mut self, id: SlideId) -> Result<()> {
        if !self.slides.contains(id) {
            return Err(PresentifyError::SlideNotFound(id));
        }
        if self.selected_slide != Some(id) {
            self.selected_text_box = None;
        }
        self.selected_slide = Some(id);
        Ok(())
    }

    pub fn update_slide_content(&mut self, id: SlideId, content: &str) -> Result<()> {
        self.slides = self.slides.update_slide_content(id, content)?;
        Ok(())
    }

    pub fn update_slide_image(&mut self, id: SlideId, image_url: Option<String>) -> Result<()> {
        self.slides = self.slides.update_slide_image(id, image_url)?;
        Ok(())
    }

    pub fn update_slide_animation(&mut self, id: SlideId, animation: Animation) -> Result<()> {
        self.slides = self.slides.update_slide_animation(id, animation)?;
        Ok(())
    }

    // ========================================================================
    // TEXT BOXES
    // ========================================================================

    /// Add a text box, assigning it a random entrance animation.
    pub fn add_text_box(&mut self, slide_id: SlideId, text_box: TextBox) -> Result<()> {
        let text_box = text_box.with_animation(Animation::random());
        self.slides = self.slides.add_text_box(slide_id, text_box)?;
        Ok(())
    }

    /// Create a default text box at a canvas position and select it.
    ///
    /// Placement happens on the slide being edited, so the target slide
    /// becomes the selected slide. Returns the generated identifier.
    pub fn place_text_box(&mut self, slide_id: SlideId, position: Position) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let text_box =
            TextBox::new(id.clone(), NEW_TEXT_BOX_CONTENT, position).with_style(TextStyle::default());
        self.add_text_box(slide_id, text_box)?;
        self.selected_slide = Some(slide_id);
        self.selected_text_box = Some(id.clone());
        Ok(id)
    }

    /// Select a text box on the currently selected slide.
    pub fn select_text_box(&mut self, text_box_id: Option<&str>) -> Result<()> {
        let Some(id) = text_box_id else {
            self.selected_text_box = None;
            return Ok(());
        };
        let slide_id = self
            .selected_slide
            .ok_or_else(|| PresentifyError::InvalidRequest("no slide selected".to_string()))?;
        let slide = self
            .slides
            .slide(slide_id)
            .ok_or(PresentifyError::SlideNotFound(slide_id))?;
        if !slide.has_text_box(id) {
            return Err(PresentifyError::TextBoxNotFound {
                slide: slide_id,
                text_box: id.to_string(),
            });
        }
        self.selected_text_box = Some(id.to_string());
        Ok(())
    }

    pub fn update_text_box_content(
        &mut self,
        slide_id: SlideId,
        text_box_id: &str,
        content: &str,
    ) -> Result<()> {
        self.slides = self
            .slides
            .update_text_box_content(slide_id, text_box_id, content)?;
        Ok(())
    }

    pub fn update_text_box_style(
        &mut self,
        slide_id: SlideId,
        text_box_id: &str,
        style: TextStyle,
    ) -> Result<()> {
        self.slides = self
            .slides
            .update_text_box_style(slide_id, text_box_id, style)?;
        Ok(())
    }

    /// Apply a toolbar edit to a text box's style (default style if unset).
    pub fn edit_text_box_style(
        &mut self,
        slide_id: SlideId,
        text_box_id: &str,
        edit: &StyleEdit,
    ) -> Result<TextStyle> {
        let current = self
            .slides
            .slide(slide_id)
            .ok_or(PresentifyError::SlideNotFound(slide_id))?
            .text_box(text_box_id)
            .ok_or_else(|| PresentifyError::TextBoxNotFound {
                slide: slide_id,
                text_box: text_box_id.to_string(),
            })?
            .effective_style();
        let style = edit.apply(&current)?;
        self.update_text_box_style(slide_id, text_box_id, style.clone())?;
        Ok(style)
    }

    pub fn update_text_box_animation(
        &mut self,
        slide_id: SlideId,
        text_box_id: &str,
        animation: Option<Animation>,
    ) -> Result<()> {
        self.slides = self
            .slides
            .update_text_box_animation(slide_id, text_box_id, animation)?;
        Ok(())
    }

    pub fn move_text_box(
        &mut self,
        slide_id: SlideId,
        text_box_id: &str,
        position: Position,
    ) -> Result<()> {
        self.slides = self.slides.move_text_box(slide_id, text_box_id, position)?;
        Ok(())
    }

    pub fn delete_text_box(&mut self, slide_id: SlideId, text_box_id: &str) -> Result<()> {
        self.slides = self.slides.delete_text_box(slide_id, text_box_id)?;
        if self.selected_text_box.as_deref() == Some(text_box_id) {
            self.selected_text_box = None;
        }
        Ok(())
    }

    // ========================================================================
    // KEYBOARD
    // ========================================================================

    /// Editor keyboard shortcuts.
    ///
    /// `Delete`/`Backspace` removes the selected text box unless text is
    /// being edited; `Escape` clears the text-box selection.
    pub fn handle_key(&mut self, key: &str, editing_text: bool) -> Result<KeyOutcome> {
        let (Some(slide_id), Some(text_box)) = (self.selected_slide, self.selected_text_box.clone())
        else {
            return Ok(KeyOutcome::Ignored);
        };
        match key {
            "Delete" | "Backspace" if !editing_text => {
                self.delete_text_box(slide_id, &text_box)?;
                Ok(KeyOutcome::Deleted { text_box })
            }
            "Escape" => {
                self.selected_text_box = None;
                Ok(KeyOutcome::Deselected)
            }
            _ => Ok(KeyOutcome::Ignored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Slide, Template};

    fn store_with(ids: &[SlideId]) -> DeckStore {
        DeckStore::from_deck(Deck::new(
            ids.iter().map(|&id| Slide::new(id, Template::Content)).collect(),
        ))
    }

    #[test]
    fn test_replace_selects_first() {
        let store = store_with(&[4, 5]);
        assert_eq!(store.selected_slide(), Some(4));
        let empty = DeckStore::from_deck(Deck::default());
        assert_eq!(empty.selected_slide(), None);
    }

    #[test]
    fn test_delete_selected_falls_back_to_first() {
        let mut store = store_with(&[1, 2, 3]);
        store.select_slide(2).unwrap();
        store.delete_slide(2).unwrap();
        assert_eq!(store.selected_slide(), Some(1));

        store.select_slide(3).unwrap();
        store.delete_slide(1).unwrap();
        assert_eq!(store.selected_slide(), Some(3));
    }

    #[test]
    fn test_last_slide_is_kept() {
        let mut store = store_with(&[1]);
        assert!(matches!(store.delete_slide(1), Err(PresentifyError::LastSlide)));
        assert_eq!(store.deck().len(), 1);
        assert_eq!(store.selected_slide(), Some(1));
    }

    #[test]
    fn test_failed_operation_keeps_snapshot() {
        let mut store = store_with(&[1, 2]);
        let before = store.deck().clone();
        assert!(store.update_slide_content(9, "x").is_err());
        assert!(store.move_text_box(1, "missing", Position::default()).is_err());
        assert_eq!(store.deck(), &before);
    }

    #[test]
    fn test_place_text_box() {
        let mut store = store_with(&[1]);
        let id = store.place_text_box(1, Position { x: 150.0, y: 25.0 }).unwrap();
        assert_eq!(store.selected_text_box(), Some(id.as_str()));
        let tb = store.deck().slide(1).unwrap().text_box(&id).unwrap().clone();
        assert_eq!(tb.content, NEW_TEXT_BOX_CONTENT);
        assert_eq!(tb.position, Position { x: 100.0, y: 25.0 });
        assert_eq!(tb.style, Some(TextStyle::default()));
        assert!(tb.animation.is_some_and(|a| !a.is_none()));

        let second = store.place_text_box(1, Position::default()).unwrap();
        assert_ne!(id, second);
    }

    #[test]
    fn test_place_on_other_slide_moves_selection() {
        let mut store = store_with(&[1, 2]);
        assert_eq!(store.selected_slide(), Some(1));
        let id = store.place_text_box(2, Position::default()).unwrap();
        assert_eq!(store.selected_slide(), Some(2));
        assert_eq!(store.selected_text_box(), Some(id.as_str()));

        assert_eq!(
            store.handle_key("Delete", false).unwrap(),
            KeyOutcome::Deleted { text_box: id.clone() }
        );
        assert!(!store.deck().slide(2).unwrap().has_text_box(&id));
    }

    #[test]
    fn test_failed_placement_keeps_selection() {
        let mut store = store_with(&[1]);
        assert!(store.place_text_box(9, Position::default()).is_err());
        assert_eq!(store.selected_slide(), Some(1));
        assert_eq!(store.selected_text_box(), None);
    }

    #[test]
    fn test_edit_style_starts_from_default() {
        let mut store = store_with(&[1]);
        store
            .add_text_box(1, TextBox::new("a", "hi", Position::default()))
            .unwrap();
        let style = store.edit_text_box_style(1, "a", &StyleEdit::Grow).unwrap();
        assert_eq!(style.font_size, 18);
        let stored = store.deck().slide(1).unwrap().text_box("a").unwrap().style.clone();
        assert_eq!(stored, Some(style));
    }

    #[test]
    fn test_keyboard_delete_and_escape() {
        let mut store = store_with(&[1]);
        let id = store.place_text_box(1, Position::default()).unwrap();

        assert_eq!(store.handle_key("Backspace", true).unwrap(), KeyOutcome::Ignored);
        assert_eq!(
            store.handle_key("Delete", false).unwrap(),
            KeyOutcome::Deleted { text_box: id.clone() }
        );
        assert!(store.deck().slide(1).unwrap().text_boxes.is_empty());
        assert_eq!(store.selected_text_box(), None);

        let other = store.place_text_box(1, Position::default()).unwrap();
        assert_eq!(store.handle_key("Escape", false).unwrap(), KeyOutcome::Deselected);
        assert_eq!(store.selected_text_box(), None);
        assert!(store.deck().slide(1).unwrap().has_text_box(&other));
        assert_eq!(store.handle_key("Delete", false).unwrap(), KeyOutcome::Ignored);
    }

    #[test]
    fn test_select_text_box_requires_selected_slide() {
        let mut store = store_with(&[1, 2]);
        store
            .add_text_box(2, TextBox::new("b", "", Position::default()))
            .unwrap();
        assert!(store.select_text_box(Some("b")).is_err());
        store.select_slide(2).unwrap();
        store.select_text_box(Some("b")).unwrap();
        assert_eq!(store.selected_text_box(), Some("b"));
        store.select_slide(1).unwrap();
        assert_eq!(store.selected_text_box(), None);
    }
}
