//! Conversion from backend payload types to the deck model.

use tracing::warn;

use crate::deck::{Animation, Deck, Position, Slide, SlideId, Template, TextBox, TextStyle};
use crate::error::{PresentifyError, Result};

use super::schema::*;

const BULLET: &str = "• ";

// Default placements (percent of canvas).
const TITLE_SLIDE_TITLE: (f64, f64) = (50.0, 40.0);
const TITLE_SLIDE_SUBTITLE: (f64, f64) = (50.0, 60.0);
const CONTENT_SLIDE_TITLE: (f64, f64) = (50.0, 15.0);
const CONTENT_SLIDE_BODY: (f64, f64) = (10.0, 30.0);

impl GenerateResponse {
    /// Normalize the payload into a deck.
    ///
    /// An `error` field aborts ingestion with that message. A payload with
    /// neither `slides` nor `error` is treated as a failed generation.
    pub fn into_deck(self) -> Result<Deck> {
        if let Some(error) = self.error {
            return Err(PresentifyError::Backend(error));
        }
        let slides = self.slides.ok_or_else(|| {
            PresentifyError::Generation("response carried neither slides nor error".to_string())
        })?;
        Ok(normalize_slides(&slides))
    }
}

impl JsonContent {
    /// Flatten bullet lists into `• item` lines.
    pub fn to_text(&self) -> String {
        match self {
            JsonContent::Bullets(points) => points
                .iter()
                .map(|p| format!("{}{}", BULLET, p))
                .collect::<Vec<_>>()
                .join("\n"),
            JsonContent::Text(text) => text.clone(),
        }
    }
}

impl JsonPoint {
    /// Resolve against default coordinates, axis by axis, clamped.
    fn resolve(point: Option<&JsonPoint>, default: (f64, f64)) -> Position {
        let x = point.and_then(|p| p.x).unwrap_or(default.0);
        let y = point.and_then(|p| p.y).unwrap_or(default.1);
        Position::clamped(x, y)
    }
}

/// Normalize every payload slide, in order. Slide ids are `index + 1`.
pub fn normalize_slides(slides: &[JsonSlide]) -> Deck {
    Deck::new(
        slides
            .iter()
            .enumerate()
            .map(|(index, slide)| normalize_slide(index as SlideId + 1, slide))
            .collect(),
    )
}

/// Normalize one payload slide into a [`Slide`] with the given id.
pub fn normalize_slide(id: SlideId, slide: &JsonSlide) -> Slide {
    let positions = slide.position.as_ref();
    let title = slide.title.clone().unwrap_or_else(|| {
        warn!(slide = id, "generated slide has no title");
        String::new()
    });

    match slide.layout.as_deref() {
        Some("title") => {
            let mut out = Slide::new(id, Template::Title)
                .with_animation(Animation::Fade)
                .with_text_box(
                    TextBox::new(
                        format!("title-{}", id),
                        title,
                        JsonPoint::resolve(positions.and_then(|p| p.title.as_ref()), TITLE_SLIDE_TITLE),
                    )
                    .with_animation(Animation::Fade)
                    .with_style(TextStyle::new(48, "#000").bold().center()),
                );
            if let Some(subtitle) = slide.subtitle.as_deref().filter(|s| !s.is_empty()) {
                out = out.with_text_box(
                    TextBox::new(
                        format!("subtitle-{}", id),
                        subtitle,
                        JsonPoint::resolve(
                            positions.and_then(|p| p.subtitle.as_ref()),
                            TITLE_SLIDE_SUBTITLE,
                        ),
                    )
                    .with_animation(Animation::SlideIn)
                    .with_style(TextStyle::new(28, "#666").center()),
                );
            }
            out
        }
        _ => {
            let body = slide
                .content
                .as_ref()
                .map(JsonContent::to_text)
                .unwrap_or_default();
            let mut out = Slide::new(id, Template::Content)
                .with_animation(Animation::Fade)
                .with_text_box(
                    TextBox::new(
                        format!("title-{}", id),
                        title,
                        JsonPoint::resolve(
                            positions.and_then(|p| p.title.as_ref()),
                            CONTENT_SLIDE_TITLE,
                        ),
                    )
                    .with_animation(Animation::Fade)
                    .with_style(TextStyle::new(36, "#000").bold()),
                )
                .with_text_box(
                    TextBox::new(
                        format!("content-{}", id),
                        body,
                        JsonPoint::resolve(
                            positions.and_then(|p| p.content.as_ref()),
                            CONTENT_SLIDE_BODY,
                        ),
                    )
                    .with_animation(Animation::SlideIn)
                    .with_style(TextStyle::new(24, "#333")),
                );
            if let Some(image) = slide.image.as_deref().filter(|s| !s.is_empty()) {
                out = out.with_image(image);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Alignment;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_title_slide_defaults() {
        let deck = parse(r#"{"slides": [{"layout": "title", "title": "Rust", "subtitle": "A tour"}]}"#)
            .into_deck()
            .unwrap();
        let slide = &deck.slides()[0];
        assert_eq!(slide.id, 1);
        assert_eq!(slide.template, Template::Title);
        assert_eq!(slide.animation, Animation::Fade);
        assert_eq!(slide.content, "");
        assert_eq!(slide.text_boxes.len(), 2);

        let title = &slide.text_boxes[0];
        assert_eq!(title.id, "title-1");
        assert_eq!(title.position, Position { x: 50.0, y: 40.0 });
        assert_eq!(title.animation, Some(Animation::Fade));
        let style = title.style.as_ref().unwrap();
        assert_eq!(style.font_size, 48);
        assert!(style.bold);
        assert_eq!(style.align, Alignment::Center);

        let subtitle = &slide.text_boxes[1];
        assert_eq!(subtitle.id, "subtitle-1");
        assert_eq!(subtitle.content, "A tour");
        assert_eq!(subtitle.position, Position { x: 50.0, y: 60.0 });
        assert_eq!(subtitle.animation, Some(Animation::SlideIn));
        assert_eq!(subtitle.style.as_ref().unwrap().color, "#666");
    }

    #[test]
    fn test_title_slide_without_subtitle() {
        let deck = parse(r#"{"slides": [{"layout": "title", "title": "Solo", "subtitle": ""}]}"#)
            .into_deck()
            .unwrap();
        assert_eq!(deck.slides()[0].text_boxes.len(), 1);
    }

    #[test]
    fn test_content_slide_bullets_and_image() {
        let deck = parse(
            r#"{"slides": [{"layout": "content", "title": "Why", "content": ["Fast", "Safe"],
                "image": "https://img.example/x.jpg", "imageKeyword": "speed"}]}"#,
        )
        .into_deck()
        .unwrap();
        let slide = &deck.slides()[0];
        assert_eq!(slide.template, Template::Content);
        assert_eq!(slide.image_url.as_deref(), Some("https://img.example/x.jpg"));
        assert_eq!(slide.text_boxes[0].id, "title-1");
        assert_eq!(slide.text_boxes[0].position, Position { x: 50.0, y: 15.0 });
        assert_eq!(slide.text_boxes[1].id, "content-1");
        assert_eq!(slide.text_boxes[1].content, "• Fast\n• Safe");
        assert_eq!(slide.text_boxes[1].position, Position { x: 10.0, y: 30.0 });
        assert_eq!(slide.text_boxes[1].style.as_ref().unwrap().font_size, 24);
    }

    #[test]
    fn test_string_content_and_unknown_layout() {
        let deck = parse(r#"{"slides": [{"layout": "two-column", "title": "T", "content": "plain"}]}"#)
            .into_deck()
            .unwrap();
        let slide = &deck.slides()[0];
        assert_eq!(slide.template, Template::Content);
        assert_eq!(slide.text_boxes[1].content, "plain");
        assert!(slide.image_url.is_none());
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let deck = parse(r#"{"slides": [{}]}"#).into_deck().unwrap();
        let slide = &deck.slides()[0];
        assert_eq!(slide.text_boxes.len(), 2);
        assert_eq!(slide.text_boxes[0].content, "");
        assert_eq!(slide.text_boxes[1].content, "");
    }

    #[test]
    fn test_explicit_positions_per_axis() {
        let deck = parse(
            r#"{"slides": [{"layout": "content", "title": "T", "content": [],
                "position": {"title": {"x": 20}, "content": {"x": 5, "y": 140}}}]}"#,
        )
        .into_deck()
        .unwrap();
        let slide = &deck.slides()[0];
        assert_eq!(slide.text_boxes[0].position, Position { x: 20.0, y: 15.0 });
        assert_eq!(slide.text_boxes[1].position, Position { x: 5.0, y: 100.0 });
    }

    #[test]
    fn test_error_payload() {
        let err = parse(r#"{"error": "No input text provided"}"#).into_deck().unwrap_err();
        assert!(matches!(err, PresentifyError::Backend(ref m) if m == "No input text provided"));
        assert_eq!(err.to_string(), "Error: No input text provided");
    }

    #[test]
    fn test_error_wins_over_slides() {
        let result = parse(r#"{"slides": [], "error": "quota"}"#).into_deck();
        assert!(matches!(result, Err(PresentifyError::Backend(_))));
    }

    #[test]
    fn test_empty_payload_is_a_generation_failure() {
        let result = parse("{}").into_deck();
        assert!(matches!(result, Err(PresentifyError::Generation(_))));
    }

    #[test]
    fn test_order_and_ids_preserved() {
        let deck = parse(
            r#"{"slides": [{"layout": "content", "title": "a"}, {"layout": "title", "title": "b"},
                {"layout": "content", "title": "c"}]}"#,
        )
        .into_deck()
        .unwrap();
        let titles: Vec<_> = deck
            .slides()
            .iter()
            .map(|s| (s.id, s.text_boxes[0].content.clone()))
            .collect();
        assert_eq!(
            titles,
            vec![(1, "a".to_string()), (2, "b".to_string()), (3, "c".to_string())]
        );
    }
}
