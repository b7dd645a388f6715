//! Record types for the slide deck document model.
//!
//! All types derive `Serialize + Deserialize` so the same types back the
//! Rust API and the JSON API. Field names follow the editor's camelCase
//! wire format (`textBoxes`, `imageUrl`, `fontSize`).

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::style::TextStyle;

/// Slide identifier. Unique within a deck, assigned monotonically.
pub type SlideId = u32;

// ============================================================================
// ENUMS
// ============================================================================

/// Slide template kind, driving default text-box composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Centered title with optional subtitle.
    Title,
    /// Title plus body content.
    #[default]
    Content,
}

/// Named entrance animation.
///
/// `None` is a valid slide animation choice; random assignment only draws
/// from the seven entrance animations in [`Animation::ENTRANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Animation {
    #[default]
    None,
    Fade,
    SlideIn,
    Zoom,
    Bounce,
    Rotate,
    Flip,
    Shake,
}

impl Animation {
    /// Entrance animations eligible for random assignment.
    pub const ENTRANCE: [Animation; 7] = [
        Animation::Fade,
        Animation::SlideIn,
        Animation::Zoom,
        Animation::Bounce,
        Animation::Rotate,
        Animation::Flip,
        Animation::Shake,
    ];

    /// Every selectable animation, `none` first (editor dropdown order).
    pub const ALL: [Animation; 8] = [
        Animation::None,
        Animation::Fade,
        Animation::SlideIn,
        Animation::Zoom,
        Animation::Bounce,
        Animation::Rotate,
        Animation::Flip,
        Animation::Shake,
    ];

    /// Pick a random entrance animation.
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /// Pick a random entrance animation from the given generator.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ENTRANCE.choose(rng).unwrap_or(&Animation::Fade)
    }

    /// Wire name (`"slide-in"`, `"none"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Animation::None => "none",
            Animation::Fade => "fade",
            Animation::SlideIn => "slide-in",
            Animation::Zoom => "zoom",
            Animation::Bounce => "bounce",
            Animation::Rotate => "rotate",
            Animation::Flip => "flip",
            Animation::Shake => "shake",
        }
    }

    /// Parse a wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn is_none(self) -> bool {
        self == Animation::None
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

// ============================================================================
// POSITION
// ============================================================================

/// Percentage coordinates within the slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Lower bound of either axis.
    pub const MIN: f64 = 0.0;
    /// Upper bound of either axis.
    pub const MAX: f64 = 100.0;

    /// Build a position, clamping both axes into `[0, 100]`.
    ///
    /// Non-finite values collapse to 0.
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    /// Re-clamp an existing position.
    pub fn clamp(self) -> Self {
        Self::clamped(self.x, self.y)
    }

    pub fn is_within_canvas(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.x) && (Self::MIN..=Self::MAX).contains(&self.y)
    }
}

fn clamp_axis(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(Position::MIN, Position::MAX)
    } else {
        Position::MIN
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// A positioned, styled unit of text within a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

impl TextBox {
    /// Create an unstyled text box at the given (clamped) position.
    pub fn new(id: impl Into<String>, content: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            position: position.clamp(),
            animation: None,
            style: None,
        }
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// The box style, or the editor default when none was assigned.
    pub fn effective_style(&self) -> TextStyle {
        self.style.clone().unwrap_or_default()
    }
}

/// A single slide: template, legacy body text, text boxes and animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    /// Free-form body text (legacy field, exported as its own run).
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub text_boxes: Vec<Arc<TextBox>>,
    #[serde(default)]
    pub animation: Animation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(id: SlideId, template: Template) -> Self {
        Self {
            id,
            content: String::new(),
            template,
            text_boxes: Vec::new(),
            animation: Animation::None,
            image_url: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Append a text box while building a slide.
    pub fn with_text_box(mut self, text_box: TextBox) -> Self {
        self.text_boxes.push(Arc::new(text_box));
        self
    }

    pub fn text_box(&self, id: &str) -> Option<&Arc<TextBox>> {
        self.text_boxes.iter().find(|tb| tb.id == id)
    }

    pub fn has_text_box(&self, id: &str) -> bool {
        self.text_box(id).is_some()
    }
}
