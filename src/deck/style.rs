//! Text styling record and the editing helpers behind the style toolbar.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::Alignment;
use crate::error::{PresentifyError, Result};

/// Font families offered by the editor.
pub const FONT_FAMILIES: &[&str] = &[
    "Arial",
    "Times New Roman",
    "Helvetica",
    "Georgia",
    "Verdana",
    "Courier New",
];

/// Font size presets offered by the editor, in pixels.
pub const FONT_SIZES: &[u32] = &[12, 14, 16, 18, 20, 24, 28, 32, 36, 48];

/// Smallest size the shrink button goes down to.
pub const MIN_FONT_SIZE: u32 = 12;

/// Pixels added or removed by grow/shrink.
pub const FONT_SIZE_STEP: u32 = 2;

/// Per-box text style.
///
/// `font_size` is in pixels and travels as `"48px"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(with = "font_size")]
    pub font_size: u32,
    pub font_family: String,
    pub color: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub align: Alignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: "Arial".to_string(),
            color: "#000000".to_string(),
            bold: false,
            italic: false,
            underline: false,
            align: Alignment::Left,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: u32, color: impl Into<String>) -> Self {
        Self {
            font_size,
            color: color.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn center(mut self) -> Self {
        self.align = Alignment::Center;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn font_size(mut self, px: u32) -> Self {
        self.font_size = px;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

}

/// One toolbar action against a text style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StyleEdit {
    FontFamily { value: String },
    FontSize {
        #[serde(with = "font_size")]
        value: u32,
    },
    Grow,
    Shrink,
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    Align { value: Alignment },
    Color { value: String },
    RandomColor,
}

impl StyleEdit {
    /// Apply the edit, producing a new style.
    pub fn apply(&self, style: &TextStyle) -> Result<TextStyle> {
        let mut next = style.clone();
        match self {
            StyleEdit::FontFamily { value } => {
                if !FONT_FAMILIES.contains(&value.as_str()) {
                    return Err(PresentifyError::InvalidRequest(format!(
                        "unknown font family \"{}\"",
                        value
                    )));
                }
                next.font_family = value.clone();
            }
            StyleEdit::FontSize { value } => {
                if !FONT_SIZES.contains(value) {
                    return Err(PresentifyError::InvalidRequest(format!(
                        "font size {}px is not one of the presets",
                        value
                    )));
                }
                next.font_size = *value;
            }
            StyleEdit::Grow => next.font_size = next.font_size.saturating_add(FONT_SIZE_STEP),
            StyleEdit::Shrink => {
                next.font_size = next
                    .font_size
                    .saturating_sub(FONT_SIZE_STEP)
                    .max(MIN_FONT_SIZE)
            }
            StyleEdit::ToggleBold => next.bold = !next.bold,
            StyleEdit::ToggleItalic => next.italic = !next.italic,
            StyleEdit::ToggleUnderline => next.underline = !next.underline,
            StyleEdit::Align { value } => next.align = *value,
            StyleEdit::Color { value } => {
                if parse_hex_color(value).is_none() {
                    return Err(PresentifyError::InvalidRequest(format!(
                        "expected \"#rgb\" or \"#rrggbb\" color, got \"{}\"",
                        value
                    )));
                }
                next.color = value.clone();
            }
            StyleEdit::RandomColor => next.color = random_color(&mut rand::rng()),
        }
        Ok(next)
    }
}

/// Random `#rrggbb` color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.random_range(0..=0xFF_FFFFu32))
}

/// Normalize `#rgb` / `#rrggbb` (hash optional) to upper-case `RRGGBB`.
pub fn parse_hex_color(color: &str) -> Option<String> {
    let hex = color.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(hex.to_ascii_uppercase()),
        3 => Some(
            hex.chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
        ),
        _ => None,
    }
}

/// Serde helpers for pixel font sizes: writes `"48px"`, reads `"48px"`,
/// `"48"` or `48`.
pub(crate) mod font_size {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(px: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}px", px))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum SizeValue {
            Number(u32),
            Css(String),
        }

        match SizeValue::deserialize(deserializer)? {
            SizeValue::Number(n) => Ok(n),
            SizeValue::Css(s) => parse_px(&s).ok_or_else(|| {
                serde::de::Error::custom(format!("expected a pixel size like \"24px\", got \"{}\"", s))
            }),
        }
    }

    /// Leading-integer parse, so `"24px"` and `"24.5px"` both read as 24.
    pub fn parse_px(s: &str) -> Option<u32> {
        let digits: String = s
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_style() {
        let style = TextStyle::default();
        assert_eq!(style.font_size, 16);
        assert_eq!(style.font_family, "Arial");
        assert_eq!(style.color, "#000000");
        assert_eq!(style.align, Alignment::Left);
        assert!(!style.bold && !style.italic && !style.underline);
    }

    #[test]
    fn test_font_size_wire_format() {
        let style = TextStyle::new(48, "#000").bold().center();
        let value = serde_json::to_value(&style).unwrap();
        assert_eq!(value["fontSize"], "48px");
        assert_eq!(value["fontFamily"], "Arial");
        assert_eq!(value["align"], "center");

        let numeric: TextStyle = serde_json::from_str(
            r##"{"fontSize": 20, "fontFamily": "Georgia", "color": "#333"}"##,
        )
        .unwrap();
        assert_eq!(numeric.font_size, 20);

        let bad = serde_json::from_str::<TextStyle>(
            r##"{"fontSize": "large", "fontFamily": "Georgia", "color": "#333"}"##,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_grow_and_shrink() {
        let style = TextStyle::default().font_size(13);
        let grown = StyleEdit::Grow.apply(&style).unwrap();
        assert_eq!(grown.font_size, 15);
        let shrunk = StyleEdit::Shrink.apply(&style).unwrap();
        assert_eq!(shrunk.font_size, MIN_FONT_SIZE);
        let floor = StyleEdit::Shrink.apply(&shrunk).unwrap();
        assert_eq!(floor.font_size, MIN_FONT_SIZE);
    }

    #[test]
    fn test_toggles_only_touch_their_flag() {
        let style = TextStyle::default();
        let bold = StyleEdit::ToggleBold.apply(&style).unwrap();
        assert_eq!(bold, TextStyle { bold: true, ..style.clone() });
        let back = StyleEdit::ToggleBold.apply(&bold).unwrap();
        assert_eq!(back, style);
        let underline = StyleEdit::ToggleUnderline.apply(&style).unwrap();
        assert!(underline.underline && !underline.italic);
    }

    #[test]
    fn test_style_edit_json() {
        let edit: StyleEdit =
            serde_json::from_str(r#"{"action": "align", "value": "right"}"#).unwrap();
        assert_eq!(edit, StyleEdit::Align { value: Alignment::Right });
        let edit: StyleEdit =
            serde_json::from_str(r#"{"action": "font_size", "value": "28px"}"#).unwrap();
        assert_eq!(edit, StyleEdit::FontSize { value: 28 });
    }

    #[test]
    fn test_toolbar_choices_are_validated() {
        let style = TextStyle::default();
        let georgia = StyleEdit::FontFamily { value: "Georgia".into() }.apply(&style).unwrap();
        assert_eq!(georgia.font_family, "Georgia");
        for bad in ["Comic Sans", "arial", ""] {
            assert!(StyleEdit::FontFamily { value: bad.into() }.apply(&style).is_err(), "{:?}", bad);
        }

        let big = StyleEdit::FontSize { value: 48 }.apply(&style).unwrap();
        assert_eq!(big.font_size, 48);
        assert!(StyleEdit::FontSize { value: 0 }.apply(&style).is_err());
        assert!(StyleEdit::FontSize { value: 17 }.apply(&style).is_err());
        // Grow/shrink may leave the presets.
        assert_eq!(StyleEdit::Grow.apply(&big).unwrap().font_size, 50);
    }

    #[test]
    fn test_color_validation() {
        let style = TextStyle::default();
        assert!(StyleEdit::Color { value: "#abc".into() }.apply(&style).is_ok());
        assert!(StyleEdit::Color { value: "blue".into() }.apply(&style).is_err());
        let random = StyleEdit::RandomColor.apply(&style).unwrap();
        assert_eq!(random.color.len(), 7);
        assert!(parse_hex_color(&random.color).is_some());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#000").as_deref(), Some("000000"));
        assert_eq!(parse_hex_color("#6a6").as_deref(), Some("66AA66"));
        assert_eq!(parse_hex_color("333333").as_deref(), Some("333333"));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(font_size::parse_px("24px"), Some(24));
        assert_eq!(font_size::parse_px(" 18 "), Some(18));
        assert_eq!(font_size::parse_px("px"), None);
    }
}
