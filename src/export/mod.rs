//! # PPTX Export
//!
//! A one-way, stateless transform: the deck is first normalized into a list
//! of [`ExportSlide`]s (one text run per text box, geometry in EMUs, styles
//! as PowerPoint run properties), then written as an Office Open XML
//! presentation package by [`PptxWriter`].
//!
//! Text sizes are exported as the style's pixel number used as points, so
//! exported text renders larger than in the editor preview.
//!
//! Text-box positions are canvas percentages and map onto the full slide:
//! 100% across is 10in, 100% down is 5.625in. They are not hundredths of
//! an inch, so boxes land where the editor canvas shows them.
//!
//! ```
//! use presentify::deck::{Deck, Position, Slide, Template, TextBox};
//! use presentify::export::normalize;
//!
//! let deck = Deck::new(vec![
//!     Slide::new(1, Template::Content).with_text_box(TextBox::new("a", "Hi", Position { x: 50.0, y: 50.0 })),
//! ]);
//! let slides = normalize(&deck);
//! assert_eq!(slides[0].runs.len(), 1);
//! assert_eq!(slides[0].runs[0].x, 4_572_000);
//! ```

mod pptx;
mod template;

pub use pptx::{DEFAULT_FILE_NAME, PPTX_CONTENT_TYPE, PptxWriter};

use crate::deck::{Alignment, Deck, Slide, Template, TextBox, style::parse_hex_color};

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;
/// 16:9 slide width (10in).
pub const SLIDE_WIDTH_EMU: i64 = 10 * EMU_PER_INCH;
/// 16:9 slide height (5.625in).
pub const SLIDE_HEIGHT_EMU: i64 = 5_143_500;

/// Text-box run width as a share of the slide.
const TEXT_BOX_WIDTH: f64 = 0.20;
/// Text-box run height as a share of the slide.
const TEXT_BOX_HEIGHT: f64 = 0.10;

/// Horizontal alignment in PowerPoint's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAlign {
    Left,
    Center,
    Right,
}

impl RunAlign {
    /// `algn` attribute value.
    pub fn code(self) -> &'static str {
        match self {
            RunAlign::Left => "l",
            RunAlign::Center => "ctr",
            RunAlign::Right => "r",
        }
    }
}

impl From<Alignment> for RunAlign {
    fn from(align: Alignment) -> Self {
        match align {
            Alignment::Left => RunAlign::Left,
            Alignment::Center => RunAlign::Center,
            Alignment::Right => RunAlign::Right,
        }
    }
}

/// One positioned text run on an exported slide.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    /// Font size in points.
    pub font_size: u32,
    pub font_face: Option<String>,
    /// `RRGGBB`, when the source color parsed.
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: RunAlign,
}

/// A normalized slide handed to the file writer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportSlide {
    pub runs: Vec<TextRun>,
}

/// Normalize a deck into export slides, one per deck slide.
pub fn normalize(deck: &Deck) -> Vec<ExportSlide> {
    deck.slides().iter().map(|s| normalize_slide(s)).collect()
}

fn normalize_slide(slide: &Slide) -> ExportSlide {
    let mut runs = Vec::with_capacity(slide.text_boxes.len() + 1);
    if let Some(body) = body_run(slide) {
        runs.push(body);
    }
    runs.extend(slide.text_boxes.iter().map(|tb| text_box_run(tb)));
    ExportSlide { runs }
}

/// The legacy body text, placed by template.
fn body_run(slide: &Slide) -> Option<TextRun> {
    if slide.content.is_empty() {
        return None;
    }
    let inch_tenth = EMU_PER_INCH / 10;
    let run = match slide.template {
        Template::Title => TextRun {
            text: slide.content.clone(),
            x: inch_tenth,
            y: 4 * inch_tenth,
            width: share(SLIDE_WIDTH_EMU, 0.8),
            height: share(SLIDE_HEIGHT_EMU, 0.2),
            font_size: 44,
            font_face: None,
            color: None,
            bold: true,
            italic: false,
            underline: false,
            align: RunAlign::Center,
        },
        Template::Content => TextRun {
            text: slide.content.clone(),
            x: inch_tenth,
            y: inch_tenth,
            width: share(SLIDE_WIDTH_EMU, 0.8),
            height: share(SLIDE_HEIGHT_EMU, 0.8),
            font_size: 18,
            font_face: None,
            color: None,
            bold: false,
            italic: false,
            underline: false,
            align: RunAlign::Left,
        },
    };
    Some(run)
}

fn text_box_run(text_box: &TextBox) -> TextRun {
    let style = text_box.effective_style();
    let position = text_box.position.clamp();
    TextRun {
        text: text_box.content.clone(),
        x: share(SLIDE_WIDTH_EMU, position.x / 100.0),
        y: share(SLIDE_HEIGHT_EMU, position.y / 100.0),
        width: share(SLIDE_WIDTH_EMU, TEXT_BOX_WIDTH),
        height: share(SLIDE_HEIGHT_EMU, TEXT_BOX_HEIGHT),
        font_size: style.font_size,
        font_face: Some(style.font_family),
        color: parse_hex_color(&style.color),
        bold: style.bold,
        italic: style.italic,
        underline: style.underline,
        align: style.align.into(),
    }
}

fn share(total: i64, fraction: f64) -> i64 {
    (total as f64 * fraction).round() as i64
}
