//! # Presentation Playback
//!
//! A bounded linear state machine over slide indices `0..N-1` plus the
//! declarative entrance cues a renderer needs to replay animations when a
//! slide becomes visible.
//!
//! ```
//! use presentify::playback::{PlaybackCommand, Presentation};
//!
//! let mut show = Presentation::new(3);
//! show.apply(PlaybackCommand::Next);
//! show.apply(PlaybackCommand::Next);
//! show.apply(PlaybackCommand::Next); // stays on the last slide
//! assert_eq!(show.current(), 2);
//! assert_eq!(show.counter(), "3 / 3");
//! ```

use serde::Serialize;

use crate::deck::{Animation, Deck, SlideId, Template};

/// Stagger between elements on title-template slides.
pub const TITLE_STAGGER_MS: u64 = 500;
/// Stagger between elements on content slides.
pub const CONTENT_STAGGER_MS: u64 = 300;
/// Delay before a content slide's image enters.
pub const IMAGE_DELAY_MS: u64 = 500;

/// A navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackCommand {
    Next,
    Previous,
    Exit,
    ToggleFullscreen,
}

impl PlaybackCommand {
    /// Map a keyboard key name to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "Space" | " " => Some(PlaybackCommand::Next),
            "ArrowLeft" => Some(PlaybackCommand::Previous),
            "Escape" => Some(PlaybackCommand::Exit),
            "f" | "F" => Some(PlaybackCommand::ToggleFullscreen),
            _ => None,
        }
    }
}

/// CSS class that plays an entrance animation, if any.
pub fn css_class(animation: Animation) -> Option<&'static str> {
    match animation {
        Animation::None => None,
        Animation::Fade => Some("animate-fade-in"),
        Animation::SlideIn => Some("animate-slide-in"),
        Animation::Zoom => Some("animate-zoom-in"),
        Animation::Bounce => Some("animate-bounce"),
        Animation::Rotate => Some("animate-rotate"),
        Animation::Flip => Some("animate-flip"),
        Animation::Shake => Some("animate-shake"),
    }
}

/// Playback length of an entrance animation.
pub fn duration_ms(animation: Animation) -> u64 {
    match animation {
        Animation::None => 0,
        Animation::Bounce => 1000,
        _ => 500,
    }
}

/// Which element a cue animates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CueTarget {
    TextBox { id: String },
    Image { url: String },
}

/// Entrance animation for one element of the visible slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntranceCue {
    pub target: CueTarget,
    pub animation: Animation,
    pub class: Option<&'static str>,
    pub delay_ms: u64,
    pub duration_ms: u64,
}

impl EntranceCue {
    fn new(target: CueTarget, animation: Animation, delay_ms: u64) -> Self {
        Self {
            target,
            animation,
            class: css_class(animation),
            delay_ms,
            duration_ms: duration_ms(animation),
        }
    }
}

/// Everything a renderer needs to show the current slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideFrame {
    pub index: usize,
    pub total: usize,
    pub counter: String,
    pub slide_id: SlideId,
    pub template: Template,
    pub slide_animation: Animation,
    pub cues: Vec<EntranceCue>,
    pub has_previous: bool,
    pub has_next: bool,
    pub fullscreen: bool,
}

/// Presentation mode state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    total: usize,
    current: usize,
    fullscreen: bool,
    active: bool,
}

impl Presentation {
    /// Start presenting a deck of `total` slides at the first slide.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            fullscreen: false,
            active: true,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// `"{current + 1} / {total}"`.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.current + 1, self.total)
    }

    /// Follow a deck that changed length while presenting.
    ///
    /// The current index is pulled back onto the last slide; an empty deck
    /// ends the presentation.
    pub fn resize(&mut self, total: usize) {
        self.total = total;
        if total == 0 {
            self.current = 0;
            self.active = false;
            self.fullscreen = false;
        } else if self.current >= total {
            self.current = total - 1;
        }
    }

    /// Apply a command. Returns whether the state changed.
    pub fn apply(&mut self, command: PlaybackCommand) -> bool {
        if !self.active {
            return false;
        }
        match command {
            PlaybackCommand::Next if self.has_next() => {
                self.current += 1;
                true
            }
            PlaybackCommand::Previous if self.has_previous() => {
                self.current -= 1;
                true
            }
            PlaybackCommand::Next | PlaybackCommand::Previous => false,
            PlaybackCommand::Exit => {
                self.active = false;
                self.fullscreen = false;
                true
            }
            PlaybackCommand::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                true
            }
        }
    }

    /// Handle a key press; unknown keys do nothing.
    pub fn handle_key(&mut self, key: &str) -> Option<PlaybackCommand> {
        let command = PlaybackCommand::from_key(key)?;
        self.apply(command);
        Some(command)
    }

    /// Build the frame for the current slide of `deck`.
    pub fn frame(&self, deck: &Deck) -> Option<SlideFrame> {
        if !self.active {
            return None;
        }
        let slide = deck.slides().get(self.current)?;
        let stagger = match slide.template {
            Template::Title => TITLE_STAGGER_MS,
            Template::Content => CONTENT_STAGGER_MS,
        };

        let mut cues: Vec<EntranceCue> = slide
            .text_boxes
            .iter()
            .enumerate()
            .map(|(i, tb)| {
                EntranceCue::new(
                    CueTarget::TextBox { id: tb.id.clone() },
                    tb.animation.unwrap_or_default(),
                    i as u64 * stagger,
                )
            })
            .collect();

        if slide.template == Template::Content
            && let Some(url) = &slide.image_url
        {
            cues.push(EntranceCue::new(
                CueTarget::Image { url: url.clone() },
                Animation::Fade,
                IMAGE_DELAY_MS,
            ));
        }

        Some(SlideFrame {
            index: self.current,
            total: deck.len(),
            counter: format!("{} / {}", self.current + 1, deck.len()),
            slide_id: slide.id,
            template: slide.template,
            slide_animation: slide.animation,
            cues,
            has_previous: self.has_previous(),
            has_next: self.current + 1 < deck.len(),
            fullscreen: self.fullscreen,
        })
    }
}
