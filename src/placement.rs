//! # Placement
//!
//! Pointer coordinates to percentage canvas coordinates, for placing new
//! text boxes and dropping dragged ones.

use serde::{Deserialize, Serialize};

use crate::deck::Position;

/// Inset applied on each side of the canvas when resolving a drop.
pub const DROP_CONTENT_PADDING: f64 = 40.0;

/// Slide canvas rectangle in client (pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A pointer location in client (pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl CanvasRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Position for a click that creates a text box.
    pub fn click_position(&self, pointer: PointerEvent) -> Position {
        Position::clamped(
            percent(pointer.client_x - self.left, self.width),
            percent(pointer.client_y - self.top, self.height),
        )
    }

    /// Position for a dropped text box, relative to the padded content area.
    pub fn drop_position(&self, pointer: PointerEvent) -> Position {
        self.inset(DROP_CONTENT_PADDING).click_position(pointer)
    }

    /// Shrink the rectangle by `padding` on every side.
    pub fn inset(&self, padding: f64) -> Self {
        Self {
            left: self.left + padding,
            top: self.top + padding,
            width: self.width - 2.0 * padding,
            height: self.height - 2.0 * padding,
        }
    }
}

/// `offset / extent * 100`; zero or negative extents map to 0.
fn percent(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        offset / extent * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> PointerEvent {
        PointerEvent {
            client_x: x,
            client_y: y,
        }
    }

    #[test]
    fn test_click_position() {
        let rect = CanvasRect::new(100.0, 50.0, 800.0, 450.0);
        assert_eq!(rect.click_position(at(500.0, 275.0)), Position { x: 50.0, y: 50.0 });
        assert_eq!(rect.click_position(at(100.0, 50.0)), Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_click_outside_is_clamped() {
        let rect = CanvasRect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(rect.click_position(at(-30.0, 500.0)), Position { x: 0.0, y: 100.0 });
    }

    #[test]
    fn test_drop_uses_padded_area() {
        let rect = CanvasRect::new(0.0, 0.0, 880.0, 480.0);
        // Content area is 800x400 starting at (40, 40).
        assert_eq!(rect.drop_position(at(440.0, 240.0)), Position { x: 50.0, y: 50.0 });
        assert_eq!(rect.drop_position(at(10.0, 10.0)), Position { x: 0.0, y: 0.0 });
        assert_eq!(rect.drop_position(at(870.0, 470.0)), Position { x: 100.0, y: 100.0 });
    }

    #[test]
    fn test_degenerate_canvas() {
        let rect = CanvasRect::new(0.0, 0.0, 0.0, 60.0);
        let pos = rect.click_position(at(10.0, 30.0));
        assert_eq!(pos, Position { x: 0.0, y: 50.0 });
        // Padding larger than the canvas leaves no content area.
        let pos = rect.drop_position(at(10.0, 30.0));
        assert!(pos.is_within_canvas());
        assert_eq!(pos.x, 0.0);
    }
}
