//! Geometric primitives shared across the overlay.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
///
/// Raw captured rectangles are viewport-space at capture time; whether a
/// stored `Rect` is viewport-space or document-space is a property of the
/// record holding it, not of the type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same rectangle shifted vertically by `delta`.
    pub fn translated_y(self, delta: f64) -> Self {
        Self {
            y: self.y + delta,
            ..self
        }
    }
}

/// Computed CSS position of an element, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssPosition {
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl CssPosition {
    /// Whether an element with this position keeps its visual position while
    /// the document scrolls.
    pub fn is_scroll_exempt(self) -> bool {
        matches!(self, CssPosition::Fixed | CssPosition::Sticky)
    }
}

impl Default for CssPosition {
    fn default() -> Self {
        CssPosition::Static
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_y() {
        let rect = Rect::new(10.0, 200.0, 100.0, 50.0);
        let moved = rect.translated_y(-50.0);
        assert_eq!(moved.y, 150.0);
        assert_eq!(moved.x, 10.0);
        assert_eq!(moved.width, 100.0);
        assert_eq!(moved.height, 50.0);
    }

    #[test]
    fn test_scroll_exempt_positions() {
        assert!(CssPosition::Fixed.is_scroll_exempt());
        assert!(CssPosition::Sticky.is_scroll_exempt());
        assert!(!CssPosition::Static.is_scroll_exempt());
        assert!(!CssPosition::Relative.is_scroll_exempt());
        assert!(!CssPosition::Absolute.is_scroll_exempt());
    }
}
