//! Viewport/document coordinate translation.
//!
//! Two frames are in play: viewport-space (moves with scroll) and
//! document-space (scroll-invariant). Raw captured rectangles are
//! viewport-space at capture time; the two frames drift apart as the user
//! scrolls, by exactly the difference in scroll offsets.

use std::sync::Arc;

use pagelens_protocols::{ElementHandle, ElementRef, Rect, WeakElementRef};

/// Whether `element` keeps its visual position while the document scrolls.
///
/// Walks the element and its ancestors up to, excluding, the root; any
/// `fixed` or `sticky` computed position on the way makes the whole subtree
/// scroll-exempt.
pub fn is_scroll_exempt(element: &ElementRef) -> bool {
    let mut current = Some(Arc::clone(element));
    while let Some(el) = current {
        if el.is_root() {
            break;
        }
        if el.css_position().is_scroll_exempt() {
            return true;
        }
        current = el.parent();
    }
    false
}

/// Project a rectangle captured at `capture_scroll_y` into the viewport at
/// `current_scroll_y`.
///
/// Scroll-exempt rectangles come back unchanged: a fixed or sticky element's
/// visual position does not move with scroll.
pub fn project(rect: Rect, capture_scroll_y: f64, current_scroll_y: f64, exempt: bool) -> Rect {
    if exempt {
        rect
    } else {
        rect.translated_y(capture_scroll_y - current_scroll_y)
    }
}

/// Live viewport rectangle of a possibly-stale element reference.
///
/// `None` when the reference is absent, dropped, detached, or the host no
/// longer reports geometry for it.
pub fn live_rect(element: Option<&WeakElementRef>) -> Option<Rect> {
    let el = element?.upgrade()?;
    if !el.is_connected() {
        return None;
    }
    el.bounding_rect()
}

/// Best-known current rectangle for a shift source.
///
/// A still-attached element's measured rectangle is ground truth; arithmetic
/// projection of the captured rectangle is the fallback for stale or absent
/// references. The returned flag is true when the rectangle came from a live
/// measurement.
pub fn resolve_current_rect(
    element: Option<&WeakElementRef>,
    captured: Rect,
    capture_scroll_y: f64,
    current_scroll_y: f64,
) -> (Rect, bool) {
    match live_rect(element) {
        Some(rect) => (rect, true),
        None => (project(captured, capture_scroll_y, current_scroll_y, false), false),
    }
}
