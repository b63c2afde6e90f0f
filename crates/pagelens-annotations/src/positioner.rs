//! Scroll-aware marker anchoring.

use pagelens_inspect::is_scroll_exempt;
use pagelens_protocols::{ElementHandle, ElementRef, HostPage, Rect};

use crate::record::Annotation;

/// Anchor captured when an annotation is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationAnchor {
    pub x_percent: f64,
    /// Document-space unless `is_fixed`, then viewport-space.
    pub y: f64,
    pub is_fixed: bool,
}

/// Where to render a marker, viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    pub x: f64,
    pub y: f64,
}

/// Capture the anchor for a click at viewport point (`point_x`, `point_y`)
/// on `element`.
///
/// Fixedness is decided here, once, by the coordinate model's ancestry walk;
/// a fixed anchor stays in viewport-space, everything else is converted to
/// document-space by adding the current scroll offset.
pub fn anchor_at(
    element: &ElementRef,
    point_x: f64,
    point_y: f64,
    page: &dyn HostPage,
) -> AnnotationAnchor {
    let is_fixed = is_scroll_exempt(element);
    let width = page.viewport_width();
    let x_percent = if width > 0.0 {
        point_x / width * 100.0
    } else {
        0.0
    };
    let y = if is_fixed {
        point_y
    } else {
        point_y + page.scroll_y()
    };

    AnnotationAnchor {
        x_percent,
        y,
        is_fixed,
    }
}

/// Element bounds at capture, in the same frame as the anchor's `y`.
pub fn anchor_bounding_box(
    element: &ElementRef,
    is_fixed: bool,
    page: &dyn HostPage,
) -> Option<Rect> {
    let rect = element.bounding_rect()?;
    if is_fixed {
        Some(rect)
    } else {
        Some(rect.translated_y(page.scroll_y()))
    }
}

/// Current render position for `annotation`, from its stored flags only.
pub fn marker_position(
    annotation: &Annotation,
    current_scroll_y: f64,
    viewport_width: f64,
) -> MarkerPosition {
    let x = annotation.x_percent / 100.0 * viewport_width;
    let y = if annotation.is_fixed {
        annotation.y
    } else {
        annotation.y - current_scroll_y
    };

    MarkerPosition { x, y }
}
