//! Host page protocol.

use std::sync::Arc;
use std::time::Duration;

use crate::element::ElementRef;
use crate::types::Rect;

/// The host page the overlay is mounted into.
///
/// All coordinates handed out by a `HostPage` are viewport-space. The clock
/// is monotonic and unrelated to wall time.
pub trait HostPage: Send + Sync {
    /// Current vertical document scroll offset.
    fn scroll_y(&self) -> f64;

    /// Viewport width in pixels.
    fn viewport_width(&self) -> f64;

    /// Viewport height in pixels.
    fn viewport_height(&self) -> f64;

    /// Monotonic capture clock, in milliseconds.
    fn now_ms(&self) -> f64;

    /// Resolve a stored selector to a live element, when it still matches.
    fn query_selector(&self, selector: &str) -> Option<ElementRef>;

    /// Create one overlay marker node. Overlay nodes are purely additive:
    /// they never reparent or resize host content.
    fn create_overlay_node(&self, spec: OverlayNodeSpec) -> OverlayNodeRef;
}

/// Parameters for a new overlay marker node.
#[derive(Debug, Clone, Copy)]
pub struct OverlayNodeSpec {
    pub kind: OverlayNodeKind,
    /// Starting geometry, viewport-space.
    pub rect: Rect,
    /// Starting opacity in `[0, 1]`.
    pub opacity: f64,
    /// Transition duration the host applies to subsequent geometry and
    /// opacity changes.
    pub transition: Duration,
}

/// Role of an overlay marker node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayNodeKind {
    /// Dashed marker at a shift source's previous position.
    ShiftGhost,
    /// Solid marker at a shift source's current position.
    ShiftHighlight,
}

/// One transient marker node owned by the overlay.
pub trait OverlayNode: Send + Sync {
    fn kind(&self) -> OverlayNodeKind;

    /// Update geometry; animated by the host when a transition was set.
    fn set_rect(&self, rect: Rect);

    /// Update opacity; animated by the host when a transition was set.
    fn set_opacity(&self, value: f64);

    /// Remove the node from the page. Safe to call more than once.
    fn remove(&self);

    fn is_removed(&self) -> bool;
}

/// Shared overlay node handle.
pub type OverlayNodeRef = Arc<dyn OverlayNode>;
