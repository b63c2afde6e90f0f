//! In-memory host page.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use pagelens_protocols::{
    ElementHandle, ElementRef, HostPage, OverlayNode, OverlayNodeKind, OverlayNodeRef,
    OverlayNodeSpec, Rect,
};

use crate::element::MemoryElement;

/// In-memory host page: scroll, viewport, clock, selector registry and
/// overlay-node accounting. Tests drive all of it explicitly.
pub struct MemoryPage {
    root: Arc<MemoryElement>,
    scroll_y: Mutex<f64>,
    viewport: Mutex<(f64, f64)>,
    clock_ms: Mutex<f64>,
    selectors: Mutex<HashMap<String, Weak<MemoryElement>>>,
    overlay_nodes: Mutex<Vec<Arc<MemoryOverlayNode>>>,
}

impl MemoryPage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            root: MemoryElement::root(),
            scroll_y: Mutex::new(0.0),
            viewport: Mutex::new((1280.0, 720.0)),
            clock_ms: Mutex::new(0.0),
            selectors: Mutex::new(HashMap::new()),
            overlay_nodes: Mutex::new(Vec::new()),
        })
    }

    /// The page root element.
    pub fn root(&self) -> Arc<MemoryElement> {
        Arc::clone(&self.root)
    }

    pub fn set_scroll_y(&self, value: f64) {
        *self.scroll_y.lock() = value;
    }

    pub fn set_viewport(&self, width: f64, height: f64) {
        *self.viewport.lock() = (width, height);
    }

    /// Advance the monotonic clock.
    pub fn advance_clock(&self, delta_ms: f64) {
        *self.clock_ms.lock() += delta_ms;
    }

    /// Make `selector` resolve to `element` while it stays attached.
    pub fn register_selector(&self, selector: impl Into<String>, element: &Arc<MemoryElement>) {
        self.selectors
            .lock()
            .insert(selector.into(), Arc::downgrade(element));
    }

    /// Overlay nodes still present on the page.
    pub fn overlay_nodes(&self) -> Vec<Arc<MemoryOverlayNode>> {
        let mut nodes = self.overlay_nodes.lock();
        nodes.retain(|n| !n.is_removed());
        nodes.clone()
    }

    pub fn overlay_node_count(&self) -> usize {
        self.overlay_nodes().len()
    }
}

impl HostPage for MemoryPage {
    fn scroll_y(&self) -> f64 {
        *self.scroll_y.lock()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport.lock().0
    }

    fn viewport_height(&self) -> f64 {
        self.viewport.lock().1
    }

    fn now_ms(&self) -> f64 {
        *self.clock_ms.lock()
    }

    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        let element = self.selectors.lock().get(selector)?.upgrade()?;
        if !element.is_connected() {
            return None;
        }
        Some(element.handle())
    }

    fn create_overlay_node(&self, spec: OverlayNodeSpec) -> OverlayNodeRef {
        let node = Arc::new(MemoryOverlayNode {
            kind: spec.kind,
            rect: Mutex::new(spec.rect),
            opacity: Mutex::new(spec.opacity),
            transition: spec.transition,
            removed: AtomicBool::new(false),
        });
        self.overlay_nodes.lock().push(Arc::clone(&node));
        node
    }
}

/// One transient overlay marker node.
pub struct MemoryOverlayNode {
    kind: OverlayNodeKind,
    rect: Mutex<Rect>,
    opacity: Mutex<f64>,
    transition: Duration,
    removed: AtomicBool,
}

impl MemoryOverlayNode {
    pub fn rect(&self) -> Rect {
        *self.rect.lock()
    }

    pub fn opacity(&self) -> f64 {
        *self.opacity.lock()
    }

    pub fn transition(&self) -> Duration {
        self.transition
    }
}

impl OverlayNode for MemoryOverlayNode {
    fn kind(&self) -> OverlayNodeKind {
        self.kind
    }

    fn set_rect(&self, rect: Rect) {
        *self.rect.lock() = rect;
    }

    fn set_opacity(&self, value: f64) {
        *self.opacity.lock() = value;
    }

    fn remove(&self) {
        self.removed.store(true, Ordering::SeqCst);
    }

    fn is_removed(&self) -> bool {
        self.removed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_and_viewport() {
        let page = MemoryPage::new();
        assert_eq!(page.scroll_y(), 0.0);

        page.set_scroll_y(120.0);
        page.set_viewport(1000.0, 600.0);
        assert_eq!(page.scroll_y(), 120.0);
        assert_eq!(page.viewport_width(), 1000.0);
        assert_eq!(page.viewport_height(), 600.0);
    }

    #[test]
    fn test_query_selector_drops_detached() {
        let page = MemoryPage::new();
        let el = MemoryElement::new("div");
        page.root().append_child(&el);
        page.register_selector("#target", &el);
        assert!(page.query_selector("#target").is_some());
        assert!(page.query_selector("#missing").is_none());

        el.detach();
        assert!(page.query_selector("#target").is_none());
    }

    #[test]
    fn test_overlay_node_accounting() {
        let page = MemoryPage::new();
        let spec = OverlayNodeSpec {
            kind: OverlayNodeKind::ShiftGhost,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            opacity: 1.0,
            transition: Duration::from_millis(500),
        };
        let a = page.create_overlay_node(spec);
        let _b = page.create_overlay_node(OverlayNodeSpec {
            kind: OverlayNodeKind::ShiftHighlight,
            ..spec
        });
        assert_eq!(page.overlay_node_count(), 2);

        a.remove();
        assert_eq!(page.overlay_node_count(), 1);
        // Removing twice is safe.
        a.remove();
        assert_eq!(page.overlay_node_count(), 1);
    }
}
