//! Element handle protocol.
//!
//! Element references embedded in shift and annotation records are
//! back-references into the host page's independently-lived tree. They are
//! held as [`WeakElementRef`] and must never extend an element's lifetime;
//! every read goes through an upgrade plus [`ElementHandle::is_connected`]
//! check before the handle is trusted as ground truth.

use std::sync::{Arc, Weak};

use crate::types::{CssPosition, Rect};

/// A live view of one element in the host page.
pub trait ElementHandle: Send + Sync {
    /// Whether the element is still attached to the page.
    fn is_connected(&self) -> bool;

    /// Current bounding rectangle in viewport-space, or `None` once the
    /// element is detached.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Computed CSS position of this element.
    fn css_position(&self) -> CssPosition;

    /// Parent element, or `None` at (or above) the root.
    fn parent(&self) -> Option<ElementRef>;

    /// Whether this is the page root (the ancestry walks stop here).
    fn is_root(&self) -> bool;

    /// Lowercase tag name.
    fn tag(&self) -> String;

    /// Attribute value, when present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Class list in document order.
    fn classes(&self) -> Vec<String>;

    /// Trimmed text content, when non-empty.
    fn text_content(&self) -> Option<String>;

    /// Trimmed text of the preceding sibling, when non-empty.
    fn preceding_sibling_text(&self) -> Option<String> {
        None
    }

    /// Trimmed text of the following sibling, when non-empty.
    fn following_sibling_text(&self) -> Option<String> {
        None
    }

    /// Whether the attribute is present, regardless of value.
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Shared element handle.
pub type ElementRef = Arc<dyn ElementHandle>;

/// Weak element handle; upgrade and liveness-check before every use.
pub type WeakElementRef = Weak<dyn ElementHandle>;

/// True when `element` or any of its ancestors carries `attr`.
///
/// The walk includes the starting element and stops at the root.
pub fn is_within_marked_subtree(element: &ElementRef, attr: &str) -> bool {
    let mut current = Some(Arc::clone(element));
    while let Some(el) = current {
        if el.has_attribute(attr) {
            return true;
        }
        if el.is_root() {
            return false;
        }
        current = el.parent();
    }
    false
}
