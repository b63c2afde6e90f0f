//! In-memory element tree.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use pagelens_protocols::{CssPosition, ElementHandle, ElementRef, Rect, WeakElementRef};

/// One element in the in-memory tree.
///
/// Geometry is explicit: tests set the viewport-space bounding rectangle
/// directly instead of deriving it from layout.
pub struct MemoryElement {
    me: Weak<MemoryElement>,
    tag: String,
    root: bool,
    connected: AtomicBool,
    rect: Mutex<Option<Rect>>,
    position: Mutex<CssPosition>,
    attributes: Mutex<HashMap<String, String>>,
    classes: Mutex<Vec<String>>,
    text: Mutex<Option<String>>,
    parent: Mutex<Weak<MemoryElement>>,
    children: Mutex<Vec<Arc<MemoryElement>>>,
}

impl MemoryElement {
    /// Create a detached element. It becomes connected when appended into a
    /// connected tree.
    pub fn new(tag: impl Into<String>) -> Arc<Self> {
        Self::build(tag.into(), false, false)
    }

    /// Create the page root.
    pub(crate) fn root() -> Arc<Self> {
        Self::build("body".to_string(), true, true)
    }

    fn build(tag: String, root: bool, connected: bool) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            tag: tag.to_lowercase(),
            root,
            connected: AtomicBool::new(connected),
            rect: Mutex::new(None),
            position: Mutex::new(CssPosition::Static),
            attributes: Mutex::new(HashMap::new()),
            classes: Mutex::new(Vec::new()),
            text: Mutex::new(None),
            parent: Mutex::new(Weak::new()),
            children: Mutex::new(Vec::new()),
        })
    }

    /// Append `child` under `self`, connecting its whole subtree when `self`
    /// is connected.
    pub fn append_child(&self, child: &Arc<MemoryElement>) {
        *child.parent.lock() = self.me.clone();
        self.children.lock().push(Arc::clone(child));
        if self.connected.load(Ordering::SeqCst) {
            child.mark_connected(true);
        }
    }

    /// Detach `self` from its parent, disconnecting the whole subtree. The
    /// element keeps its last attributes but reports no geometry afterwards.
    pub fn detach(&self) {
        if let Some(parent) = self.parent.lock().upgrade() {
            parent
                .children
                .lock()
                .retain(|c| !std::ptr::eq(c.as_ref(), self));
        }
        *self.parent.lock() = Weak::new();
        self.mark_connected(false);
    }

    fn mark_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
        for child in self.children.lock().iter() {
            child.mark_connected(connected);
        }
    }

    pub fn set_bounding_rect(&self, rect: Rect) {
        *self.rect.lock() = Some(rect);
    }

    pub fn set_css_position(&self, position: CssPosition) {
        *self.position.lock() = position;
    }

    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.lock().insert(name.into(), value.into());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.attributes.lock().remove(name);
    }

    pub fn set_classes<I, S>(&self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.classes.lock() = classes.into_iter().map(Into::into).collect();
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.lock() = Some(text.into());
    }

    /// Shared trait-object handle.
    pub fn handle(&self) -> ElementRef {
        self.upgrade_self()
    }

    /// Weak trait-object handle, as embedded in shift records.
    pub fn weak_handle(&self) -> WeakElementRef {
        self.me.clone()
    }

    fn upgrade_self(&self) -> Arc<MemoryElement> {
        // Every MemoryElement is constructed through Arc::new_cyclic, and a
        // &self borrow keeps the Arc alive.
        self.me.upgrade().expect("element constructed in an Arc")
    }

    fn sibling_text(&self, offset: isize) -> Option<String> {
        let parent = self.parent.lock().upgrade()?;
        let children = parent.children.lock();
        let index = children
            .iter()
            .position(|c| std::ptr::eq(c.as_ref(), self))?;
        let sibling_index = index.checked_add_signed(offset)?;
        let sibling = children.get(sibling_index)?;
        sibling.text_content()
    }
}

impl ElementHandle for MemoryElement {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn bounding_rect(&self) -> Option<Rect> {
        if !self.is_connected() {
            return None;
        }
        *self.rect.lock()
    }

    fn css_position(&self) -> CssPosition {
        *self.position.lock()
    }

    fn parent(&self) -> Option<ElementRef> {
        self.parent
            .lock()
            .upgrade()
            .map(|parent| parent as ElementRef)
    }

    fn is_root(&self) -> bool {
        self.root
    }

    fn tag(&self) -> String {
        self.tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.lock().get(name).cloned()
    }

    fn classes(&self) -> Vec<String> {
        self.classes.lock().clone()
    }

    fn text_content(&self) -> Option<String> {
        self.text
            .lock()
            .as_ref()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    fn preceding_sibling_text(&self) -> Option<String> {
        self.sibling_text(-1)
    }

    fn following_sibling_text(&self) -> Option<String> {
        self.sibling_text(1)
    }
}
