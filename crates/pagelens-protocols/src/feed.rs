//! Layout-instability feed protocol.
//!
//! The feed is push-based: once subscribed, the host invokes the handler on
//! its own event loop with batches of entries in chronological delivery
//! order. The capability may be entirely absent on a host; absence is
//! detectable through [`InstabilityFeed::is_supported`] without throwing.

use std::fmt;
use std::sync::Arc;

use crate::element::WeakElementRef;
use crate::error::FeedError;
use crate::types::Rect;

/// One attributed element movement inside a raw feed entry.
#[derive(Debug, Clone)]
pub struct RawShiftSource {
    /// Back-reference into the host tree; `None` when the host could not
    /// attribute the movement to an element.
    pub element: Option<WeakElementRef>,
    /// Geometry before the shift, viewport-space at capture time.
    pub previous_rect: Rect,
    /// Geometry after the shift, viewport-space at capture time.
    pub current_rect: Rect,
}

/// One raw instability entry as delivered by the host feed.
#[derive(Debug, Clone)]
pub struct RawShiftEntry {
    /// Score contribution; non-negative.
    pub value: f64,
    /// Whether the movement is attributable to a recent user gesture.
    pub had_recent_input: bool,
    /// Attributed sources, possibly empty.
    pub sources: Vec<RawShiftSource>,
}

/// Subscription options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscribeOptions {
    /// Deliver entries buffered before the subscription was created.
    pub deliver_buffered: bool,
}

/// Handler invoked with each delivered batch, on the host event loop.
pub type FeedHandler = Arc<dyn Fn(&[RawShiftEntry]) + Send + Sync + 'static>;

/// The push-based instability feed capability.
pub trait InstabilityFeed: Send + Sync {
    /// Whether this host supports instability entries at all.
    fn is_supported(&self) -> bool;

    /// Begin delivery. At most one subscription per caller is expected;
    /// callers enforce this themselves.
    fn subscribe(
        &self,
        options: SubscribeOptions,
        handler: FeedHandler,
    ) -> Result<FeedSubscription, FeedError>;
}

/// Cancellation handle for one feed subscription.
///
/// Unsubscribing is synchronous and may be triggered from inside the handler
/// itself. Dropping the handle unsubscribes.
pub struct FeedSubscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl FeedSubscription {
    /// Wrap the feed-specific cancellation action.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Detach the subscription. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for FeedSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedSubscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
