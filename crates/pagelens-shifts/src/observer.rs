//! Instability feed consumption and filtering policy.

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use pagelens_config::ShiftsConfig;
use pagelens_inspect::{describe, element_path, SourceChange};
use pagelens_protocols::{
    is_within_marked_subtree, FeedHandler, FeedSubscription, HostPage, InstabilityFeed,
    RawShiftEntry, SubscribeOptions, IGNORE_SHIFT_ATTR, OVERLAY_ROOT_ATTR,
};

use crate::error::ShiftError;
use crate::record::{mint_shift_id, LayoutShift, ShiftSource};
use crate::store::ShiftStore;

/// Ancestor depth for selector paths attached to shift sources.
const SELECTOR_DEPTH: usize = 4;

/// Consumes the host's instability feed, applies the filtering policy and
/// appends normalized records to the store.
///
/// `enable` and `disable` bracket a single live subscription; disabling is
/// synchronous and final for entries still sitting in the feed's delivery
/// queue. A host without the capability latches into an unsupported state
/// the first time it is probed and is never retried.
pub struct ShiftObserver {
    feed: Arc<dyn InstabilityFeed>,
    page: Arc<dyn HostPage>,
    store: Arc<ShiftStore>,
    config: ShiftsConfig,
    inner: Arc<ObserverInner>,
}

struct ObserverInner {
    /// Gate consulted inside the handler on every entry.
    active: AtomicBool,
    /// Capability probe result, latched on first use.
    support: Mutex<Option<bool>>,
    subscription: Mutex<Option<FeedSubscription>>,
}

impl ShiftObserver {
    pub fn new(
        feed: Arc<dyn InstabilityFeed>,
        page: Arc<dyn HostPage>,
        store: Arc<ShiftStore>,
        config: ShiftsConfig,
    ) -> Self {
        Self {
            feed,
            page,
            store,
            config,
            inner: Arc::new(ObserverInner {
                active: AtomicBool::new(false),
                support: Mutex::new(None),
                subscription: Mutex::new(None),
            }),
        }
    }

    /// Whether the feed capability is present. Probed once; the result is
    /// final for the session.
    pub fn is_supported(&self) -> bool {
        let mut support = self.inner.support.lock();
        *support.get_or_insert_with(|| self.feed.is_supported())
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Begin consuming the feed. Idempotent while enabled; re-enabling after
    /// a disable creates a fresh subscription.
    pub fn enable(&self) -> Result<(), ShiftError> {
        if self.is_enabled() {
            return Ok(());
        }
        if !self.is_supported() {
            return Err(ShiftError::Unsupported);
        }

        self.inner.active.store(true, Ordering::SeqCst);

        let inner = Arc::clone(&self.inner);
        let page = Arc::clone(&self.page);
        let store = Arc::clone(&self.store);
        let threshold = self.config.filter_threshold;
        let handler: FeedHandler = Arc::new(move |entries: &[RawShiftEntry]| {
            for entry in entries {
                // Entries still in the delivery queue after disable() are
                // dropped here, not recorded.
                if !inner.active.load(Ordering::SeqCst) {
                    return;
                }
                process_entry(entry, threshold, page.as_ref(), &store);
            }
        });

        let options = SubscribeOptions {
            deliver_buffered: self.config.deliver_buffered,
        };
        match self.feed.subscribe(options, handler) {
            Ok(subscription) => {
                *self.inner.subscription.lock() = Some(subscription);
                debug!(threshold, "shift observer enabled");
                Ok(())
            }
            Err(error) => {
                self.inner.active.store(false, Ordering::SeqCst);
                *self.inner.support.lock() = Some(false);
                warn!(%error, "instability feed rejected subscription; latching unsupported");
                Err(ShiftError::Unsupported)
            }
        }
    }

    /// Stop consuming immediately. Idempotent; nothing is recorded after
    /// this returns, including entries already in flight.
    pub fn disable(&self) {
        self.inner.active.store(false, Ordering::SeqCst);
        if let Some(mut subscription) = self.inner.subscription.lock().take() {
            subscription.unsubscribe();
            debug!("shift observer disabled");
        }
    }
}

fn process_entry(entry: &RawShiftEntry, threshold: f64, page: &dyn HostPage, store: &ShiftStore) {
    // Movement attributable to a recent user gesture is exempt.
    if entry.had_recent_input {
        return;
    }
    if entry.value < threshold {
        return;
    }

    let mut sources = Vec::new();
    for raw in &entry.sources {
        let element = raw.element.as_ref().and_then(|weak| weak.upgrade());
        if let Some(el) = &element {
            // Self-exclusion: the overlay never attributes shifts to its own
            // UI, nor to subtrees the embedder marked as ignored.
            if is_within_marked_subtree(el, IGNORE_SHIFT_ATTR)
                || is_within_marked_subtree(el, OVERLAY_ROOT_ATTR)
            {
                continue;
            }
        }

        let selector = element
            .as_ref()
            .map(|el| element_path(el, SELECTOR_DEPTH))
            .filter(|path| !path.is_empty());

        sources.push(ShiftSource {
            element: raw.element.clone(),
            selector,
            previous_rect: raw.previous_rect,
            current_rect: raw.current_rect,
        });
    }

    // A shift with no attributable cause is not reported.
    if sources.is_empty() {
        return;
    }

    let changes: Vec<SourceChange<'_>> = sources
        .iter()
        .map(|source| SourceChange {
            selector: source.selector.as_deref(),
            previous: source.previous_rect,
            current: source.current_rect,
        })
        .collect();
    let description = describe(&changes);

    let now = page.now_ms();
    let shift = LayoutShift {
        id: mint_shift_id(now),
        value: entry.value,
        timestamp: now,
        had_recent_input: entry.had_recent_input,
        sources,
        description,
        scroll_y: page.scroll_y(),
    };

    debug!(id = %shift.id, value = shift.value, description = %shift.description, "layout shift recorded");
    store.append(shift);
}
