//! In-memory instability feed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use pagelens_protocols::{
    FeedError, FeedHandler, FeedSubscription, InstabilityFeed, RawShiftEntry, SubscribeOptions,
};

struct Subscriber {
    id: u64,
    active: Arc<AtomicBool>,
    handler: FeedHandler,
}

/// Manually driven feed: tests push entries with [`MemoryFeed::emit`] and
/// they are delivered synchronously, in order, to every live subscriber.
pub struct MemoryFeed {
    supported: bool,
    fail_subscribe: AtomicBool,
    buffer: Mutex<Vec<RawShiftEntry>>,
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
    next_id: AtomicU64,
}

impl MemoryFeed {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            supported: true,
            fail_subscribe: AtomicBool::new(false),
            buffer: Mutex::new(Vec::new()),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
        })
    }

    /// A feed whose capability is absent, as on older engines.
    pub fn unsupported() -> Arc<Self> {
        Arc::new(Self {
            supported: false,
            fail_subscribe: AtomicBool::new(false),
            buffer: Mutex::new(Vec::new()),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
        })
    }

    /// Make the next `subscribe` call fail, for exercising the
    /// subscription-throws path.
    pub fn fail_next_subscribe(&self) {
        self.fail_subscribe.store(true, Ordering::SeqCst);
    }

    /// Push one entry: buffered for future subscribers, delivered to current
    /// ones.
    pub fn emit(&self, entry: RawShiftEntry) {
        self.buffer.lock().push(entry.clone());

        // Deliver outside the lock so a handler may unsubscribe mid-call.
        let live: Vec<(Arc<AtomicBool>, FeedHandler)> = self
            .subscribers
            .lock()
            .iter()
            .map(|s| (Arc::clone(&s.active), Arc::clone(&s.handler)))
            .collect();
        for (active, handler) in live {
            if active.load(Ordering::SeqCst) {
                handler(std::slice::from_ref(&entry));
            }
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .iter()
            .filter(|s| s.active.load(Ordering::SeqCst))
            .count()
    }
}

impl InstabilityFeed for MemoryFeed {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn subscribe(
        &self,
        options: SubscribeOptions,
        handler: FeedHandler,
    ) -> Result<FeedSubscription, FeedError> {
        if !self.supported {
            return Err(FeedError::Unsupported);
        }
        if self.fail_subscribe.swap(false, Ordering::SeqCst) {
            return Err(FeedError::Subscribe(
                "injected subscription failure".to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let active = Arc::new(AtomicBool::new(true));
        self.subscribers.lock().push(Subscriber {
            id,
            active: Arc::clone(&active),
            handler: Arc::clone(&handler),
        });

        if options.deliver_buffered {
            let buffered = self.buffer.lock().clone();
            if !buffered.is_empty() {
                handler(&buffered);
            }
        }

        let subscribers = Arc::clone(&self.subscribers);
        Ok(FeedSubscription::new(move || {
            active.store(false, Ordering::SeqCst);
            subscribers.lock().retain(|s| s.id != id);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelens_protocols::Rect;
    use std::sync::atomic::AtomicUsize;

    fn entry(value: f64) -> RawShiftEntry {
        RawShiftEntry {
            value,
            had_recent_input: false,
            sources: Vec::new(),
        }
    }

    #[test]
    fn test_emit_delivers_in_order() {
        let feed = MemoryFeed::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = feed
            .subscribe(
                SubscribeOptions::default(),
                Arc::new(move |entries| {
                    for e in entries {
                        sink.lock().push(e.value);
                    }
                }),
            )
            .unwrap();

        feed.emit(entry(0.1));
        feed.emit(entry(0.2));
        assert_eq!(*seen.lock(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_buffered_delivery_on_subscribe() {
        let feed = MemoryFeed::new();
        feed.emit(entry(0.3));

        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        let _sub = feed
            .subscribe(
                SubscribeOptions {
                    deliver_buffered: true,
                },
                Arc::new(move |entries| {
                    sink.fetch_add(entries.len(), Ordering::SeqCst);
                }),
            )
            .unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let feed = MemoryFeed::new();
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        let mut sub = feed
            .subscribe(
                SubscribeOptions::default(),
                Arc::new(move |entries| {
                    sink.fetch_add(entries.len(), Ordering::SeqCst);
                }),
            )
            .unwrap();

        feed.emit(entry(0.1));
        sub.unsubscribe();
        feed.emit(entry(0.2));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let feed = MemoryFeed::new();
        {
            let _sub = feed
                .subscribe(SubscribeOptions::default(), Arc::new(|_| {}))
                .unwrap();
            assert_eq!(feed.subscriber_count(), 1);
        }
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_unsupported_feed_rejects() {
        let feed = MemoryFeed::unsupported();
        assert!(!feed.is_supported());
        let result = feed.subscribe(SubscribeOptions::default(), Arc::new(|_| {}));
        assert!(matches!(result, Err(FeedError::Unsupported)));
    }

    #[test]
    fn test_injected_subscribe_failure() {
        let feed = MemoryFeed::new();
        feed.fail_next_subscribe();
        let result = feed.subscribe(SubscribeOptions::default(), Arc::new(|_| {}));
        assert!(matches!(result, Err(FeedError::Subscribe(_))));

        // Only the next subscribe fails.
        assert!(feed
            .subscribe(SubscribeOptions::default(), Arc::new(|_| {}))
            .is_ok());
    }
}
