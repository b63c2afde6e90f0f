//! Cooperative scheduling protocol.
//!
//! All waiting in the overlay goes through rendering-frame callbacks or
//! cancellable timeouts; nothing ever blocks the host event loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A deferred unit of work.
pub type FrameCallback = Box<dyn FnOnce() + Send + 'static>;

/// Frame and timeout scheduling provided by the host.
pub trait Scheduler: Send + Sync {
    /// Run `callback` on the next rendering frame.
    fn request_frame(&self, callback: FrameCallback);

    /// Run `callback` once after `delay`, unless the returned handle is
    /// cancelled first.
    fn set_timeout(&self, delay: Duration, callback: FrameCallback) -> TimerHandle;
}

/// Cancellation handle for a scheduled timeout.
///
/// Cloning shares the underlying flag; scheduler implementations keep a clone
/// and check it immediately before firing.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prevent the timeout from firing. Idempotent; a no-op once fired.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_handle_cancel() {
        let handle = TimerHandle::new();
        assert!(!handle.is_cancelled());

        let shared = handle.clone();
        handle.cancel();
        assert!(shared.is_cancelled());

        // Cancelling again stays cancelled.
        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
