//! Entrance-animation lifecycle.
//!
//! The overlay plays its entrance animation once per process, not once per
//! mount. That is global mutable state, so it is modeled as an explicit
//! service with a reset hook instead of a bare flag.

use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;

static GLOBAL: Lazy<EntranceAnimation> = Lazy::new(EntranceAnimation::new);

/// Tracks whether the entrance animation has played in this process.
#[derive(Debug, Default)]
pub struct EntranceAnimation {
    played: AtomicBool,
}

impl EntranceAnimation {
    /// A fresh, unplayed instance. Embedders with their own lifecycle can
    /// hold one instead of the process-wide service.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide service used by [`crate::Overlay::mount`].
    pub fn global() -> &'static EntranceAnimation {
        &GLOBAL
    }

    /// True exactly once: the caller that gets `true` plays the animation.
    pub fn should_play(&self) -> bool {
        !self.played.swap(true, Ordering::SeqCst)
    }

    pub fn has_played(&self) -> bool {
        self.played.load(Ordering::SeqCst)
    }

    /// Forget that the animation played.
    pub fn reset_for_testing(&self) {
        self.played.store(false, Ordering::SeqCst);
    }
}
