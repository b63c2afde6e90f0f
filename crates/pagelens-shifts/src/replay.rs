//! Visual replay of one historical shift against the live page.

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use pagelens_config::ReplayConfig;
use pagelens_inspect::resolve_current_rect;
use pagelens_protocols::{
    HostPage, OverlayNode, OverlayNodeKind, OverlayNodeRef, OverlayNodeSpec, Rect, Scheduler,
    TimerHandle,
};

use crate::record::LayoutShift;

/// Stages and animates ghost/highlight markers for one shift.
///
/// Two states: idle and animating. A new `replay` while animating tears the
/// previous overlay down synchronously first; there is at most one active
/// replay and never two overlapping overlays. A fixed timeout after replay
/// start removes every created marker unconditionally, whether or not the
/// transition visually finished.
pub struct ReplayEngine {
    page: Arc<dyn HostPage>,
    scheduler: Arc<dyn Scheduler>,
    config: ReplayConfig,
    inner: Arc<ReplayInner>,
}

struct ReplayInner {
    next_generation: AtomicU64,
    active: Mutex<Option<ActiveReplay>>,
}

struct ActiveReplay {
    generation: u64,
    nodes: Vec<OverlayNodeRef>,
    timeout: Option<TimerHandle>,
}

impl ReplayEngine {
    pub fn new(
        page: Arc<dyn HostPage>,
        scheduler: Arc<dyn Scheduler>,
        config: ReplayConfig,
    ) -> Self {
        Self {
            page,
            scheduler,
            config,
            inner: Arc::new(ReplayInner {
                next_generation: AtomicU64::new(0),
                active: Mutex::new(None),
            }),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.inner.active.lock().is_some()
    }

    /// Stage and start a replay of `shift`. Last request wins: any replay
    /// already in flight is cleaned up before the new overlay is staged.
    pub fn replay(&self, shift: &LayoutShift) {
        self.cancel();

        let generation = self.inner.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current_scroll_y = self.page.scroll_y();
        let scroll_offset = shift.scroll_y - current_scroll_y;

        let mut nodes: Vec<OverlayNodeRef> = Vec::new();
        let mut animations: Vec<(OverlayNodeRef, OverlayNodeRef, Rect)> = Vec::new();
        for source in &shift.sources {
            // The previous position only exists as captured history, so it is
            // always projected; the current position prefers the live
            // rectangle while the element is still attached.
            let previous = source.previous_rect.translated_y(scroll_offset);
            let (target, _live) = resolve_current_rect(
                source.element.as_ref(),
                source.current_rect,
                shift.scroll_y,
                current_scroll_y,
            );

            let ghost = self.page.create_overlay_node(OverlayNodeSpec {
                kind: OverlayNodeKind::ShiftGhost,
                rect: previous,
                opacity: 1.0,
                transition: Duration::from_millis(self.config.move_transition_ms),
            });
            let highlight = self.page.create_overlay_node(OverlayNodeSpec {
                kind: OverlayNodeKind::ShiftHighlight,
                rect: target,
                opacity: 0.0,
                transition: Duration::from_millis(self.config.fade_transition_ms),
            });

            nodes.push(Arc::clone(&ghost));
            nodes.push(Arc::clone(&highlight));
            animations.push((ghost, highlight, target));
        }

        *self.inner.active.lock() = Some(ActiveReplay {
            generation,
            nodes,
            timeout: None,
        });
        debug!(id = %shift.id, generation, "replay staged");

        // Two frames, not one: the host must commit the starting geometry
        // before the transition properties change.
        let inner = Arc::clone(&self.inner);
        let scheduler = Arc::clone(&self.scheduler);
        self.scheduler.request_frame(Box::new(move || {
            scheduler.request_frame(Box::new(move || {
                if !inner.is_current(generation) {
                    return;
                }
                for (ghost, highlight, target) in &animations {
                    ghost.set_rect(*target);
                    highlight.set_opacity(1.0);
                }
            }));
        }));

        let inner = Arc::clone(&self.inner);
        let handle = self.scheduler.set_timeout(
            Duration::from_millis(self.config.hold_ms),
            Box::new(move || {
                inner.cleanup_generation(generation);
            }),
        );

        // Attach the timeout to this replay unless it was already torn down.
        let mut active = self.inner.active.lock();
        match active.as_mut() {
            Some(current) if current.generation == generation => current.timeout = Some(handle),
            _ => handle.cancel(),
        }
    }

    /// Remove any staged markers and return to idle. Idempotent, callable at
    /// any time, including on unmount.
    pub fn cancel(&self) {
        self.inner.cleanup_any();
    }
}

impl Drop for ReplayEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl ReplayInner {
    fn is_current(&self, generation: u64) -> bool {
        self.active
            .lock()
            .as_ref()
            .is_some_and(|a| a.generation == generation)
    }

    /// Tear down only if `generation` is still the active replay. A stale
    /// timeout must never touch a newer overlay.
    fn cleanup_generation(&self, generation: u64) {
        let taken = {
            let mut active = self.active.lock();
            match active.as_ref() {
                Some(current) if current.generation == generation => active.take(),
                _ => None,
            }
        };
        if let Some(replay) = taken {
            Self::teardown(replay);
        }
    }

    fn cleanup_any(&self) {
        let taken = self.active.lock().take();
        if let Some(replay) = taken {
            Self::teardown(replay);
        }
    }

    fn teardown(replay: ActiveReplay) {
        if let Some(timeout) = replay.timeout {
            timeout.cancel();
        }
        for node in &replay.nodes {
            node.remove();
        }
        debug!(generation = replay.generation, "replay overlay removed");
    }
}
