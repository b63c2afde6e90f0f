//! Scheduler implementations.
//!
//! [`ManualScheduler`] is pumped explicitly by tests: frames run when asked,
//! the clock moves when told. [`TokioScheduler`] maps the same protocol onto
//! tokio timers for real-time embedding.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use pagelens_protocols::{FrameCallback, Scheduler, TimerHandle};

struct ScheduledTimer {
    due_ms: f64,
    handle: TimerHandle,
    callback: FrameCallback,
}

/// Deterministic scheduler driven by explicit pumping.
pub struct ManualScheduler {
    frames: Mutex<VecDeque<FrameCallback>>,
    timers: Mutex<Vec<ScheduledTimer>>,
    now_ms: Mutex<f64>,
}

impl ManualScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            frames: Mutex::new(VecDeque::new()),
            timers: Mutex::new(Vec::new()),
            now_ms: Mutex::new(0.0),
        })
    }

    /// Run every callback queued for the current frame. Callbacks that queue
    /// further frames land in the next batch. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<FrameCallback> = self.frames.lock().drain(..).collect();
        let count = batch.len();
        for callback in batch {
            callback();
        }
        count
    }

    /// Pump `count` frames.
    pub fn run_frames(&self, count: usize) {
        for _ in 0..count {
            self.run_frame();
        }
    }

    /// Advance the clock, firing due timers in due order.
    pub fn advance_ms(&self, delta_ms: f64) {
        let target = {
            let mut now = self.now_ms.lock();
            *now += delta_ms;
            *now
        };

        loop {
            let next = {
                let mut timers = self.timers.lock();
                let due_index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by(|(_, a), (_, b)| {
                        a.due_ms
                            .partial_cmp(&b.due_ms)
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(i, _)| i);
                due_index.map(|i| timers.remove(i))
            };

            match next {
                Some(timer) => {
                    if !timer.handle.is_cancelled() {
                        (timer.callback)();
                    }
                }
                None => break,
            }
        }
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers
            .lock()
            .iter()
            .filter(|t| !t.handle.is_cancelled())
            .count()
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        self.frames.lock().push_back(callback);
    }

    fn set_timeout(&self, delay: Duration, callback: FrameCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let due_ms = *self.now_ms.lock() + delay.as_secs_f64() * 1000.0;
        self.timers.lock().push(ScheduledTimer {
            due_ms,
            handle: handle.clone(),
            callback,
        });
        handle
    }
}

/// Real-time scheduler backed by tokio timers. Must be used from within a
/// tokio runtime.
pub struct TokioScheduler {
    frame_interval: Duration,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self {
            // One frame at a conventional 60Hz cadence.
            frame_interval: Duration::from_millis(16),
        }
    }

    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self { frame_interval }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        let interval = self.frame_interval;
        tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            callback();
        });
    }

    fn set_timeout(&self, delay: Duration, callback: FrameCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !guard.is_cancelled() {
                callback();
            }
        });
        handle
    }
}
