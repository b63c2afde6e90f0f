//! The overlay facade: wiring, lifecycle, and the embedder-facing API.

use std::sync::Arc;

use tracing::{info, warn};

use pagelens_annotations::{Annotation, AnnotationRequest, AnnotationStore, MarkerPosition, SafeLabeler};
use pagelens_config::{ConfigError, ConfigValidator, OverlayConfig};
use pagelens_protocols::{
    AuditEngine, ComponentLabeler, ElementRef, HostPage, InstabilityFeed, Scheduler,
};
use pagelens_shifts::{ClsRating, LayoutShift, ReplayEngine, ShiftObserver, ShiftStore};

use crate::audit::{self, AuditReport};
use crate::entrance::EntranceAnimation;
use crate::error::OverlayError;

/// Everything the host environment provides at mount time.
#[derive(Clone)]
pub struct OverlayHost {
    pub page: Arc<dyn HostPage>,
    pub feed: Arc<dyn InstabilityFeed>,
    pub scheduler: Arc<dyn Scheduler>,
    /// Optional UI-component labeler; absent means every lookup is unknown.
    pub labeler: Option<Arc<dyn ComponentLabeler>>,
}

/// A mounted overlay.
///
/// Holds the shift engine, the annotation store, and the audit boundary.
/// Unmounting (or dropping) detaches the feed subscription and removes any
/// in-flight replay overlay; both are idempotent.
pub struct Overlay {
    page: Arc<dyn HostPage>,
    config: OverlayConfig,
    shift_store: Arc<ShiftStore>,
    observer: ShiftObserver,
    replay: ReplayEngine,
    annotations: AnnotationStore,
    entrance_pending: bool,
}

impl Overlay {
    /// Validate `config` and wire the overlay against `host`. Warnings are
    /// logged; errors reject the mount.
    pub fn mount(host: OverlayHost, config: OverlayConfig) -> Result<Self, OverlayError> {
        let validation = ConfigValidator::validate(&config);
        for warning in &validation.warnings {
            warn!(path = %warning.path, message = %warning.message, "config warning");
        }
        if !validation.is_valid() {
            let details = validation
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::Rejected(details).into());
        }

        let shift_store = Arc::new(ShiftStore::new());
        let observer = ShiftObserver::new(
            Arc::clone(&host.feed),
            Arc::clone(&host.page),
            Arc::clone(&shift_store),
            config.shifts.clone(),
        );
        let replay = ReplayEngine::new(
            Arc::clone(&host.page),
            Arc::clone(&host.scheduler),
            config.replay.clone(),
        );
        let annotations = AnnotationStore::new(
            config.annotations.clone(),
            SafeLabeler::new(host.labeler.clone()),
        );
        let entrance_pending = EntranceAnimation::global().should_play();

        info!(entrance = entrance_pending, "overlay mounted");
        Ok(Self {
            page: host.page,
            config,
            shift_store,
            observer,
            replay,
            annotations,
            entrance_pending,
        })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Whether this mount won the once-per-process entrance animation.
    pub fn plays_entrance_animation(&self) -> bool {
        self.entrance_pending
    }

    // --- layout shifts ---

    /// Start consuming the instability feed.
    pub fn enable_shift_detection(&self) -> Result<(), OverlayError> {
        self.observer.enable().map_err(Into::into)
    }

    /// Stop consuming immediately; nothing further is recorded.
    pub fn disable_shift_detection(&self) {
        self.observer.disable();
    }

    pub fn shift_detection_enabled(&self) -> bool {
        self.observer.is_enabled()
    }

    /// Whether this host supports shift detection at all. Probed once and
    /// final for the session.
    pub fn shift_detection_supported(&self) -> bool {
        self.observer.is_supported()
    }

    pub fn shifts(&self) -> Vec<LayoutShift> {
        self.shift_store.shifts()
    }

    /// Shifts scoring at least `threshold`, for severity-filtered readouts.
    pub fn shifts_at_least(&self, threshold: f64) -> Vec<LayoutShift> {
        self.shift_store.shifts_at_least(threshold)
    }

    pub fn cumulative_cls(&self) -> f64 {
        self.shift_store.cumulative_cls()
    }

    pub fn cls_rating(&self) -> ClsRating {
        self.shift_store.rating()
    }

    pub fn clear_shifts(&self) {
        self.shift_store.clear();
    }

    // --- replay ---

    /// Replay one stored shift. Last request wins; any in-flight replay is
    /// torn down first.
    pub fn replay_shift(&self, id: &str) -> Result<(), OverlayError> {
        let shift = self
            .shift_store
            .get(id)
            .ok_or_else(|| OverlayError::ShiftNotFound(id.to_string()))?;
        self.replay.replay(&shift);
        Ok(())
    }

    pub fn cancel_replay(&self) {
        self.replay.cancel();
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_animating()
    }

    // --- annotations ---

    /// Capture an annotation on `element` at the request's click point.
    pub fn annotate(&self, element: &ElementRef, request: AnnotationRequest) -> Annotation {
        self.annotations
            .annotate(element, self.page.as_ref(), request)
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.annotations.annotations()
    }

    /// Render positions for every annotation at the current scroll and
    /// viewport.
    pub fn annotation_markers(&self) -> Vec<(Annotation, MarkerPosition)> {
        self.annotations.marker_positions(self.page.as_ref())
    }

    pub fn delete_annotation(&self, id: &str) -> bool {
        self.annotations.remove(id)
    }

    pub fn clear_annotations(&self) {
        self.annotations.clear();
    }

    // --- accessibility audit ---

    /// Run the external rule engine and transform its findings, dropping
    /// anything attributed to the overlay's own subtree.
    pub fn run_audit(&self, engine: &dyn AuditEngine) -> Result<AuditReport, OverlayError> {
        audit::run_audit(engine, self.page.as_ref()).map_err(Into::into)
    }

    /// Tear down: detach the feed subscription and remove any replay
    /// overlay. Idempotent; also runs on drop.
    pub fn unmount(&self) {
        self.observer.disable();
        self.replay.cancel();
        info!("overlay unmounted");
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.unmount();
    }
}
