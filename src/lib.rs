//! # Pagelens
//!
//! An embeddable in-page developer overlay engine: layout-instability
//! detection, scoring and replay, scroll-aware annotation anchoring, and an
//! accessibility-audit boundary with guaranteed self-exclusion.
//!
//! The only programmatic surface is [`Overlay::mount`] / [`Overlay::unmount`]
//! plus the per-feature toggles on [`Overlay`]. Everything lives in process
//! memory and resets with the page; nothing is persisted and nothing talks
//! to the network.
//!
//! Hosts are abstracted behind the traits in [`pagelens_protocols`]; the
//! `pagelens-host-memory` crate ships a headless reference host used
//! throughout the test suites.

pub mod audit;
pub mod entrance;
pub mod error;
pub mod overlay;

pub use audit::AuditReport;
pub use entrance::EntranceAnimation;
pub use error::OverlayError;
pub use overlay::{Overlay, OverlayHost};

// The types an embedder touches day to day, re-exported from the member
// crates.
pub use pagelens_annotations::{Annotation, AnnotationRequest, MarkerPosition, NullLabeler};
pub use pagelens_config::{AnnotationsConfig, OverlayConfig, ReplayConfig, ShiftsConfig};
pub use pagelens_protocols::{
    AuditEngine, AuditError, AuditFinding, AuditImpact, AuditSummary, ComponentLabeler,
    CssPosition, ElementHandle, ElementRef, FeedError, HostPage, InstabilityFeed, LabelError,
    Rect, Scheduler, WeakElementRef, IGNORE_SHIFT_ATTR, OVERLAY_ROOT_ATTR,
};
pub use pagelens_shifts::{ClsRating, LayoutShift, ShiftSource};
