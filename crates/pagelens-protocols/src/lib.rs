//! # Pagelens Protocols
//!
//! Host abstraction traits and shared types for the pagelens overlay engine.
//! Contains the boundary between the overlay and the page it is embedded in -
//! concrete hosts (a browser binding, the in-memory reference host) live in
//! sibling crates.
//!
//! ## Core Traits
//!
//! - [`ElementHandle`] - weak, liveness-checked view of one page element
//! - [`HostPage`] - scroll/viewport/clock access and overlay-node creation
//! - [`InstabilityFeed`] - push-based layout-instability entries
//! - [`Scheduler`] - rendering-frame callbacks and cancellable timeouts
//! - [`AuditEngine`] - external accessibility rule engine (boundary only)
//! - [`ComponentLabeler`] - optional UI-component name enrichment

pub mod audit;
pub mod element;
pub mod error;
pub mod feed;
pub mod labeler;
pub mod page;
pub mod scheduler;
pub mod types;

pub use audit::{AuditEngine, AuditFinding, AuditImpact, AuditSummary};
pub use element::{is_within_marked_subtree, ElementHandle, ElementRef, WeakElementRef};
pub use error::{AuditError, FeedError, LabelError};
pub use feed::{FeedHandler, FeedSubscription, InstabilityFeed, RawShiftEntry, RawShiftSource, SubscribeOptions};
pub use labeler::ComponentLabeler;
pub use page::{HostPage, OverlayNode, OverlayNodeKind, OverlayNodeRef, OverlayNodeSpec};
pub use scheduler::{FrameCallback, Scheduler, TimerHandle};
pub use types::{CssPosition, Rect};

/// Attribute marking the overlay's own root element. Subtrees carrying it are
/// never reported as shift sources and never audited.
pub const OVERLAY_ROOT_ATTR: &str = "data-pagelens-root";

/// Attribute marking an arbitrary host subtree as exempt from shift
/// attribution.
pub const IGNORE_SHIFT_ATTR: &str = "data-pagelens-ignore-shift";
