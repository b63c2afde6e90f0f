//! # Pagelens Annotations
//!
//! Annotation records and the scroll-aware marker anchoring that keeps them
//! visually pinned as the page scrolls. Reuses the coordinate model's
//! fixed/sticky ancestry rule at capture time; rendering then works purely
//! from stored flags, because the anchored element may no longer exist.

pub mod labeler;
pub mod positioner;
pub mod record;
pub mod store;

pub use labeler::{NullLabeler, SafeLabeler};
pub use positioner::{anchor_at, marker_position, AnnotationAnchor, MarkerPosition};
pub use record::Annotation;
pub use store::{AnnotationRequest, AnnotationStore};
