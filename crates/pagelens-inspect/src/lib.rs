//! # Pagelens Inspect
//!
//! Pure, read-only helpers over the host abstraction: the shared
//! viewport/document coordinate model, natural-language shift descriptions,
//! and human-readable element identification. No state, no subscriptions -
//! everything here is a function of its inputs and the live tree.

pub mod coords;
pub mod describe;
pub mod identify;

pub use coords::{is_scroll_exempt, live_rect, project, resolve_current_rect};
pub use describe::{describe, SourceChange};
pub use identify::{element_classes, element_name, element_path, nearby_text};
