//! # Pagelens Memory Host
//!
//! In-memory implementation of the host abstraction: an element tree with
//! explicit geometry, an instability feed driven by `emit`, and two
//! schedulers - a manually pumped one for deterministic tests and a
//! tokio-backed one for real-time embedding. This is the reference host; a
//! browser binding implements the same traits against the real page.

pub mod element;
pub mod feed;
pub mod page;
pub mod scheduler;

pub use element::MemoryElement;
pub use feed::MemoryFeed;
pub use page::{MemoryOverlayNode, MemoryPage};
pub use scheduler::{ManualScheduler, TokioScheduler};
