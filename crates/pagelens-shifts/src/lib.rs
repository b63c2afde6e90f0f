//! # Pagelens Shifts
//!
//! The layout-instability core: consuming the host's push-based geometry
//! feed, filtering noise by policy, accumulating accepted shifts into a
//! scored log, and staging a cancellable visual replay of one historical
//! shift against the live page.
//!
//! Data flows one way: feed -> [`ShiftObserver`] (filter/normalize) ->
//! [`ShiftStore`] (accumulate) -> readers -> [`ReplayEngine`] (transient
//! overlay, guaranteed teardown).

pub mod error;
pub mod observer;
pub mod record;
pub mod replay;
pub mod store;

pub use error::ShiftError;
pub use observer::ShiftObserver;
pub use record::{LayoutShift, ShiftSource};
pub use replay::ReplayEngine;
pub use store::{ClsRating, ShiftStore};
