//! Tests for feed consumption and filtering.

use std::sync::Arc;

use pagelens_config::ShiftsConfig;
use pagelens_host_memory::{MemoryElement, MemoryFeed, MemoryPage};
use pagelens_protocols::{RawShiftEntry, RawShiftSource, Rect, IGNORE_SHIFT_ATTR, OVERLAY_ROOT_ATTR};

use crate::error::ShiftError;
use crate::observer::ShiftObserver;
use crate::store::{ClsRating, ShiftStore};

fn observer(
    feed: &Arc<MemoryFeed>,
    page: &Arc<MemoryPage>,
    store: &Arc<ShiftStore>,
) -> ShiftObserver {
    let feed: Arc<dyn pagelens_protocols::InstabilityFeed> = feed.clone();
    let page: Arc<dyn pagelens_protocols::HostPage> = page.clone();
    ShiftObserver::new(feed, page, Arc::clone(store), ShiftsConfig::default())
}

fn moving_source(element: Option<&Arc<MemoryElement>>, delta_y: f64) -> RawShiftSource {
    RawShiftSource {
        element: element.map(|el| el.weak_handle()),
        previous_rect: Rect::new(0.0, 0.0, 100.0, 50.0),
        current_rect: Rect::new(0.0, delta_y, 100.0, 50.0),
    }
}

fn entry(value: f64, sources: Vec<RawShiftSource>) -> RawShiftEntry {
    RawShiftEntry {
        value,
        had_recent_input: false,
        sources,
    }
}

#[test]
fn test_accepts_and_describes_shift() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);

    page.set_scroll_y(40.0);
    page.advance_clock(1000.0);
    observer.enable().expect("feed supported");

    feed.emit(entry(0.05, vec![moving_source(None, 30.0)]));

    assert_eq!(store.len(), 1);
    let shift = &store.shifts()[0];
    assert!(shift.description.contains("down 30px"));
    assert_eq!(shift.scroll_y, 40.0);
    assert_eq!(shift.timestamp, 1000.0);
    assert!(!shift.id.is_empty());
    assert!((store.cumulative_cls() - 0.05).abs() < 1e-9);
    assert_eq!(store.rating(), ClsRating::Good);
}

#[test]
fn test_recent_input_dropped() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);
    observer.enable().expect("feed supported");

    feed.emit(RawShiftEntry {
        value: 0.9,
        had_recent_input: true,
        sources: vec![moving_source(None, 30.0)],
    });

    assert!(store.is_empty());
}

#[test]
fn test_below_threshold_dropped() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);
    observer.enable().expect("feed supported");

    feed.emit(entry(0.009, vec![moving_source(None, 30.0)]));
    assert!(store.is_empty());

    // At the line it is kept: the comparison is strict.
    feed.emit(entry(0.01, vec![moving_source(None, 30.0)]));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_ignored_subtree_source_dropped() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);
    observer.enable().expect("feed supported");

    let ignored_parent = MemoryElement::new("div");
    ignored_parent.set_attribute(IGNORE_SHIFT_ATTR, "");
    let inside = MemoryElement::new("img");
    page.root().append_child(&ignored_parent);
    ignored_parent.append_child(&inside);

    // Every source filtered away: the entry disappears entirely.
    feed.emit(entry(0.2, vec![moving_source(Some(&inside), 30.0)]));
    assert!(store.is_empty());

    // A surviving sibling source keeps the entry alive.
    let kept = MemoryElement::new("img");
    page.root().append_child(&kept);
    feed.emit(entry(
        0.2,
        vec![
            moving_source(Some(&inside), 30.0),
            moving_source(Some(&kept), 12.0),
        ],
    ));
    assert_eq!(store.len(), 1);
    assert_eq!(store.shifts()[0].sources.len(), 1);
}

#[test]
fn test_overlay_root_excluded() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);
    observer.enable().expect("feed supported");

    let toolbar = MemoryElement::new("div");
    toolbar.set_attribute(OVERLAY_ROOT_ATTR, "");
    let button = MemoryElement::new("button");
    page.root().append_child(&toolbar);
    toolbar.append_child(&button);

    feed.emit(entry(0.3, vec![moving_source(Some(&button), 30.0)]));
    assert!(store.is_empty());
}

#[test]
fn test_selector_derived_from_live_element() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);
    observer.enable().expect("feed supported");

    let hero = MemoryElement::new("section");
    hero.set_attribute("id", "hero");
    page.root().append_child(&hero);

    feed.emit(entry(0.05, vec![moving_source(Some(&hero), 30.0)]));

    let shift = &store.shifts()[0];
    assert_eq!(shift.sources[0].selector.as_deref(), Some("#hero"));
    assert!(shift.description.contains("#hero moved down 30px"));
}

#[test]
fn test_disable_stops_delivery() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);
    observer.enable().expect("feed supported");

    feed.emit(entry(0.05, vec![moving_source(None, 30.0)]));
    assert_eq!(store.len(), 1);

    observer.disable();
    assert!(!observer.is_enabled());
    assert_eq!(feed.subscriber_count(), 0);

    feed.emit(entry(0.05, vec![moving_source(None, 30.0)]));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_reenable_creates_fresh_subscription() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);

    observer.enable().expect("feed supported");
    observer.disable();
    observer.enable().expect("feed supported");
    assert_eq!(feed.subscriber_count(), 1);

    // Enabling while enabled does not stack subscriptions.
    observer.enable().expect("feed supported");
    assert_eq!(feed.subscriber_count(), 1);
}

#[test]
fn test_buffered_entries_delivered_on_enable() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);

    feed.emit(entry(0.05, vec![moving_source(None, 30.0)]));
    observer.enable().expect("feed supported");

    assert_eq!(store.len(), 1);
}

#[test]
fn test_unsupported_feed_latches() {
    let feed = MemoryFeed::unsupported();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);

    assert!(!observer.is_supported());
    assert!(matches!(observer.enable(), Err(ShiftError::Unsupported)));
    assert!(!observer.is_enabled());
}

#[test]
fn test_subscription_failure_latches_unsupported() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);

    feed.fail_next_subscribe();
    assert!(matches!(observer.enable(), Err(ShiftError::Unsupported)));

    // The feed would accept a new subscription now, but the failure is
    // permanent for the session: no retry happens.
    assert!(matches!(observer.enable(), Err(ShiftError::Unsupported)));
    assert!(!observer.is_supported());
    assert_eq!(feed.subscriber_count(), 0);
}

#[test]
fn test_entry_with_no_sources_dropped() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);
    observer.enable().expect("feed supported");

    feed.emit(entry(0.5, Vec::new()));
    assert!(store.is_empty());
}

#[test]
fn test_detached_source_kept_with_stale_reference() {
    let feed = MemoryFeed::new();
    let page = MemoryPage::new();
    let store = Arc::new(ShiftStore::new());
    let observer = observer(&feed, &page, &store);
    observer.enable().expect("feed supported");

    let el = MemoryElement::new("div");
    page.root().append_child(&el);
    let source = moving_source(Some(&el), 30.0);
    el.detach();
    drop(el);

    feed.emit(entry(0.05, vec![source]));

    // The movement is still recorded; the reference is simply stale.
    assert_eq!(store.len(), 1);
    assert!(store.shifts()[0].sources[0].selector.is_none());
}
