//! Inspection helpers exercised against a real element tree.

use pagelens_host_memory::{MemoryElement, MemoryPage};
use pagelens_inspect::{element_name, element_path, is_scroll_exempt, nearby_text, resolve_current_rect};
use pagelens_protocols::{CssPosition, Rect};

#[test]
fn test_scroll_exempt_via_fixed_ancestor() {
    let page = MemoryPage::new();
    let nav = MemoryElement::new("nav");
    nav.set_css_position(CssPosition::Fixed);
    let link = MemoryElement::new("a");
    page.root().append_child(&nav);
    nav.append_child(&link);

    assert!(is_scroll_exempt(&link.handle()));
    assert!(is_scroll_exempt(&nav.handle()));
}

#[test]
fn test_scroll_exempt_sticky_self() {
    let page = MemoryPage::new();
    let header = MemoryElement::new("header");
    header.set_css_position(CssPosition::Sticky);
    page.root().append_child(&header);

    assert!(is_scroll_exempt(&header.handle()));
}

#[test]
fn test_static_chain_not_exempt() {
    let page = MemoryPage::new();
    let section = MemoryElement::new("section");
    let div = MemoryElement::new("div");
    page.root().append_child(&section);
    section.append_child(&div);

    assert!(!is_scroll_exempt(&div.handle()));
}

#[test]
fn test_root_position_does_not_count() {
    // The walk excludes the root, whatever its computed position claims.
    let page = MemoryPage::new();
    page.root().set_css_position(CssPosition::Sticky);
    let div = MemoryElement::new("div");
    page.root().append_child(&div);

    assert!(!is_scroll_exempt(&div.handle()));
}

#[test]
fn test_element_path_prefers_id_then_class() {
    let page = MemoryPage::new();
    let section = MemoryElement::new("section");
    section.set_attribute("id", "pricing");
    let wrapper = MemoryElement::new("div");
    wrapper.set_classes(["card-grid"]);
    let img = MemoryElement::new("img");
    page.root().append_child(&section);
    section.append_child(&wrapper);
    wrapper.append_child(&img);

    assert_eq!(element_path(&img.handle(), 4), "#pricing > .card-grid > img");
}

#[test]
fn test_element_path_depth_bound() {
    let page = MemoryPage::new();
    let mut parent = page.root();
    for _ in 0..6 {
        let div = MemoryElement::new("div");
        parent.append_child(&div);
        parent = div;
    }

    let path = element_path(&parent.handle(), 4);
    assert_eq!(path, "div > div > div > div");
}

#[test]
fn test_element_path_skips_hashed_classes() {
    let page = MemoryPage::new();
    let div = MemoryElement::new("div");
    div.set_classes(["styles_hero__XK9QW2", "hero_banner"]);
    page.root().append_child(&div);

    // The readable stem before the underscore survives.
    assert_eq!(element_path(&div.handle(), 4), ".hero");
}

#[test]
fn test_element_names() {
    let page = MemoryPage::new();

    let button = MemoryElement::new("button");
    button.set_text("Add to cart");
    page.root().append_child(&button);
    assert_eq!(element_name(&button.handle()), "button \"Add to cart\"");

    let labelled = MemoryElement::new("button");
    labelled.set_attribute("aria-label", "Close dialog");
    page.root().append_child(&labelled);
    assert_eq!(element_name(&labelled.handle()), "button [Close dialog]");

    let link = MemoryElement::new("a");
    link.set_attribute("href", "/docs/getting-started");
    page.root().append_child(&link);
    assert_eq!(element_name(&link.handle()), "link to /docs/getting-started");

    let input = MemoryElement::new("input");
    input.set_attribute("placeholder", "Search");
    page.root().append_child(&input);
    assert_eq!(element_name(&input.handle()), "input \"Search\"");

    let heading = MemoryElement::new("h2");
    heading.set_text("Frequently asked questions");
    page.root().append_child(&heading);
    assert_eq!(
        element_name(&heading.handle()),
        "h2 \"Frequently asked questions\""
    );

    let image = MemoryElement::new("img");
    image.set_attribute("alt", "Team photo");
    page.root().append_child(&image);
    assert_eq!(element_name(&image.handle()), "image \"Team photo\"");

    let plain = MemoryElement::new("div");
    page.root().append_child(&plain);
    assert_eq!(element_name(&plain.handle()), "container");

    let region = MemoryElement::new("div");
    region.set_attribute("role", "dialog");
    page.root().append_child(&region);
    assert_eq!(element_name(&region.handle()), "dialog");

    let named = MemoryElement::new("span");
    named.set_attribute("data-element", "price tag");
    page.root().append_child(&named);
    assert_eq!(element_name(&named.handle()), "price tag");
}

#[test]
fn test_nearby_text_bounds() {
    let page = MemoryPage::new();
    let before = MemoryElement::new("p");
    before.set_text("Short intro");
    let target = MemoryElement::new("div");
    target.set_text("Own text");
    let after = MemoryElement::new("p");
    after.set_text(
        "This following sibling rambles on for far longer than the fifty \
         character limit allows, so it is dropped entirely.",
    );
    page.root().append_child(&before);
    page.root().append_child(&target);
    page.root().append_child(&after);

    let text = nearby_text(&target.handle()).expect("has context");
    assert!(text.contains("[before: \"Short intro\"]"));
    assert!(text.contains("Own text"));
    assert!(!text.contains("[after:"));
}

#[test]
fn test_ground_truth_beats_projection() {
    let page = MemoryPage::new();
    let el = MemoryElement::new("div");
    page.root().append_child(&el);
    el.set_bounding_rect(Rect::new(0.0, 400.0, 50.0, 50.0));

    let captured = Rect::new(0.0, 200.0, 50.0, 50.0);
    let weak = el.weak_handle();

    let (rect, live) = resolve_current_rect(Some(&weak), captured, 100.0, 150.0);
    assert!(live);
    assert_eq!(rect.y, 400.0);

    el.detach();
    let (rect, live) = resolve_current_rect(Some(&weak), captured, 100.0, 150.0);
    assert!(!live);
    assert_eq!(rect.y, 150.0);
}
