//! Human-readable element identification.
//!
//! Produces the short names shown next to annotations ("button \"Submit\"",
//! "link to /docs") and the bounded-depth selector paths stored as the
//! stable reference to an element. Heuristic by nature; output is for
//! humans, not for re-querying with guaranteed uniqueness.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use pagelens_protocols::{ElementHandle, ElementRef};

// Classes that look like css-module hashes or single-letter utilities carry
// no meaning for a human.
static SHORT_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{1,2}$").expect("pattern compiles"));
static HASH_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z0-9]{5,}").expect("pattern compiles"));

const CONTAINER_TAGS: &[&str] = &[
    "div", "section", "article", "nav", "header", "footer", "aside", "main",
];

/// Build a bounded-depth selector path for `element`.
///
/// Each segment prefers the element id, then the first meaningful class,
/// then the tag; the walk stops at the root or after `max_depth` segments.
pub fn element_path(element: &ElementRef, max_depth: usize) -> String {
    let mut parts = Vec::new();
    let mut current = Some(Arc::clone(element));
    let mut depth = 0;

    while let Some(el) = current {
        if depth >= max_depth || el.is_root() {
            break;
        }
        let tag = el.tag();
        if tag == "html" || tag == "body" {
            break;
        }

        let identifier = if let Some(id) = el.attribute("id") {
            format!("#{id}")
        } else if let Some(class) = meaningful_class(&el.classes()) {
            // css-module names keep their readable stem before the underscore
            let stem = class.split('_').next().unwrap_or("");
            format!(".{stem}")
        } else {
            tag
        };

        parts.push(identifier);
        current = el.parent();
        depth += 1;
    }

    parts.reverse();
    parts.join(" > ")
}

/// Short human-readable name for `element`.
pub fn element_name(element: &ElementRef) -> String {
    if let Some(name) = element.attribute("data-element") {
        return name;
    }

    let tag = element.tag();
    let text = element.text_content();

    match tag.as_str() {
        "button" => {
            if let Some(label) = element.attribute("aria-label") {
                return format!("button [{label}]");
            }
            match text {
                Some(t) => format!("button \"{}\"", clip(&t, 25)),
                None => "button".to_string(),
            }
        }
        "a" => {
            if let Some(t) = text {
                return format!("link \"{}\"", clip(&t, 25));
            }
            match element.attribute("href") {
                Some(href) => format!("link to {}", clip(&href, 30)),
                None => "link".to_string(),
            }
        }
        "input" => {
            if let Some(placeholder) = element.attribute("placeholder") {
                return format!("input \"{placeholder}\"");
            }
            if let Some(name) = element.attribute("name") {
                return format!("input [{name}]");
            }
            let kind = element
                .attribute("type")
                .unwrap_or_else(|| "text".to_string());
            format!("{kind} input")
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => match text {
            Some(t) => format!("{tag} \"{}\"", clip(&t, 35)),
            None => tag.clone(),
        },
        "p" => match text {
            Some(t) => {
                let ellipsis = if t.chars().count() > 40 { "..." } else { "" };
                format!("paragraph: \"{}{ellipsis}\"", clip(&t, 40))
            }
            None => "paragraph".to_string(),
        },
        "span" | "label" => match text {
            Some(t) if t.chars().count() < 40 => format!("\"{t}\""),
            _ => tag.clone(),
        },
        "li" => match text {
            Some(t) if t.chars().count() < 40 => {
                format!("list item: \"{}\"", clip(&t, 35))
            }
            _ => "list item".to_string(),
        },
        "img" => match element.attribute("alt") {
            Some(alt) => format!("image \"{}\"", clip(&alt, 30)),
            None => "image".to_string(),
        },
        "video" => "video".to_string(),
        "svg" => "icon".to_string(),
        _ if CONTAINER_TAGS.contains(&tag.as_str()) => container_name(element, &tag),
        _ => tag.clone(),
    }
}

fn container_name(element: &ElementRef, tag: &str) -> String {
    if let Some(label) = element.attribute("aria-label") {
        return format!("{tag} [{label}]");
    }
    if let Some(role) = element.attribute("role") {
        return role;
    }

    let words: Vec<String> = element
        .classes()
        .iter()
        .flat_map(|c| c.split(['_', '-']).map(str::to_string))
        .map(|c| HASH_LIKE.replace(&c, "").to_string())
        .filter(|c| c.len() > 2 && !SHORT_CLASS.is_match(c))
        .take(2)
        .collect();
    if !words.is_empty() {
        return words.join(" ");
    }

    if tag == "div" {
        "container".to_string()
    } else {
        tag.to_string()
    }
}

/// Text surrounding `element`, bounded, for annotation context.
pub fn nearby_text(element: &ElementRef) -> Option<String> {
    let mut texts = Vec::new();

    if let Some(before) = element.preceding_sibling_text() {
        if before.chars().count() < 50 {
            texts.push(format!("[before: \"{}\"]", clip(&before, 40)));
        }
    }
    if let Some(own) = element.text_content() {
        if own.chars().count() < 100 {
            texts.push(own);
        }
    }
    if let Some(after) = element.following_sibling_text() {
        if after.chars().count() < 50 {
            texts.push(format!("[after: \"{}\"]", clip(&after, 40)));
        }
    }

    if texts.is_empty() {
        None
    } else {
        Some(texts.join(" "))
    }
}

/// Space-joined class list, when any classes are present.
pub fn element_classes(element: &ElementRef) -> Option<String> {
    let classes = element.classes();
    if classes.is_empty() {
        None
    } else {
        Some(classes.join(" "))
    }
}

fn meaningful_class(classes: &[String]) -> Option<String> {
    classes
        .iter()
        .find(|c| c.len() > 2 && !SHORT_CLASS.is_match(c) && !HASH_LIKE.is_match(c))
        .cloned()
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meaningful_class_skips_hashes() {
        let classes = vec![
            "a".to_string(),
            "styles_hero__XK9QW2".to_string(),
            "hero-banner".to_string(),
        ];
        assert_eq!(meaningful_class(&classes), Some("hero-banner".to_string()));
    }

    #[test]
    fn test_meaningful_class_none() {
        let classes = vec!["x".to_string(), "ab".to_string()];
        assert_eq!(meaningful_class(&classes), None);
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        assert_eq!(clip("héllo wörld", 5), "héllo");
        assert_eq!(clip("hi", 10), "hi");
    }
}
