//! Natural-language descriptions of geometric change.

use pagelens_protocols::Rect;

/// Per-axis dead-band: movement at or below this many pixels is noise.
const AXIS_DEADBAND_PX: f64 = 1.0;

/// How many sources contribute to a combined description.
const MAX_DESCRIBED_SOURCES: usize = 2;

/// Before/after geometry of one source, as fed to [`describe`].
#[derive(Debug, Clone, Copy)]
pub struct SourceChange<'a> {
    /// Stable selector, when one is known.
    pub selector: Option<&'a str>,
    pub previous: Rect,
    pub current: Rect,
}

/// Build a short human-readable description of a set of source changes.
///
/// Movement beyond the 1px dead-band on an axis reads as
/// `"<selector> moved <direction> <n>px"`, both axes joined with `" and "`;
/// a pure size change reads as `"<selector> resized"`; anything else as
/// `"<selector> shifted"`. At most the first two sources are described,
/// joined with `", "`. An empty list yields `"Unknown shift"`.
pub fn describe(sources: &[SourceChange<'_>]) -> String {
    if sources.is_empty() {
        return "Unknown shift".to_string();
    }

    sources
        .iter()
        .take(MAX_DESCRIBED_SOURCES)
        .map(describe_one)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_one(source: &SourceChange<'_>) -> String {
    let selector = source.selector.unwrap_or("element");
    let delta_x = source.current.x - source.previous.x;
    let delta_y = source.current.y - source.previous.y;

    let mut movements = Vec::new();
    if delta_x.abs() > AXIS_DEADBAND_PX {
        let direction = if delta_x > 0.0 { "right" } else { "left" };
        movements.push(format!("{} {}px", direction, delta_x.round().abs() as i64));
    }
    if delta_y.abs() > AXIS_DEADBAND_PX {
        let direction = if delta_y > 0.0 { "down" } else { "up" };
        movements.push(format!("{} {}px", direction, delta_y.round().abs() as i64));
    }

    if movements.is_empty() {
        let width_change = source.current.width - source.previous.width;
        let height_change = source.current.height - source.previous.height;
        if width_change.abs() > AXIS_DEADBAND_PX || height_change.abs() > AXIS_DEADBAND_PX {
            return format!("{selector} resized");
        }
        return format!("{selector} shifted");
    }

    format!("{selector} moved {}", movements.join(" and "))
}
