use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%b %d, %Y %H:%M";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Renders an ISO-8601 timestamp as `Mar 15, 2024 14:30`.
///
/// The wall-clock time is shown as written, in whatever offset it carries.
/// Input that does not parse, including input with surrounding whitespace,
/// is returned unchanged.
pub fn format_datetime(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::debug!("Unparseable timestamp kept as-is: {}", raw);
            raw.to_string()
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    // chrono skips leading whitespace before numeric fields.
    if raw.trim() != raw {
        return None;
    }
    let normalized = raw.replace('Z', "+00:00");

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
        .map(|dt| dt.naive_local())
        .or_else(|| {
            LOCAL_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
