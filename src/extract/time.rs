//! Free-text duration parsing and markup cleanup
//!
//! Recipe pages state durations in loose prose ("15 minutes", "1h 30m",
//! "2 hrs"). The parser tries a fixed pattern list in order; the first
//! pattern that matches wins, and unrecognized text yields 0.

use once_cell::sync::Lazy;
use regex::Regex;

static MINUTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*minutes?").expect("valid regex"));

static HOURS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*hours?").expect("valid regex"));

static HOURS_MINUTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)h\s*(\d+)m").expect("valid regex"));

static HRS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*hrs?").expect("valid regex"));

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Parses a duration in minutes out of free text.
///
/// Recognized forms, tried in order: "N minutes", "N hours", "NhNm"
/// (e.g. "1h 30m"), "N hrs". Unmatched text yields 0.
pub fn parse_duration_minutes(text: &str) -> u64 {
    if let Some(caps) = MINUTES_RE.captures(text) {
        return parse_group(&caps, 1);
    }

    if let Some(caps) = HOURS_RE.captures(text) {
        return parse_group(&caps, 1) * 60;
    }

    if let Some(caps) = HOURS_MINUTES_RE.captures(text) {
        return parse_group(&caps, 1) * 60 + parse_group(&caps, 2);
    }

    if let Some(caps) = HRS_RE.captures(text) {
        return parse_group(&caps, 1) * 60;
    }

    0
}

fn parse_group(caps: &regex::Captures<'_>, index: usize) -> u64 {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Removes HTML tags from a text fragment and trims surrounding whitespace.
///
/// Used on embedded instruction-step fragments, which carry inline markup.
pub fn strip_tags(fragment: &str) -> String {
    TAG_RE.replace_all(fragment, "").trim().to_string()
}
