//! Recipe record extraction
//!
//! Converts a fetched page body into a [`RecipeRecord`]. Pages are classified
//! into a small closed set of extraction strategies by inspecting fixed
//! markers, then dispatched to the matching strategy implementation:
//!
//! 1. **Plugin markup** — the page carries the WPRM plugin's class naming
//!    convention; its specific selectors are used, falling back per field to
//!    the generic lists.
//! 2. **Embedded payload** — the page embeds a machine-readable JSON document
//!    in a known script element; preferred wherever parseable.
//! 3. **Generic** — neither marker present.
//!
//! When the embedded payload is absent or fails to parse, the configured
//! [`FallbackPolicy`] decides between heuristic selector scanning and an
//! all-empty record. No failure in this module is ever fatal to the crawl.

mod embedded;
mod heuristic;
mod record;
mod time;

pub use record::{CookTimes, RecipeRecord};
pub use time::parse_duration_minutes;

use crate::config::FallbackPolicy;
use scraper::{Html, Selector};

/// How a page will be (or was) extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// WPRM plugin class convention detected
    PluginMarkup,
    /// Embedded structured payload present
    Embedded,
    /// Neither marker found
    Generic,
}

/// Classifies a parsed page into an extraction strategy.
pub fn detect_strategy(document: &Html) -> ExtractionStrategy {
    if heuristic::has_plugin_markup(document) {
        ExtractionStrategy::PluginMarkup
    } else if embedded::find_payload(document).is_some() {
        ExtractionStrategy::Embedded
    } else {
        ExtractionStrategy::Generic
    }
}

/// Extracts a recipe record from a fetched page body.
///
/// Purely CPU-bound: no network I/O, no blocking. Every failure mode
/// degrades to empty fields rather than an error, so the crawl never aborts
/// on a malformed page.
pub fn extract(page_url: &str, page_body: &str, fallback: FallbackPolicy) -> RecipeRecord {
    let document = Html::parse_document(page_body);
    extract_document(page_url, &document, fallback)
}

/// Extracts a recipe record from an already-parsed page.
///
/// Callers that also scan the page for links parse it once and reuse the
/// document here.
pub fn extract_document(
    page_url: &str,
    document: &Html,
    fallback: FallbackPolicy,
) -> RecipeRecord {
    let mut record = RecipeRecord::new(page_url);
    record.title = extract_title(document);

    match detect_strategy(document) {
        ExtractionStrategy::PluginMarkup => {
            heuristic::extract_plugin(document, &mut record);
        }
        ExtractionStrategy::Embedded => {
            // find_payload succeeded during detection
            let payload = embedded::find_payload(document).unwrap_or_default();
            if let Err(e) = embedded::apply(&payload, &mut record) {
                tracing::debug!("Embedded payload unparseable for {}: {}", page_url, e);
                apply_fallback(document, &mut record, fallback);
            }
        }
        ExtractionStrategy::Generic => {
            apply_fallback(document, &mut record, fallback);
        }
    }

    record
}

fn apply_fallback(document: &Html, record: &mut RecipeRecord, fallback: FallbackPolicy) {
    match fallback {
        FallbackPolicy::Heuristic => heuristic::extract_generic(document, record),
        FallbackPolicy::Empty => {}
    }
}

/// The page's document title text, or empty string if absent.
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
