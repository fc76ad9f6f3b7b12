//! Heuristic HTML-selector extraction
//!
//! Best-effort extraction for pages without a parseable structured payload.
//! Each field has a prioritized list of candidate selectors, tried in order
//! until one yields results; minimum text lengths filter out noise. Pages
//! built with the WPRM recipe plugin are recognized by its class naming
//! convention and get the plugin's specific selectors ahead of the generic
//! lists.

use crate::extract::record::RecipeRecord;
use crate::extract::time::parse_duration_minutes;
use scraper::{ElementRef, Html, Selector};

/// Ingredient lines shorter than this are noise
const MIN_INGREDIENT_LEN: usize = 6;

/// Instruction steps shorter than this are noise
const MIN_INSTRUCTION_LEN: usize = 11;

/// Marker classes identifying the WPRM recipe plugin
const PLUGIN_MARKER_SELECTOR: &str = ".wprm-recipe-ingredient, .wprm-recipe-instruction";

/// Returns true if the page uses the WPRM plugin's markup convention.
pub(crate) fn has_plugin_markup(document: &Html) -> bool {
    match Selector::parse(PLUGIN_MARKER_SELECTOR) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

/// Scans the page with the generic selector lists.
pub(crate) fn extract_generic(document: &Html, record: &mut RecipeRecord) {
    record.ingredients = collect_items(
        document,
        &[
            ".ingredients li",
            ".recipe-ingredients li",
            ".ingredient-list li",
            r#"[class*="ingredient"] li"#,
            "ul li",
        ],
        MIN_INGREDIENT_LEN,
    );

    record.instructions = collect_items(
        document,
        &[
            ".instructions li",
            ".recipe-instructions li",
            ".method li",
            ".steps li",
            r#"[class*="instruction"] li"#,
            "ol li",
        ],
        MIN_INSTRUCTION_LEN,
    )
    .join("\n");

    extract_times(
        document,
        record,
        &[
            ".prep-time",
            ".cook-time",
            ".total-time",
            ".recipe-time",
            r#"[class*="time"]"#,
        ],
    );

    record.dietary_labels = collect_split_labels(
        document,
        &[
            ".dietary-labels",
            ".recipe-tags",
            ".tags",
            r#"[class*="diet"]"#,
            r#"[class*="tag"]"#,
        ],
    );

    record.difficulty = first_text(
        document,
        &[
            ".difficulty",
            ".skill-level",
            r#"[class*="difficulty"]"#,
            r#"[class*="skill"]"#,
        ],
    );

    record.ratings = first_text(document, &[".rating", ".stars", r#"[class*="rating"]"#]);

    record.fitness_relevance =
        collect_all_texts(document, &[".nutrition", ".nutrition-info", r#"[class*="nutrition"]"#])
            .join(", ");
}

/// Scans the page with the WPRM plugin's selectors, falling back per field to
/// the generic candidates.
pub(crate) fn extract_plugin(document: &Html, record: &mut RecipeRecord) {
    record.ingredients = collect_items(document, &[".wprm-recipe-ingredient"], MIN_INGREDIENT_LEN);
    if record.ingredients.is_empty() {
        record.ingredients = collect_items(
            document,
            &[
                r#"[class*="ingredient"] li"#,
                ".ingredients li",
                ".recipe-ingredients li",
            ],
            MIN_INGREDIENT_LEN,
        );
    }

    let steps = collect_items(document, &[".wprm-recipe-instruction"], MIN_INSTRUCTION_LEN);
    record.instructions = if steps.is_empty() {
        collect_items(
            document,
            &[
                r#"[class*="instruction"] li"#,
                ".instructions li",
                ".recipe-instructions li",
                "ol li",
            ],
            MIN_INSTRUCTION_LEN,
        )
        .join("\n")
    } else {
        steps.join("\n")
    };

    extract_times(document, record, &[r#"[class*="time"]"#]);

    // The plugin has no dedicated dietary markup; recipe tags stand in
    record.dietary_labels = dedup_preserving_order(
        collect_all_texts(document, &[".wprm-recipe-tag", ".recipe-tags", ".tags", r#"[class*="tag"]"#])
            .into_iter()
            .filter(|tag| tag.len() > 2)
            .collect(),
    );

    record.difficulty = first_text(
        document,
        &[".wprm-recipe-difficulty", ".difficulty", ".skill-level"],
    );

    record.ratings = first_text(document, &[".wprm-recipe-rating", ".rating", ".stars"]);

    record.fitness_relevance =
        collect_all_texts(document, &[".wprm-recipe-nutrition", ".nutrition", ".nutrition-info"])
            .join(", ");
}

/// Classifies time elements by prep/cook/total substrings in their own text
/// and parses a duration from each.
fn extract_times(document: &Html, record: &mut RecipeRecord, selectors: &[&str]) {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        for element in document.select(&selector) {
            let text = element_text(&element).to_lowercase();
            if text.contains("prep") {
                record.time.prep = Some(parse_duration_minutes(&text));
            } else if text.contains("cook") {
                record.time.cook = Some(parse_duration_minutes(&text));
            } else if text.contains("total") {
                record.time.total = Some(parse_duration_minutes(&text));
            }
        }
    }
}

/// Tries each selector in order; the first one yielding any items long enough
/// wins.
fn collect_items(document: &Html, selectors: &[&str], min_len: usize) -> Vec<String> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        let items: Vec<String> = document
            .select(&selector)
            .map(|element| element_text(&element))
            .filter(|text| text.len() >= min_len)
            .collect();

        if !items.is_empty() {
            return items;
        }
    }

    Vec::new()
}

/// Collects text from every element matched by any of the selectors.
fn collect_all_texts(document: &Html, selectors: &[&str]) -> Vec<String> {
    let mut texts = Vec::new();

    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        for element in document.select(&selector) {
            let text = element_text(&element);
            if !text.is_empty() {
                texts.push(text);
            }
        }
    }

    texts
}

/// Collects comma-separated label fragments from every matched element.
fn collect_split_labels(document: &Html, selectors: &[&str]) -> Vec<String> {
    dedup_preserving_order(
        collect_all_texts(document, selectors)
            .iter()
            .flat_map(|text| text.split(','))
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect(),
    )
}

/// Labels are set-like: overlapping selectors may match the same element, so
/// repeats are dropped while keeping first-seen order.
fn dedup_preserving_order(labels: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

/// Text of the first element matching any selector, or empty.
fn first_text(document: &Html, selectors: &[&str]) -> String {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        if let Some(element) = document.select(&selector).next() {
            let text = element_text(&element);
            if !text.is_empty() {
                return text;
            }
        }
    }

    String::new()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
