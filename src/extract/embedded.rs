//! Structured embedded-data extraction
//!
//! The publishing platform embeds a machine-readable JSON document in each
//! recipe page under a fixed script element id. When present and parseable it
//! is the preferred source for every record field; any parse failure is
//! non-fatal and resolves per the configured fallback policy.

use crate::extract::record::RecipeRecord;
use crate::extract::time::strip_tags;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

/// The id of the script element carrying the recipe payload
const PAYLOAD_SCRIPT_ID: &str = "__POST_CONTENT__";

#[derive(Debug, Deserialize)]
struct EmbeddedRecipe {
    #[serde(default)]
    ingredients: Vec<IngredientGroup>,

    #[serde(rename = "cookAndPrepTime")]
    cook_and_prep_time: Option<CookAndPrepTime>,

    #[serde(default)]
    diet: Vec<DietEntry>,

    #[serde(rename = "skillLevel")]
    skill_level: Option<String>,

    #[serde(rename = "methodSteps", default)]
    method_steps: Vec<MethodStep>,

    #[serde(rename = "userRatings")]
    user_ratings: Option<UserRatings>,

    #[serde(default)]
    nutritions: Vec<NutritionEntry>,
}

#[derive(Debug, Deserialize)]
struct IngredientGroup {
    #[serde(default)]
    ingredients: Vec<IngredientEntry>,
}

#[derive(Debug, Deserialize)]
struct IngredientEntry {
    #[serde(rename = "quantityText", default)]
    quantity_text: String,

    #[serde(rename = "ingredientText", default)]
    ingredient_text: String,

    #[serde(default)]
    note: String,
}

impl IngredientEntry {
    /// Composes the display line: quantity and name joined, optional note in
    /// parentheses.
    fn display_line(&self) -> String {
        let mut line = format!("{} {}", self.quantity_text, self.ingredient_text)
            .trim()
            .to_string();
        if !self.note.is_empty() {
            line.push_str(&format!(" ({})", self.note));
        }
        line
    }
}

/// Times in the payload are given in seconds
#[derive(Debug, Deserialize)]
struct CookAndPrepTime {
    #[serde(rename = "preparationMax")]
    preparation_max: Option<u64>,

    #[serde(rename = "cookingMax")]
    cooking_max: Option<u64>,

    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DietEntry {
    #[serde(default)]
    display: String,
}

#[derive(Debug, Deserialize)]
struct MethodStep {
    #[serde(default)]
    content: Vec<StepContent>,
}

#[derive(Debug, Deserialize)]
struct StepContent {
    #[serde(rename = "type", default)]
    kind: String,

    #[serde(default)]
    data: StepData,
}

#[derive(Debug, Default, Deserialize)]
struct StepData {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct UserRatings {
    #[serde(default)]
    avg: f64,

    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct NutritionEntry {
    #[serde(default)]
    label: String,

    #[serde(default)]
    value: Value,

    #[serde(default)]
    unit: String,
}

impl NutritionEntry {
    /// A zero value counts as absent, like a missing entry.
    fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
            _ => String::new(),
        }
    }
}

/// Finds the raw payload text in the page, if the script element is present.
pub(crate) fn find_payload(document: &Html) -> Option<String> {
    let selector = Selector::parse(&format!("script#{}", PAYLOAD_SCRIPT_ID)).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .filter(|s| !s.trim().is_empty())
}

/// Populates the record from the payload.
///
/// Returns the deserialization error on malformed JSON or wrong types; the
/// caller decides how to degrade. Missing keys are tolerated and leave the
/// corresponding fields empty.
pub(crate) fn apply(payload: &str, record: &mut RecipeRecord) -> Result<(), serde_json::Error> {
    let recipe: EmbeddedRecipe = serde_json::from_str(payload)?;

    record.ingredients = recipe
        .ingredients
        .iter()
        .flat_map(|group| group.ingredients.iter())
        .map(IngredientEntry::display_line)
        .filter(|line| !line.is_empty())
        .collect();

    if let Some(times) = &recipe.cook_and_prep_time {
        // Source times are seconds; records carry whole minutes
        record.time.prep = times.preparation_max.map(|s| s / 60);
        record.time.cook = times.cooking_max.map(|s| s / 60);
        record.time.total = times.total.map(|s| s / 60);
    }

    record.dietary_labels = recipe
        .diet
        .iter()
        .map(|d| d.display.clone())
        .filter(|label| !label.is_empty())
        .collect();

    if let Some(skill) = recipe.skill_level {
        record.difficulty = skill;
    }

    record.instructions = recipe
        .method_steps
        .iter()
        .flat_map(|step| step.content.iter())
        .filter(|content| content.kind == "html" && !content.data.value.is_empty())
        .map(|content| strip_tags(&content.data.value))
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(ratings) = &recipe.user_ratings {
        record.ratings = format!("{}/5 ({} ratings)", ratings.avg, ratings.total);
    }

    record.fitness_relevance = recipe
        .nutritions
        .iter()
        .filter(|n| !n.label.is_empty() && !n.value_text().is_empty())
        .map(|n| format!("{}: {}{}", n.label, n.value_text(), n.unit))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(())
}
