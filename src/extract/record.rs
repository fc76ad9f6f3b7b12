use serde::{Deserialize, Serialize};

/// Prep/cook/total times in whole minutes.
///
/// Absent fields mean the page did not state that time, not that it is zero.
/// Absent fields are omitted from serialized output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookTimes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl CookTimes {
    pub fn is_empty(&self) -> bool {
        self.prep.is_none() && self.cook.is_none() && self.total.is_none()
    }
}

/// The canonical output unit: one structured record per recipe page.
///
/// Every record carries a non-empty `url`; all other fields default to their
/// empty representation (empty string, empty list, all-unknown times) rather
/// than being absent, so consumers never branch on missing keys. A record is
/// fully populated during extraction and never mutated after emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// The canonical page address (unique key)
    pub url: String,

    /// The page's document title, or empty if absent
    pub title: String,

    /// One entry per ingredient line, in page order
    pub ingredients: Vec<String>,

    /// Prep/cook/total times in minutes
    pub time: CookTimes,

    /// Short dietary tags, e.g. "vegetarian"
    pub dietary_labels: Vec<String>,

    /// Nutrition facts as comma-joined "label: value" fragments, with the
    /// unit appended directly to the value (e.g. "Calories: 250kcal")
    pub fitness_relevance: String,

    /// Skill label, e.g. "Easy"
    pub difficulty: String,

    /// Newline-joined ordered preparation steps
    pub instructions: String,

    /// Rating summary, e.g. "4.5/5 (10 ratings)"
    pub ratings: String,
}

impl RecipeRecord {
    /// Creates a record for the given page with all other fields empty.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            ingredients: Vec::new(),
            time: CookTimes::default(),
            dietary_labels: Vec::new(),
            fitness_relevance: String::new(),
            difficulty: String::new(),
            instructions: String::new(),
            ratings: String::new(),
        }
    }
}
