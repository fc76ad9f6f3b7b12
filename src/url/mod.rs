//! URL classification for recipe crawling
//!
//! Pure predicates that decide whether a discovered URL is a recipe detail
//! page, a recipe-adjacent listing worth following, or internal to the
//! target domain.

mod classify;
mod domain;

pub use classify::{is_internal_link, is_recipe_related_url, is_valid_recipe_url};
pub use domain::{extract_host, strip_www};
