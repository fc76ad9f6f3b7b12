//! Ladle: a single-site recipe crawler
//!
//! This crate crawls one recipe-publishing site, starting from its `/recipes`
//! listing page, follows internal recipe links, and extracts a structured
//! [`RecipeRecord`](extract::RecipeRecord) per recipe detail page.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for ladle operations
#[derive(Debug, Error)]
pub enum LadleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for ladle operations
pub type Result<T> = std::result::Result<T, LadleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract, RecipeRecord};
pub use url::{is_internal_link, is_recipe_related_url, is_valid_recipe_url};
