//! Configuration module for ladle
//!
//! Handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use ladle::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling {}", config.site.domain);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{
    Config, CrawlerConfig, DiscoveryBreadth, ExtractionConfig, FallbackPolicy, OutputConfig,
    SiteConfig, UserAgentConfig,
};
