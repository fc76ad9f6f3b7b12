//! Crawler module: page fetching, traversal, and orchestration
//!
//! The driver holds the decision logic (what to extract, what to follow);
//! the engine holds everything operational (queue, concurrency, HTTP).

mod driver;
mod engine;
mod fetcher;
mod links;

pub use driver::{Driver, Frontier, PageOutcome};
pub use engine::{CrawlStats, Engine};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome, FetchedPage};
pub use links::extract_links;

use crate::config::Config;
use crate::output::JsonLinesSink;
use crate::LadleError;
use std::path::Path;

/// Runs a complete crawl: seeds the site's recipe listing page, follows
/// recipe links, and appends extracted records to the configured JSON Lines
/// file.
pub async fn crawl(config: Config) -> Result<CrawlStats, LadleError> {
    let sink = JsonLinesSink::create(Path::new(&config.output.records_path))?;
    let engine = Engine::new(&config, sink)?;
    let (stats, _sink) = engine.run().await?;
    Ok(stats)
}
