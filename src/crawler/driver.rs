//! Crawl driver - per-page decision logic
//!
//! The driver owns the visited-URL frontier and decides, for each fetched
//! page, whether to extract a record and which outgoing links to hand back to
//! the engine's queue. It performs no I/O of its own.

use crate::config::{Config, DiscoveryBreadth, FallbackPolicy};
use crate::crawler::fetcher::FetchedPage;
use crate::crawler::links::extract_links;
use crate::extract::{extract_document, RecipeRecord};
use crate::url::{is_internal_link, is_recipe_related_url, is_valid_recipe_url};
use scraper::Html;
use std::collections::HashSet;
use std::sync::Mutex;
use url::Url;

/// The set of URLs already processed, guarding against re-visitation in
/// cyclic link structures.
///
/// The check-and-insert is a single atomic step so that two concurrent
/// callbacks for the same URL cannot both observe "not yet visited".
#[derive(Debug, Default)]
pub struct Frontier {
    visited: Mutex<HashSet<String>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL visited. Returns true only for the first caller; later
    /// calls for the same URL return false.
    pub fn try_mark_visited(&self, url: &str) -> bool {
        let mut visited = self.visited.lock().expect("frontier mutex poisoned");
        visited.insert(url.to_string())
    }

    /// Number of URLs seen so far.
    pub fn len(&self) -> usize {
        self.visited.lock().expect("frontier mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What the driver decided for one fetched page
#[derive(Debug, Default)]
pub struct PageOutcome {
    /// The extracted record, if the page is a recipe detail page
    pub record: Option<RecipeRecord>,

    /// Internal links worth enqueueing for further crawling
    pub links: Vec<Url>,
}

/// Per-page decision logic over the crawl state machine:
/// `Unseen -> Visited(skipped | extracted)`.
pub struct Driver {
    domain: String,
    fallback: FallbackPolicy,
    breadth: DiscoveryBreadth,
    frontier: Frontier,
}

impl Driver {
    pub fn new(config: &Config) -> Self {
        Self {
            domain: config.site.domain.clone(),
            fallback: config.extraction.fallback_policy,
            breadth: config.extraction.discovery_breadth,
            frontier: Frontier::new(),
        }
    }

    /// Processes one fetched page.
    ///
    /// Already-visited URLs are dropped: no record, no links. Otherwise the
    /// URL is marked visited immediately, the page is extracted if it is a
    /// recipe detail page, and outgoing links are filtered down to internal
    /// URLs that pass the configured discovery breadth.
    pub fn handle_page(&self, page: &FetchedPage) -> PageOutcome {
        let url_str = page.url.as_str();

        if !self.frontier.try_mark_visited(url_str) {
            tracing::debug!("Already visited, dropping: {}", url_str);
            return PageOutcome::default();
        }

        // One parse serves both extraction and link discovery
        let document = Html::parse_document(&page.body);

        let record = if is_valid_recipe_url(url_str) {
            tracing::debug!("Extracting recipe from {}", url_str);
            Some(extract_document(url_str, &document, self.fallback))
        } else {
            None
        };

        let links = extract_links(&document, &page.url)
            .into_iter()
            .filter(|link| self.should_follow(link.as_str()))
            .collect();

        PageOutcome { record, links }
    }

    /// Discovery filter applied to every outgoing link.
    fn should_follow(&self, url: &str) -> bool {
        if !is_internal_link(url, &self.domain) {
            return false;
        }

        match self.breadth {
            DiscoveryBreadth::Strict => is_valid_recipe_url(url),
            DiscoveryBreadth::Permissive => {
                is_valid_recipe_url(url) || is_recipe_related_url(url)
            }
        }
    }

    /// Read access for progress reporting.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }
}
