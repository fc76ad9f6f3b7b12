//! Fetch/dispatch engine
//!
//! The engine owns the pending-request queue and all network concerns:
//! dispatching fetches with bounded concurrency, a fixed delay between
//! dispatches, transport-level URL deduplication, and handing each fetched
//! page to the driver. Records the driver produces are streamed to the
//! configured sink. The crawl terminates when the queue is empty and no
//! fetch is in flight.

use crate::config::Config;
use crate::crawler::driver::Driver;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::output::RecordSink;
use crate::LadleError;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// Counters reported at the end of a crawl
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlStats {
    pub pages_fetched: u64,
    pub records_emitted: u64,
    pub links_enqueued: u64,
    pub fetch_errors: u64,
}

/// Crawl engine: queue, client, driver, and sink
pub struct Engine<S: RecordSink> {
    client: Client,
    driver: Driver,
    sink: S,
    queue: VecDeque<Url>,
    /// Transport-level dedup: every URL ever enqueued
    enqueued: HashSet<String>,
    max_concurrent: usize,
    dispatch_delay: Duration,
    stats: CrawlStats,
}

impl<S: RecordSink> Engine<S> {
    /// Creates an engine seeded with the site's recipe listing page.
    pub fn new(config: &Config, sink: S) -> Result<Self, LadleError> {
        let client = build_http_client(&config.user_agent)?;
        let driver = Driver::new(config);

        let seed = config.site.seed_url();
        let seed_url = Url::parse(&seed)?;

        let mut enqueued = HashSet::new();
        enqueued.insert(seed_url.to_string());

        let mut queue = VecDeque::new();
        queue.push_back(seed_url);

        Ok(Self {
            client,
            driver,
            sink,
            queue,
            enqueued,
            max_concurrent: config.crawler.max_concurrent_requests as usize,
            dispatch_delay: Duration::from_millis(config.crawler.request_delay_ms),
            stats: CrawlStats::default(),
        })
    }

    /// Runs the crawl to completion and returns the final counters.
    pub async fn run(mut self) -> Result<(CrawlStats, S), LadleError> {
        tracing::info!("Starting crawl, seed queue size: {}", self.queue.len());
        let start_time = std::time::Instant::now();

        let mut in_flight: JoinSet<FetchOutcome> = JoinSet::new();

        loop {
            // Fill the dispatch window from the queue
            while in_flight.len() < self.max_concurrent {
                let Some(url) = self.queue.pop_front() else {
                    break;
                };

                tracing::debug!("Dispatching fetch: {}", url);
                let client = self.client.clone();
                in_flight.spawn(async move { fetch_page(&client, url).await });

                if !self.dispatch_delay.is_zero() && !self.queue.is_empty() {
                    tokio::time::sleep(self.dispatch_delay).await;
                }
            }

            // Queue drained and nothing in flight: the crawl is done
            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            match joined {
                Ok(outcome) => self.process_outcome(outcome)?,
                Err(e) => {
                    tracing::error!("Fetch task panicked: {}", e);
                    self.stats.fetch_errors += 1;
                }
            }

            if self.stats.pages_fetched > 0 && self.stats.pages_fetched % 10 == 0 {
                let rate = self.stats.pages_fetched as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages fetched, {} records, {} queued, {} visited, {:.2} pages/sec",
                    self.stats.pages_fetched,
                    self.stats.records_emitted,
                    self.queue.len(),
                    self.driver.frontier().len(),
                    rate
                );
            }
        }

        self.sink.flush()?;

        tracing::info!(
            "Crawl completed in {:?}: {} pages, {} records, {} errors",
            start_time.elapsed(),
            self.stats.pages_fetched,
            self.stats.records_emitted,
            self.stats.fetch_errors
        );

        Ok((self.stats, self.sink))
    }

    /// Routes one fetch outcome through the driver and sink.
    fn process_outcome(&mut self, outcome: FetchOutcome) -> Result<(), LadleError> {
        match outcome {
            FetchOutcome::Page(page) => {
                self.stats.pages_fetched += 1;

                let decision = self.driver.handle_page(&page);

                if let Some(record) = decision.record {
                    self.sink.write_record(&record)?;
                    self.stats.records_emitted += 1;
                }

                for link in decision.links {
                    if self.enqueued.insert(link.to_string()) {
                        self.stats.links_enqueued += 1;
                        self.queue.push_back(link);
                    }
                }
            }

            FetchOutcome::NotHtml { url, content_type } => {
                tracing::debug!("Skipping non-HTML response from {}: {}", url, content_type);
            }

            FetchOutcome::Failed { url, error } => {
                tracing::warn!("Fetch failed for {}: {}", url, error);
                self.stats.fetch_errors += 1;
            }
        }

        Ok(())
    }
}
