use serde::Deserialize;

/// Main configuration structure for ladle
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// The only domain the crawler is allowed to visit (e.g. "example.com")
    pub domain: String,

    /// Base URL override for the seed page. Defaults to `https://<domain>`.
    /// Mainly useful for pointing the crawler at a local test server.
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,
}

impl SiteConfig {
    /// The URL the crawl starts from: the site's recipe listing page.
    pub fn seed_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!("{}/recipes", base.trim_end_matches('/')),
            None => format!("https://{}/recipes", self.domain),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of in-flight page fetches
    #[serde(rename = "max-concurrent-requests", default = "default_concurrency")]
    pub max_concurrent_requests: u32,

    /// Fixed delay between request dispatches (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_delay_ms")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_concurrency(),
            request_delay_ms: default_delay_ms(),
        }
    }
}

fn default_concurrency() -> u32 {
    8
}

fn default_delay_ms() -> u64 {
    500
}

/// What the extractor does when a page has no parseable structured payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Fall through to heuristic HTML-selector scanning
    #[default]
    Heuristic,
    /// Emit an all-empty record (URL and title only)
    Empty,
}

/// Which outgoing links the driver enqueues for further crawling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryBreadth {
    /// Only URLs matching the recipe-detail shape
    Strict,
    /// Recipe-detail URLs plus recipe-topic listing pages
    #[default]
    Permissive,
}

/// Extraction policy configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionConfig {
    #[serde(rename = "fallback-policy", default)]
    pub fallback_policy: FallbackPolicy,

    #[serde(rename = "discovery-breadth", default)]
    pub discovery_breadth: DiscoveryBreadth,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(default = "default_ua_name")]
    pub name: String,

    #[serde(default = "default_ua_version")]
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_ua_name(),
            version: default_ua_version(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the full user agent string sent with every request.
    pub fn header_value(&self) -> String {
        format!("Mozilla/5.0 (compatible; {}/{})", self.name, self.version)
    }
}

fn default_ua_name() -> String {
    "RecipeScraper".to_string()
}

fn default_ua_version() -> String {
    "1.0".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON Lines file records are appended to
    #[serde(rename = "records-path", default = "default_records_path")]
    pub records_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_path: default_records_path(),
        }
    }
}

fn default_records_path() -> String {
    "./recipes.jsonl".to_string()
}
