//! HTTP fetcher implementation
//!
//! Builds the HTTP client and fetches pages for the engine. Redirects are
//! followed by the client; the outcome carries the final resolved URL so the
//! driver classifies what was actually served. Fetch failures are reported as
//! outcomes, never as crawl-fatal errors.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,

    /// Raw response body text
    pub body: String,

    /// HTTP status code
    pub status: u16,
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Fetched an HTML page
    Page(FetchedPage),

    /// The response was not HTML
    NotHtml { url: Url, content_type: String },

    /// Network or HTTP failure
    Failed { url: Url, error: String },
}

/// Builds the HTTP client used for every request.
pub fn build_http_client(user_agent: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single URL and classifies the response.
pub async fn fetch_page(client: &Client, url: Url) -> FetchOutcome {
    let response = match client.get(url.clone()).send().await {
        Ok(r) => r,
        Err(e) => {
            return FetchOutcome::Failed {
                url,
                error: e.to_string(),
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Failed {
            url,
            error: format!("HTTP {}", status.as_u16()),
        };
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Servers that omit the header still mostly serve HTML; only an explicit
    // non-HTML type is skipped
    if !content_type.is_empty() && !content_type.contains("text/html") {
        return FetchOutcome::NotHtml {
            url: response.url().clone(),
            content_type,
        };
    }

    let final_url = response.url().clone();
    let status_code = status.as_u16();

    match response.text().await {
        Ok(body) => FetchOutcome::Page(FetchedPage {
            url: final_url,
            body,
            status: status_code,
        }),
        Err(e) => FetchOutcome::Failed {
            url: final_url,
            error: format!("Body read error: {}", e),
        },
    }
}
