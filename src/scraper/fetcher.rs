//! HTTP fetcher
//!
//! One GET per page, a fixed politeness delay before every request, and no
//! retries: a failed fetch is reported to the caller, which decides per the
//! pagination rules whether to skip the page or abandon the source.

use crate::config::ScraperConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Ways a single fetch attempt can fail
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("timeout fetching {url}")]
    Timeout { url: String },

    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },
}

/// Builds the HTTP client shared by one run
///
/// # Arguments
///
/// * `config` - Scraper configuration (user agent, timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page body
///
/// Sleeps `delay` before the request so that every fetch in a run, listing or
/// detail, is spaced by the configured interval. Exactly one attempt is made.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `delay` - Politeness delay applied before the request
///
/// # Returns
///
/// * `Ok(String)` - The response body for a 2xx response
/// * `Err(FetchError)` - Non-2xx status, timeout, or network failure
pub async fn fetch_page(
    client: &Client,
    url: &str,
    delay: Duration,
) -> Result<String, FetchError> {
    tokio::time::sleep(delay).await;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })
}
