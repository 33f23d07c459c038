//! Rate-limited HTTP client for podcast sites
//!
//! This module provides the default [`PageFetcher`]: a reqwest client that
//! spaces requests out so a full listing walk does not hammer the host.
//! Failures are returned as-is; retrying is left to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml";

const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use episode_scraper::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        let now = Instant::now();
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(now.checked_sub(min_interval).unwrap_or(now))),
        }
    }

    /// Wait until the minimum interval since the previous request has passed
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
        }
    }
}

/// HTTP client for podcast pages
///
/// Build one and share it (as `Arc<dyn PageFetcher>`) across a whole run to
/// reuse connections. The caller owns its lifetime.
pub struct PodcastClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl PodcastClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
        })
    }

    /// Fetch HTML content from an absolute URL
    ///
    /// # Errors
    /// - `ScrapeError::Http` - transport failure or timeout
    /// - `ScrapeError::NotFound` - server returned 404
    /// - `ScrapeError::HttpStatus` - any other non-success status
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.rate_limiter.acquire().await;

        tracing::debug!(url, "fetching page");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.text().await?);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScrapeError::NotFound(url.to_string()));
        }

        Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }

    #[cfg(test)]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl PageFetcher for PodcastClient {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rate_limiter_different_rates() {
        let limiter = RateLimiter::new(1.0);
        assert_eq!(limiter.min_interval(), Duration::from_secs(1));

        let limiter = RateLimiter::new(4.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.requests_per_second, 2.0);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            requests_per_second: 5.0,
            timeout_secs: 10,
        };
        let client = PodcastClient::with_config(config).unwrap();
        assert_eq!(client.rate_limiter().min_interval(), Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0);

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;

        // Second acquire waits out the 100ms interval
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
