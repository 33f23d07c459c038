//! Page fetching seam
//!
//! Everything that needs a page goes through [`PageFetcher`], so the pipeline
//! can share one HTTP client across fetches and tests can serve fixtures from
//! memory.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, ScrapeError};

/// Something that turns a URL into a page body
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url` and return its HTML.
    ///
    /// # Errors
    /// A fetch-kind [`ScrapeError`] if the page cannot be retrieved
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// In-memory fetcher serving fixed HTML per URL
///
/// Unknown URLs answer `NotFound`; URLs marked with [`fail_on`](Self::fail_on)
/// answer a 500 status. Every request is recorded.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Make requests for `url` fail
    pub fn fail_on(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }

        if self.failing.contains(url) {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: 500,
            });
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::NotFound(url.to_string()))
    }
}
