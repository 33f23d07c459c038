//! Scrape run configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ScrapeError};

/// What to scrape and how much of it
///
/// Deserializable so a driver can load it from whatever format it likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Root of the podcast's episode listing
    pub podcast_url: String,
    /// Cap on episode URLs observed per run; `None` walks the whole listing
    #[serde(default)]
    pub scrape_limit: Option<usize>,
}

impl ScrapeConfig {
    pub fn new(podcast_url: impl Into<String>) -> Self {
        Self {
            podcast_url: podcast_url.into(),
            scrape_limit: None,
        }
    }

    pub fn with_scrape_limit(mut self, limit: usize) -> Self {
        self.scrape_limit = Some(limit);
        self
    }

    /// Check that `podcast_url` is an absolute http(s) URL.
    ///
    /// # Errors
    /// `ScrapeError::InvalidUrl` if the URL is empty, relative or not http(s)
    pub fn validate(&self) -> Result<()> {
        let trimmed = self.podcast_url.trim();
        if trimmed.is_empty() {
            return Err(ScrapeError::InvalidUrl("Podcast URL cannot be empty".to_string()));
        }
        let parsed = Url::parse(trimmed).map_err(|e| ScrapeError::InvalidUrl(format!("{trimmed}: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ScrapeError::InvalidUrl(format!(
                "{trimmed}: unsupported scheme {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ScrapeConfig::new("https://show.captivate.fm").with_scrape_limit(5);
        assert_eq!(config.podcast_url, "https://show.captivate.fm");
        assert_eq!(config.scrape_limit, Some(5));
    }

    #[test]
    fn test_deserialize_without_limit() {
        let config: ScrapeConfig =
            serde_json::from_str(r#"{"podcast_url": "https://show.captivate.fm"}"#).unwrap();
        assert_eq!(config.scrape_limit, None);
    }

    #[test]
    fn test_validate_accepts_https() {
        assert!(ScrapeConfig::new("https://show.captivate.fm/episodes").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        for bad in ["", "   ", "show.captivate.fm", "ftp://show.captivate.fm"] {
            match ScrapeConfig::new(bad).validate() {
                Err(ScrapeError::InvalidUrl(_)) => {}
                other => panic!("expected InvalidUrl for {bad:?}, got {other:?}"),
            }
        }
    }
}
