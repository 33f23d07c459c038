//! Fetch-and-parse for a single episode page

use crate::client::PodcastClient;
use crate::error::{Result, ResultExt};
use crate::fetch::PageFetcher;
use crate::parser::parse_episode_page;
use crate::types::Episode;

impl Episode {
    /// Fetch the episode page at `url` and extract an [`Episode`] from it.
    ///
    /// Pass the run's shared fetcher as `session` to reuse its connections;
    /// with `None` a default [`PodcastClient`] is built for this call alone.
    ///
    /// # Errors
    /// Fetch-kind errors when the page cannot be retrieved, validation-kind
    /// errors when a required field is missing. Both carry the episode URL as
    /// context.
    ///
    /// # Example
    /// ```no_run
    /// use episode_scraper::Episode;
    ///
    /// # async fn example() -> episode_scraper::Result<()> {
    /// let ep = Episode::from_url("https://show.captivate.fm/episode/pilot", None).await?;
    /// println!("{} ({}) #{}", ep.title, ep.date, ep.number);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_url(url: &str, session: Option<&dyn PageFetcher>) -> Result<Episode> {
        let html = match session {
            Some(fetcher) => fetcher.fetch_page(url).await,
            None => match PodcastClient::new() {
                Ok(client) => client.fetch(url).await,
                Err(err) => Err(err),
            },
        }
        .context("fetch episode page", url)?;

        parse_episode_page(&html, url).context("parse episode page", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ScrapeError};
    use crate::fetch::StaticFetcher;

    const URL: &str = "https://show.captivate.fm/episode/pilot";

    const PAGE: &str = r#"
        <h1 class="episode-title">Pilot</h1>
        <span class="publish-date">January 2, 2023</span>
        <div class="episode-info">Episode 1</div>
        <div class="show-notes"><p>Welcome.</p></div>
    "#;

    #[tokio::test]
    async fn test_from_url_with_session() {
        let fetcher = StaticFetcher::new().with_page(URL, PAGE);
        let ep = Episode::from_url(URL, Some(&fetcher)).await.unwrap();
        assert_eq!(ep.title, "Pilot");
        assert_eq!(ep.url, URL);
        assert_eq!(ep.number, "1");
        assert_eq!(fetcher.requests(), vec![URL.to_string()]);
    }

    #[tokio::test]
    async fn test_from_url_fetch_failure_has_context() {
        let fetcher = StaticFetcher::new().fail_on(URL);
        let err = Episode::from_url(URL, Some(&fetcher)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        let context = err.context().unwrap();
        assert_eq!(context.operation, "fetch episode page");
        assert_eq!(context.url, URL);
    }

    #[tokio::test]
    async fn test_from_url_validation_failure() {
        let fetcher = StaticFetcher::new().with_page(URL, "<p>moved</p>");
        let err = Episode::from_url(URL, Some(&fetcher)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err.root(), ScrapeError::ElementNotFound(_)));
    }
}
