//! Episode bot
//!
//! This module provides the high-level API: discover a podcast's episodes and
//! persist the ones the store has not seen yet.

use std::sync::Arc;

use async_stream::try_stream;
use futures::{pin_mut, Stream, TryStreamExt};

use crate::client::PodcastClient;
use crate::config::ScrapeConfig;
use crate::discovery::discover_episodes;
use crate::error::{ErrorKind, Result, ResultExt, ScrapeError};
use crate::fetch::PageFetcher;
use crate::store::EpisodeStore;
use crate::types::Episode;

/// Dedup gate between episode discovery and the store
///
/// Each [`run`](Self::run) walks the listing from the top and yields only
/// episodes it had to persist. Running it again against the same store yields
/// nothing new.
///
/// One bot per store at a time: the check-then-save step is not coordinated
/// with other writers.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use futures::{pin_mut, TryStreamExt};
/// use episode_scraper::{EpisodeBot, SqliteEpisodeStore};
///
/// # async fn example() -> episode_scraper::Result<()> {
/// let store = Arc::new(SqliteEpisodeStore::open("episodes.sqlite")?);
/// let bot = EpisodeBot::from_url("https://show.captivate.fm", store)?;
///
/// let new_episodes = bot.run();
/// pin_mut!(new_episodes);
/// while let Some(ep) = new_episodes.try_next().await? {
///     println!("new: {} ({})", ep.title, ep.date);
/// }
/// # Ok(())
/// # }
/// ```
pub struct EpisodeBot {
    config: ScrapeConfig,
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn EpisodeStore>,
}

impl EpisodeBot {
    /// Create a bot for a podcast with a default HTTP client.
    ///
    /// # Errors
    /// * `ScrapeError::InvalidUrl` if `podcast_url` is not an absolute http(s) URL
    /// * `ScrapeError::Http` if the HTTP client cannot be created
    pub fn from_url(podcast_url: &str, store: Arc<dyn EpisodeStore>) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(PodcastClient::new()?);
        Self::new(ScrapeConfig::new(podcast_url), fetcher, store)
    }

    /// Create a bot from a full configuration and a shared fetcher.
    ///
    /// # Errors
    /// `ScrapeError::InvalidUrl` if the configured URL is invalid
    pub fn new(
        config: ScrapeConfig,
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn EpisodeStore>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fetcher,
            store,
        })
    }

    /// Cap the number of episode URLs each run observes
    pub fn with_scrape_limit(mut self, limit: usize) -> Self {
        self.config.scrape_limit = Some(limit);
        self
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Discover episodes and persist the unknown ones, yielding each as it is
    /// saved.
    ///
    /// The stream ends early with an error if discovery or storage fails;
    /// episodes saved before that stay saved. Storage failures are logged here,
    /// discovery failures where they occur.
    pub fn run(&self) -> impl Stream<Item = Result<Episode>> + Send + '_ {
        let new_episodes = try_stream! {
            let candidates = discover_episodes(&self.config, self.fetcher.clone());
            pin_mut!(candidates);

            let mut saved = 0usize;
            let mut skipped = 0usize;
            while let Some(episode) = candidates.try_next().await? {
                let key = episode.key();
                let existing = self
                    .store
                    .find_by_identity(&key)
                    .await
                    .context("look up episode", &episode.url)?;

                if existing.is_some() {
                    skipped += 1;
                    tracing::debug!(title = %key.title, date = %key.date, "episode already stored");
                    continue;
                }

                let stored = self
                    .store
                    .save(&episode)
                    .await
                    .context("save episode", &episode.url)?;
                saved += 1;
                tracing::info!(title = %stored.title, date = %stored.date, number = %stored.number, "new episode");
                yield stored;
            }

            tracing::info!(
                podcast = %self.config.podcast_url,
                saved,
                skipped,
                "episode run finished"
            );
        };

        new_episodes.inspect_err(|err: &ScrapeError| {
            if err.kind() == ErrorKind::Storage {
                tracing::error!(error = %err, kind = ?err.kind(), "episode run failed");
            }
        })
    }
}
