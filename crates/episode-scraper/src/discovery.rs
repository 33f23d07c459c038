//! Episode discovery
//!
//! Combines the paginator with the extractor: pulls episode URLs one at a time,
//! applies the scrape limit and extracts each episode through the shared
//! fetcher.

use std::sync::Arc;

use async_stream::try_stream;
use futures::{pin_mut, Stream, TryStreamExt};

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::paginator::episode_urls;
use crate::types::Episode;

/// Lazily discover and extract episodes for `config.podcast_url`.
///
/// With `scrape_limit = Some(n)` the stream stops when the n-th URL is
/// observed, without extracting it, so at most `n - 1` episodes come out.
///
/// Any failure is logged together with its context and then returned as the
/// final item; nothing is yielded after it.
pub fn discover_episodes(
    config: &ScrapeConfig,
    fetcher: Arc<dyn PageFetcher>,
) -> impl Stream<Item = Result<Episode>> + Send {
    let podcast_url = config.podcast_url.clone();
    let scrape_limit = config.scrape_limit;

    let episodes = try_stream! {
        let urls = episode_urls(fetcher.clone(), podcast_url);
        pin_mut!(urls);

        let mut observed = 0usize;
        while let Some(url) = urls.try_next().await? {
            observed += 1;
            if scrape_limit.is_some_and(|limit| observed >= limit) {
                tracing::debug!(observed, "scrape limit reached");
                break;
            }

            let episode = Episode::from_url(&url, Some(fetcher.as_ref())).await?;
            tracing::debug!(title = %episode.title, date = %episode.date, "extracted episode");
            yield episode;
        }
    };

    episodes.inspect_err(|err: &ScrapeError| {
        tracing::error!(error = %err, kind = ?err.kind(), "episode discovery failed");
    })
}
