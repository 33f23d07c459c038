//! Listing paginator
//!
//! Walks a podcast's episode index page by page and yields episode URLs in
//! display order. A page is only fetched once every URL from the previous page
//! has been pulled.

use std::collections::HashSet;
use std::sync::Arc;

use async_stream::try_stream;
use futures::Stream;
use url::Url;

use crate::error::{Result, ResultExt, ScrapeError};
use crate::fetch::PageFetcher;
use crate::parser::parse_listing_page;

/// Lazily stream every episode URL reachable from `listing_url`.
///
/// Follows "next page" links until a page has none, or until a next link
/// points at a page already visited. The first fetch or parse failure ends the
/// stream with that error.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use futures::{pin_mut, TryStreamExt};
/// use episode_scraper::{paginator::episode_urls, PodcastClient};
///
/// # async fn example() -> episode_scraper::Result<()> {
/// let client = Arc::new(PodcastClient::new()?);
/// let urls = episode_urls(client, "https://show.captivate.fm".to_string());
/// pin_mut!(urls);
/// while let Some(url) = urls.try_next().await? {
///     println!("{url}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn episode_urls(
    fetcher: Arc<dyn PageFetcher>,
    listing_url: String,
) -> impl Stream<Item = Result<String>> + Send {
    try_stream! {
        // Same normal form as the resolved next-page links, so the root is
        // recognised when a later page links back to it.
        let root = Url::parse(&listing_url)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{listing_url}: {e}")))
            .context("start listing walk", &listing_url)?
            .to_string();

        let mut visited: HashSet<String> = HashSet::new();
        let mut next = Some(root);

        while let Some(page_url) = next.take() {
            if !visited.insert(page_url.clone()) {
                tracing::debug!(url = %page_url, "listing page already visited, stopping");
                break;
            }

            let html = fetcher
                .fetch_page(&page_url)
                .await
                .context("fetch listing page", &page_url)?;
            let page = parse_listing_page(&html, &page_url).context("parse listing page", &page_url)?;

            tracing::debug!(
                url = %page_url,
                episodes = page.episode_urls.len(),
                has_next = page.has_next_page(),
                "parsed listing page"
            );

            next = page.next_page;
            for url in page.episode_urls {
                yield url;
            }
        }
    }
}
