//! Episode listing parser
//!
//! Parses one page of a podcast's episode index into episode URLs and the
//! location of the next page.

use scraper::Html;
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::types::ListingPage;

use super::query::select_links;

/// Episode links, most specific first
const EPISODE_LINK_SELECTORS: &[&str] = &[".episode-list .episode-title a[href]", "a.episode-link[href]"];

/// "Older episodes" affordance, most specific first
const NEXT_PAGE_SELECTORS: &[&str] = &["a[rel='next']", ".pagination a.next"];

/// Parse a listing page.
///
/// Relative hrefs are resolved against `page_url`. An episode linked twice on
/// the same page is reported once, at its first position.
///
/// # Errors
/// `ScrapeError::InvalidUrl` if `page_url` is not an absolute URL
pub fn parse_listing_page(html: &str, page_url: &str) -> Result<ListingPage> {
    let base = Url::parse(page_url).map_err(|e| ScrapeError::InvalidUrl(format!("{page_url}: {e}")))?;
    let document = Html::parse_document(html);

    let mut episode_urls: Vec<String> = Vec::new();
    for css in EPISODE_LINK_SELECTORS {
        for (_, href) in select_links(&document, css)? {
            if let Some(url) = resolve(&base, &href) {
                if !episode_urls.contains(&url) {
                    episode_urls.push(url);
                }
            }
        }
        if !episode_urls.is_empty() {
            break;
        }
    }

    let mut next_page = None;
    for css in NEXT_PAGE_SELECTORS {
        next_page = select_links(&document, css)?
            .into_iter()
            .find_map(|(_, href)| resolve(&base, &href));
        if next_page.is_some() {
            break;
        }
    }

    Ok(ListingPage::new(episode_urls, next_page))
}

/// Resolve `href` against `base`, dropping fragments and non-http targets
fn resolve(base: &Url, href: &str) -> Option<String> {
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://show.captivate.fm/episodes";

    #[test]
    fn test_parse_listing_with_next() {
        let html = r#"
            <ul class="episode-list">
              <li class="episode"><h2 class="episode-title"><a href="/episode/third">Third</a></h2></li>
              <li class="episode"><h2 class="episode-title"><a href="https://show.captivate.fm/episode/second">Second</a></h2></li>
              <li class="episode"><h2 class="episode-title"><a href="/episode/third#comments">Third again</a></h2></li>
            </ul>
            <nav class="pagination"><a rel="next" href="?page=2">Older</a></nav>
        "#;
        let page = parse_listing_page(html, PAGE_URL).unwrap();
        assert_eq!(
            page.episode_urls,
            vec![
                "https://show.captivate.fm/episode/third".to_string(),
                "https://show.captivate.fm/episode/second".to_string(),
            ]
        );
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://show.captivate.fm/episodes?page=2")
        );
    }

    #[test]
    fn test_parse_listing_last_page() {
        let html = r#"
            <ul class="episode-list">
              <li class="episode"><h2 class="episode-title"><a href="/episode/first">First</a></h2></li>
            </ul>
            <nav class="pagination"><a class="prev" href="?page=1">Newer</a></nav>
        "#;
        let page = parse_listing_page(html, "https://show.captivate.fm/episodes?page=2").unwrap();
        assert_eq!(page.episode_urls.len(), 1);
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_parse_listing_fallback_selectors() {
        let html = r#"
            <div><a class="episode-link" href="/episode/a">A</a></div>
            <div class="pagination"><a class="next" href="/episodes/page/2">Next</a></div>
        "#;
        let page = parse_listing_page(html, PAGE_URL).unwrap();
        assert_eq!(page.episode_urls, vec!["https://show.captivate.fm/episode/a".to_string()]);
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://show.captivate.fm/episodes/page/2")
        );
    }

    #[test]
    fn test_parse_listing_ignores_non_http_links() {
        let html = r##"
            <ul class="episode-list">
              <li><span class="episode-title"><a href="mailto:host@example.com">Mail</a></span></li>
              <li><span class="episode-title"><a href="#top">Top</a></span></li>
            </ul>
        "##;
        let page = parse_listing_page(html, PAGE_URL).unwrap();
        assert!(page.episode_urls.is_empty());
    }

    #[test]
    fn test_parse_listing_empty() {
        let page = parse_listing_page("<html><body></body></html>", PAGE_URL).unwrap();
        assert_eq!(page, ListingPage::default());
    }

    #[test]
    fn test_parse_listing_bad_base() {
        assert!(matches!(
            parse_listing_page("", "not a url"),
            Err(ScrapeError::InvalidUrl(_))
        ));
    }
}
