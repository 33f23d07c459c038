//! Episode page parser
//!
//! Turns a single episode page into an [`Episode`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use scraper::Html;

use crate::error::{Result, ScrapeError};
use crate::types::Episode;

use super::date::parse_publish_date;
use super::query::{element_raw_text, select_all, select_links, select_text};

const TITLE_SELECTOR: &str = ".episode-title";
const DATE_SELECTOR: &str = ".publish-date";
const INFO_SELECTOR: &str = ".episode-info";
const NOTES_PARAGRAPH_SELECTOR: &str = ".show-notes p";
const NOTES_LINK_SELECTOR: &str = ".show-notes a";

/// Heading paragraph that introduces the link list inside the show notes
const LINKS_HEADING: &str = "Links";

/// Parse an episode page.
///
/// # Arguments
/// * `html` - Raw HTML content of the episode page
/// * `url` - URL the page was fetched from, stored on the episode
///
/// # Returns
/// * `Ok(Episode)` with all fields extracted
/// * `Err(ScrapeError::ElementNotFound)` if title, date or episode info is missing
/// * `Err(ScrapeError::Validation)` if the title is blank or the info has no number
/// * `Err(ScrapeError::DateParse)` if the publish date is unreadable
pub fn parse_episode_page(html: &str, url: &str) -> Result<Episode> {
    let document = Html::parse_document(html);

    Ok(Episode {
        title: extract_title(&document)?,
        url: url.to_string(),
        date: extract_date(&document)?,
        notes: extract_notes(&document)?,
        links: extract_links(&document)?,
        number: extract_number(&document)?,
    })
}

fn extract_title(document: &Html) -> Result<String> {
    let title = select_text(document, TITLE_SELECTOR)?;
    if title.is_empty() {
        return Err(ScrapeError::Validation("episode title is empty".to_string()));
    }
    Ok(title)
}

fn extract_date(document: &Html) -> Result<NaiveDate> {
    parse_publish_date(&select_text(document, DATE_SELECTOR)?)
}

/// Show notes paragraphs verbatim, minus the exact "Links" heading
fn extract_notes(document: &Html) -> Result<Vec<String>> {
    Ok(select_all(document, NOTES_PARAGRAPH_SELECTOR)?
        .iter()
        .map(element_raw_text)
        .filter(|text| text != LINKS_HEADING)
        .collect())
}

/// Show notes links keyed by label; a repeated label keeps its last href
fn extract_links(document: &Html) -> Result<BTreeMap<String, String>> {
    Ok(select_links(document, NOTES_LINK_SELECTOR)?.into_iter().collect())
}

fn extract_number(document: &Html) -> Result<String> {
    let info = select_text(document, INFO_SELECTOR)?;
    parse_episode_number(&info)
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::Validation(format!("no episode number in {info:?}")))
}

/// Episode number from an episode-info string: its second word.
///
/// Kept as text because bonus episodes carry a label instead of a number.
///
/// # Examples
/// ```
/// use episode_scraper::parser::parse_episode_number;
///
/// assert_eq!(parse_episode_number("Episode 42 of the show"), Some("42"));
/// assert_eq!(parse_episode_number("Episode bonus special"), Some("bonus"));
/// assert_eq!(parse_episode_number("Trailer"), None);
/// ```
pub fn parse_episode_number(info: &str) -> Option<&str> {
    info.split_whitespace().nth(1)
}
