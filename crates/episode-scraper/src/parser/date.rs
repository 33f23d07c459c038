//! Permissive publish-date parsing
//!
//! Podcast hosts render publish dates for humans ("Tuesday, March 5th, 2024",
//! "05 Mar 2024 10:00"). This reduces them to a calendar date; time of day and
//! timezone are dropped.

use chrono::{DateTime, NaiveDate};

use crate::error::{Result, ScrapeError};

/// Formats tried in order against the normalised text. Trailing text after a
/// match (usually a time of day) is ignored.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y/%m/%d",
];

/// Parse a human-readable publish date into a calendar date.
///
/// # Errors
/// `ScrapeError::DateParse` carrying the original text if no known shape fits
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use episode_scraper::parser::parse_publish_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(parse_publish_date("March 5th, 2024").unwrap(), expected);
/// assert_eq!(parse_publish_date("2024-03-05T09:30:00Z").unwrap(), expected);
/// assert!(parse_publish_date("next week").is_err());
/// ```
pub fn parse_publish_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.date_naive());
    }

    let normalised = normalise(trimmed);
    for format in DATE_FORMATS {
        if let Ok((date, _rest)) = NaiveDate::parse_and_remainder(&normalised, format) {
            return Ok(date);
        }
    }

    Err(ScrapeError::DateParse(text.to_string()))
}

/// Strip the noise humans add around a date: weekday prefix, ordinal
/// suffixes, commas, `T` separators and repeated whitespace.
fn normalise(text: &str) -> String {
    let ordinals = regex_lite::Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap();
    let weekday = regex_lite::Regex::new(
        r"(?i)^(?:mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)(?:day|nesday|sday|urday)?\.?,?\s+",
    )
    .unwrap();
    let iso_time = regex_lite::Regex::new(r"^(\d{4}-\d{2}-\d{2})T").unwrap();

    let text = weekday.replace(text, "");
    let text = ordinals.replace_all(&text, "$1");
    let text = iso_time.replace(&text, "$1 ");
    text.replace(',', " ").split_whitespace().collect::<Vec<_>>().join(" ")
}
