//! Data types for the episode scraper
//!
//! This module contains the core data structures used throughout the library.
//! All types implement Serialize and Deserialize so a driver can export them.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity of an episode: its title and publish date.
///
/// Used for equality, hashing and persistence lookups alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeKey {
    pub title: String,
    pub date: NaiveDate,
}

impl EpisodeKey {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
        }
    }

    /// Publish date in `YYYY-MM-DD` form
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl Hash for EpisodeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.iso_date().hash(state);
    }
}

/// One published podcast episode
///
/// Two episodes compare equal when their [`EpisodeKey`]s match, so a later
/// fetch of the same episode with edited show notes is still the same episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    /// Display name of the episode
    pub title: String,
    /// Absolute URL of the episode page
    pub url: String,
    /// Publish date
    pub date: NaiveDate,
    /// Show notes paragraphs in page order
    pub notes: Vec<String>,
    /// Show notes links, label to href
    pub links: BTreeMap<String, String>,
    /// Episode number as shown on the page; text because bonus episodes
    /// carry labels instead of numbers
    pub number: String,
}

impl Episode {
    /// Identity projection of this episode
    pub fn key(&self) -> EpisodeKey {
        EpisodeKey::new(self.title.clone(), self.date)
    }
}

impl PartialEq for Episode {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.date == other.date
    }
}

impl Eq for Episode {}

impl Hash for Episode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// One parsed page of the episode listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Absolute episode URLs in display order
    pub episode_urls: Vec<String>,
    /// Absolute URL of the following listing page, if any
    pub next_page: Option<String>,
}

impl ListingPage {
    pub fn new(episode_urls: Vec<String>, next_page: Option<String>) -> Self {
        Self {
            episode_urls,
            next_page,
        }
    }

    /// Whether another listing page follows this one
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}
