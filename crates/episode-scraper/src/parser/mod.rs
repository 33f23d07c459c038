//! HTML parsers for podcast pages
//!
//! This module contains parsers for extracting data from podcast host pages:
//! - `listing`: Parse an episode listing page
//! - `episode`: Parse a single episode page
//! - `date`: Parse human-readable publish dates
//! - `query`: Selector helpers shared by the parsers

pub mod date;
pub mod episode;
pub mod listing;
pub mod query;

// Re-export main parsing functions
pub use date::parse_publish_date;
pub use episode::{parse_episode_number, parse_episode_page};
pub use listing::parse_listing_page;
pub use query::{select_all, select_text};
