//! Podcast Episode Scraper Core Library
//!
//! This crate incrementally discovers episodes on a Captivate-hosted podcast
//! site, extracts their metadata and persists the ones not seen before.
//!
//! # Features
//! - Lazy, page-by-page walk of the episode listing
//! - Episode page extraction (title, date, show notes, links, number)
//! - Scrape limit per run
//! - Dedup against an [`EpisodeStore`] (SQLite or in-memory)
//! - Rate-limited HTTP client shared across the whole run

pub mod bot;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
mod extract;
pub mod fetch;
pub mod paginator;
pub mod parser;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use bot::EpisodeBot;
pub use client::{ClientConfig, PodcastClient, RateLimiter};
pub use config::ScrapeConfig;
pub use discovery::discover_episodes;
pub use error::{ErrorContext, ErrorKind, Result, ResultExt, ScrapeError};
pub use fetch::{PageFetcher, StaticFetcher};
pub use store::{EpisodeStore, MemoryEpisodeStore, SqliteEpisodeStore};
pub use types::{Episode, EpisodeKey, ListingPage};
