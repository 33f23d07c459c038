//! Error types for the episode scraper
//!
//! This module defines all error types used throughout the library.
//! Errors carry an optional [`ErrorContext`] naming the operation and URL
//! that failed, so callers can report failures without the pipeline
//! logging on their behalf.

use std::fmt;

use thiserror::Error;

/// Error type for episode scraper operations
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Requested page does not exist (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Required HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A required field was present but unusable
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Publish date text could not be understood
    #[error("Unrecognised date: {0:?}")]
    DateParse(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Persistence layer failure
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// An episode with the same identity is already stored
    #[error("Episode already stored: {title} ({date})")]
    DuplicateEpisode { title: String, date: String },

    /// Stored notes or links could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Another error annotated with the operation and URL that produced it
    #[error("{context}: {source}")]
    WithContext {
        context: ErrorContext,
        #[source]
        source: Box<ScrapeError>,
    },
}

/// Broad classification of a [`ScrapeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or HTTP failure while retrieving a page
    Fetch,
    /// Page structure did not yield a required field
    Validation,
    /// Persistence failure
    Storage,
    /// Bad input supplied by the caller
    Config,
}

/// Where an error happened: the pipeline step and the URL it was working on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub operation: &'static str,
    pub url: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.operation, self.url)
    }
}

impl ScrapeError {
    /// Classify this error, looking through any attached context.
    ///
    /// Date parse failures count as validation failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::HttpStatus { .. } | Self::NotFound(_) => ErrorKind::Fetch,
            Self::ElementNotFound(_) | Self::Validation(_) | Self::DateParse(_) => {
                ErrorKind::Validation
            }
            Self::Storage(_) | Self::DuplicateEpisode { .. } | Self::Serialization(_) => {
                ErrorKind::Storage
            }
            Self::InvalidUrl(_) => ErrorKind::Config,
            Self::WithContext { source, .. } => source.kind(),
        }
    }

    /// The outermost context attached to this error, if any
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The underlying error with all context layers removed
    pub fn root(&self) -> &ScrapeError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Wrap this error with the operation and URL it occurred in
    pub fn with_context(self, operation: &'static str, url: impl Into<String>) -> Self {
        Self::WithContext {
            context: ErrorContext {
                operation,
                url: url.into(),
            },
            source: Box::new(self),
        }
    }
}

/// Attach an [`ErrorContext`] to the error side of a result
pub trait ResultExt<T> {
    fn context(self, operation: &'static str, url: &str) -> Result<T>;
}

impl<T, E: Into<ScrapeError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, operation: &'static str, url: &str) -> Result<T> {
        self.map_err(|e| e.into().with_context(operation, url))
    }
}

/// Result type alias for episode scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
