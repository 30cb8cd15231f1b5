//! Error types for the fetch and normalization pipeline.
//!
//! Cell-level coercion failures never surface here: an unparseable cell
//! becomes a missing value and is dealt with by the missing-column drop.

use thiserror::Error;

/// Failures that abort scraping for a city (and, by default, the batch).
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page request failed: DNS, timeout, or a non-2xx status.
    #[error("failed to fetch page for {city}: {source}")]
    Network {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    /// The page has no table matching the climate table selector.
    #[error("no table matching `{selector}` on page for {city}")]
    NotFound { city: String, selector: String },

    /// The table exists but cannot be indexed by calendar month.
    #[error("unexpected climate table layout for {city}: {reason}")]
    Layout { city: String, reason: String },

    /// The fixture data has no series for this city.
    #[error("no fixture data for city {0}")]
    UnknownCity(String),

    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid CSS selector `{0}`")]
    Selector(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ScrapeError {
    pub(crate) fn layout(city: &str, reason: impl Into<String>) -> Self {
        ScrapeError::Layout {
            city: city.to_string(),
            reason: reason.into(),
        }
    }
}
