//! Error types for the notion-ical pipeline.

use thiserror::Error;

/// Errors that can occur while resolving config or producing the feed.
#[derive(Error, Debug)]
pub enum NotionIcalError {
    #[error("{0}")]
    Config(String),

    #[error("Notion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notion API error ({status}): {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Failed to decode Notion response: {0}")]
    Decode(String),

    #[error("Notion query exceeded {0} pages")]
    PageLimit(usize),
}

/// Result type alias for notion-ical operations.
pub type NotionIcalResult<T> = Result<T, NotionIcalError>;
