//! Error types for the dance calendar.

use thiserror::Error;

/// Errors that can occur while loading, parsing or exporting events.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Failed to read event source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch event source: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed event data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("Unknown dance style '{0}'")]
    UnknownStyle(String),

    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),

    #[error("No events to export.")]
    NothingToExport,
}

/// Result type alias for dance calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
