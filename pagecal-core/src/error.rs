//! Error types for pagecal.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in pagecal operations.
///
/// Most of these never reach the host: calendar arithmetic failures are
/// absorbed by the pager, which falls back to today's period.
#[derive(Error, Debug)]
pub enum PageCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Date out of range: {date} {amount:+} {unit}")]
    DateOutOfRange {
        date: NaiveDate,
        amount: i64,
        unit: &'static str,
    },

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for pagecal operations.
pub type PageCalResult<T> = Result<T, PageCalError>;
