//! Error types for page extraction

use thiserror::Error;

/// Result type alias for page extraction operations
pub type Result<T> = std::result::Result<T, PageError>;

/// Error type for page extraction operations
#[derive(Debug, Error)]
pub enum PageError {
    /// The page contains no recognizable schedule rows
    #[error("no schedule rows found in page")]
    NoScheduleRows,

    /// A time/location row appeared before any day row
    #[error("schedule row without a preceding day cell: {row}")]
    OrphanScheduleRow {
        /// The offending row's markup
        row: String,
    },

    /// A CSS selector failed to compile
    #[error("invalid selector: {0}")]
    Selector(String),

    /// The extraction engine rejected the page's content
    #[error(transparent)]
    Schedule(#[from] bibliobus_schedule::ScheduleError),
}
