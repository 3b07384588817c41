//! Error types for schedule extraction

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for schedule extraction operations
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Error type for schedule extraction operations
///
/// Every variant is fatal to the run: the engine validates or rejects, it
/// never produces a partial session list. The single tolerated exception is
/// an unparseable time range inside an otherwise well-formed slot, which the
/// session expander skips with a warning instead of surfacing here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A date token is not `D.M` or `D.M.Y` with an integer year segment
    #[error("malformed date token: {token:?}")]
    MalformedDateToken {
        /// The offending token as it appeared in the source
        token: String,
    },

    /// A composed date fails calendar parsing or falls outside 2000..=2100
    #[error("invalid date: {date}")]
    InvalidDate {
        /// The composed `Y-M-D` string that failed validation
        date: String,
    },

    /// A date list contained zero valid tokens
    ///
    /// Distinct from [`ScheduleError::MalformedDateToken`]: the source stated
    /// no dates at all rather than stating garbled ones.
    #[error("date list contains no dates")]
    EmptyDateList,

    /// A day block stated no dates at all
    #[error("no dates found for day {day:?}")]
    NoDates {
        /// The block's weekday label
        day: String,
    },

    /// A day block's holiday dates cover every stated date
    #[error("no working dates found for day {day:?}")]
    NoWorkingDates {
        /// The block's weekday label
        day: String,
    },

    /// The all-dates/holiday-dates texts split into an unsupported
    /// combination of parts
    #[error("unexpected day block shape: {all_parts} all-date part(s), {holiday_parts} holiday part(s)")]
    UnexpectedBlockShape {
        /// Part count of the all-dates text
        all_parts: usize,
        /// Part count of the holiday-dates text
        holiday_parts: usize,
    },

    /// One side of a day block states a weekday label the other side lacks,
    /// or neither side states one
    #[error("inconsistent weekday labels: all dates {all_label:?}, holiday dates {holiday_label:?}")]
    InconsistentLabels {
        /// Label extracted from the all-dates text
        all_label: String,
        /// Label extracted from the holiday-dates text
        holiday_label: String,
    },

    /// The all-dates and holiday-dates weekday labels disagree
    #[error("weekday label mismatch: {all_label:?} != {holiday_label:?}")]
    WeekdayLabelMismatch {
        /// Label extracted from the all-dates text
        all_label: String,
        /// Label extracted from the holiday-dates text
        holiday_label: String,
    },

    /// The stated weekday name does not match the computed weekday of the
    /// first listed date
    #[error("weekday {label:?} does not match date {date}")]
    WeekdayMismatch {
        /// The stated weekday name
        label: String,
        /// The first resolved date of the block
        date: NaiveDate,
    },

    /// A time/location fragment does not split into exactly two parts on `#`
    #[error("malformed slot fragment: {fragment:?}")]
    MalformedSlot {
        /// The raw fragment
        fragment: String,
    },
}
