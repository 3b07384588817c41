//! Weekday-name cross-validation

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, ScheduleError};

/// Canonical Croatian weekday names, indexed Sunday = 0
pub const WEEKDAY_NAMES: [&str; 7] = [
    "nedjelja",
    "ponedjeljak",
    "utorak",
    "srijeda",
    "četvrtak",
    "petak",
    "subota",
];

/// Check that a stated weekday name matches the computed weekday of `date`
///
/// Matching is case-insensitive. A name outside [`WEEKDAY_NAMES`] never
/// matches any date.
///
/// # Errors
///
/// Returns [`ScheduleError::WeekdayMismatch`] when the name's Sunday-based
/// index differs from the date's day of week, or the name is unknown.
pub fn validate_weekday(label: &str, date: NaiveDate) -> Result<()> {
    let lowered = label.to_lowercase();
    let stated = WEEKDAY_NAMES.iter().position(|name| *name == lowered);

    if stated == Some(date.weekday().num_days_from_sunday() as usize) {
        Ok(())
    } else {
        Err(ScheduleError::WeekdayMismatch {
            label: label.to_string(),
            date,
        })
    }
}
