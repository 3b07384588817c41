//! Comma-separated partial-date list resolution
//!
//! The source page states dates as `D.M` or `D.M.Y` tokens with the year
//! carried forward from the last token that stated one.

use chrono::NaiveDate;

use crate::error::{Result, ScheduleError};

/// Earliest year accepted from the source
pub const MIN_YEAR: i32 = 2000;
/// Latest year accepted from the source
pub const MAX_YEAR: i32 = 2100;

/// Resolve a comma-separated list of `D.M` / `D.M.Y` tokens into dates
///
/// Two-part tokens borrow the most recently seen year, starting from
/// `initial_year`; a three-part token re-seeds the year for the rest of the
/// list. The output keeps token order, which the source does not keep
/// chronological, so callers must not assume sortedness.
///
/// # Errors
///
/// - [`ScheduleError::MalformedDateToken`] for a token that is not two or
///   three `.`-separated parts, or whose year segment is not an integer
/// - [`ScheduleError::InvalidDate`] for a composed date that fails calendar
///   validation or falls outside [`MIN_YEAR`]..=[`MAX_YEAR`]
/// - [`ScheduleError::EmptyDateList`] when the input contains no tokens at
///   all, so callers can tell "no dates stated" apart from "dates garbled"
pub fn resolve_date_list(text: &str, initial_year: i32) -> Result<Vec<NaiveDate>> {
    let mut current_year = initial_year;
    let mut dates = Vec::new();

    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let parts: Vec<&str> = token
            .split('.')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let year = match parts.len() {
            2 => current_year,
            3 => {
                current_year =
                    parts[2]
                        .parse()
                        .map_err(|_| ScheduleError::MalformedDateToken {
                            token: token.to_string(),
                        })?;
                current_year
            }
            _ => {
                return Err(ScheduleError::MalformedDateToken {
                    token: token.to_string(),
                })
            }
        };

        let invalid = || ScheduleError::InvalidDate {
            date: format!("{year}-{}-{}", parts[1], parts[0]),
        };

        let month: u32 = parts[1].parse().map_err(|_| invalid())?;
        let day: u32 = parts[0].parse().map_err(|_| invalid())?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;

        dates.push(date);
    }

    if dates.is_empty() {
        return Err(ScheduleError::EmptyDateList);
    }

    Ok(dates)
}
