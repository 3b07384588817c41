//! Session records and the day-block to session expansion

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::block::{extract_day_block, RawDayBlock};
use crate::dom::DomParser;
use crate::error::Result;
use crate::slot::{parse_slot, split_slot, SlotInfo};

/// Location marker carried by holiday sessions
pub const NON_WORKING_LOCATION: &str = "=== neradni dan ===";

/// Address recorded on holiday sessions
pub const NON_WORKING_ADDRESS: &str = "Neradni dan";

/// One resolved stop visit (or holiday marker) on a concrete date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Weekday name as stated by the source
    pub day: String,
    /// Calendar date; serializes as ISO `yyyy-MM-dd`
    pub date: NaiveDate,
    /// Canonical `HH:MM-HH:MM`; empty on holiday markers
    pub time_range: String,
    /// Stop location text
    pub location: String,
    /// Map link detected in the source markup
    pub map_url: Option<String>,
    /// Inline coordinates pulled from the map link
    pub coordinates: Option<String>,
    /// Street address, when the source states one beyond the location
    pub address: Option<String>,
}

impl Session {
    fn working(day: &str, date: NaiveDate, slot: &SlotInfo) -> Self {
        Self {
            day: day.to_string(),
            date,
            time_range: slot.time_range.clone(),
            location: slot.location.clone(),
            map_url: slot.map_url.clone(),
            coordinates: slot.coordinates.clone(),
            address: slot.address.clone(),
        }
    }

    fn non_working(day: &str, date: NaiveDate) -> Self {
        Self {
            day: day.to_string(),
            date,
            time_range: String::new(),
            location: NON_WORKING_LOCATION.to_string(),
            map_url: None,
            coordinates: None,
            address: Some(NON_WORKING_ADDRESS.to_string()),
        }
    }

    /// True for holiday marker sessions, which carry no stop visit
    #[must_use]
    pub fn is_non_working(&self) -> bool {
        self.time_range.is_empty() && self.location == NON_WORKING_LOCATION
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>10} {:>12} {:>12}  {}",
            self.day, self.date.to_string(), self.time_range, self.location
        )
    }
}

/// Expand day blocks into the flat, sorted session list
///
/// Every working date crossed with every parsable slot yields one working
/// session; every holiday date yields a single all-day marker session. The
/// result is sorted ascending by `(date, time_range)`, which is equivalent
/// to chronological order given ISO dates and zero-padded times. Repeated
/// identical fragments produce repeated sessions; nothing is deduplicated.
///
/// A slot whose canonicalized time range does not parse as `HH:MM-HH:MM`
/// is skipped with a warning rather than failing the run.
///
/// # Errors
///
/// Any block-extraction error ([`crate::block`]) and any fragment missing
/// its `#` separator ([`crate::error::ScheduleError::MalformedSlot`]) abort
/// the whole run; there is no partial output.
pub fn expand_sessions<P: DomParser>(
    blocks: &[RawDayBlock],
    initial_year: i32,
    dom: &P,
) -> Result<Vec<Session>> {
    let mut sessions = Vec::new();

    for block in blocks {
        let dates = extract_day_block(block, initial_year)?;
        let day = block.day_label();

        let mut slots = Vec::new();
        for fragment in &block.slots {
            let (_, location_html) = split_slot(fragment)?;
            let location = dom.parse_fragment(location_html);
            let slot = parse_slot(fragment, &location)?;

            if parse_time_range(&slot.time_range).is_none() {
                log::warn!(
                    "skipping slot with unparseable time range {:?} for day {day}",
                    slot.time_range
                );
                continue;
            }
            slots.push(slot);
        }

        for date in &dates.working {
            for slot in &slots {
                sessions.push(Session::working(&day, *date, slot));
            }
        }

        for date in &dates.holiday {
            sessions.push(Session::non_working(&day, *date));
        }
    }

    sessions.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.time_range.cmp(&b.time_range))
    });

    Ok(sessions)
}

/// Strict `HH:MM-HH:MM` split-and-parse used to reject malformed ranges
fn parse_time_range(time_range: &str) -> Option<(NaiveTime, NaiveTime)> {
    let (start, end) = time_range.split_once('-')?;
    let start = NaiveTime::parse_from_str(start, "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(end, "%H:%M").ok()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_range_accepts_canonical() {
        assert!(parse_time_range("09:00-11:15").is_some());
    }

    #[test]
    fn test_parse_time_range_rejects_junk() {
        assert!(parse_time_range("").is_none());
        assert!(parse_time_range("whenever").is_none());
        assert!(parse_time_range("09:00").is_none());
        assert!(parse_time_range("25:00-26:00").is_none());
        assert!(parse_time_range("09:00-11:15-12:00").is_none());
    }

    #[test]
    fn test_non_working_session_shape() {
        let session = Session::non_working("utorak", NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
        assert!(session.is_non_working());
        assert_eq!(session.location, NON_WORKING_LOCATION);
        assert_eq!(session.address.as_deref(), Some(NON_WORKING_ADDRESS));
        assert_eq!(session.map_url, None);
    }

    #[test]
    fn test_display_renders_aligned_row() {
        let session = Session {
            day: "utorak".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            time_range: "09:00-11:15".to_string(),
            location: "Sesvete".to_string(),
            map_url: None,
            coordinates: None,
            address: None,
        };
        assert_eq!(session.to_string(), "    utorak   2025-03-04  09:00-11:15  Sesvete");
    }
}
