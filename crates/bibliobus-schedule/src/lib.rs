//! # bibliobus-schedule
//!
//! Extraction and normalization engine for the Zagreb bibliobus stop
//! schedule.
//!
//! The source is a single, irregularly authored HTML page: day groupings
//! with comma-separated partial dates, color-highlighted holiday
//! exceptions, and per-stop time windows with map links buried in the
//! markup. This crate turns that into a flat, validated, sorted list of
//! [`Session`] records — one date, time window and location per row — or a
//! single descriptive [`ScheduleError`] when the source contradicts itself.
//!
//! ## Pipeline
//!
//! | Stage | Entry point | Duty |
//! |-------|-------------|------|
//! | Date-list resolution | [`resolve_date_list`] | `D.M` / `D.M.Y` tokens with year carry-forward |
//! | Weekday validation | [`validate_weekday`] | stated weekday vs computed weekday |
//! | Day-block extraction | [`extract_day_block`] | all/working/holiday date sets per block |
//! | Slot parsing | [`parse_slot`] | time canonicalization, map link, coordinates, address |
//! | Session expansion | [`expand_sessions`] | cross product, holiday markers, final sort |
//!
//! ## Quick Start
//!
//! ```
//! use bibliobus_schedule::resolve_date_list;
//!
//! // A token that states a year re-seeds it for the rest of the list.
//! let dates = resolve_date_list("29.12.2025,5.1.2026,12.1", 2025)?;
//! assert_eq!(dates.len(), 3);
//! assert_eq!(dates[2].to_string(), "2026-01-12");
//! # Ok::<(), bibliobus_schedule::ScheduleError>(())
//! ```
//!
//! ## Supplying HTML
//!
//! The engine never parses markup itself. An adapter implements
//! [`DomParser`] and hands over owned [`DomNode`] trees (the scraper-backed
//! `bibliobus-html` crate does this for real pages); tests build trees by
//! hand. One [`RawDayBlock`] per day group plus an initial year is all
//! [`expand_sessions`] needs:
//!
//! ```
//! use bibliobus_schedule::{expand_sessions, DomNode, DomParser, RawDayBlock};
//!
//! struct PlainText;
//!
//! impl DomParser for PlainText {
//!     fn parse_fragment(&self, html: &str) -> DomNode {
//!         DomNode::text(html)
//!     }
//! }
//!
//! let block = RawDayBlock::new(
//!     DomNode::text("ponedjeljak\n3.3.2025,10.3"),
//!     vec!["9:00-11:15#Sesvete".to_string()],
//! );
//!
//! let sessions = expand_sessions(&[block], 2025, &PlainText)?;
//! assert_eq!(sessions.len(), 2);
//! assert_eq!(sessions[0].time_range, "09:00-11:15");
//! # Ok::<(), bibliobus_schedule::ScheduleError>(())
//! ```
//!
//! ## Guarantees
//!
//! - The output is sorted ascending by `(date, time_range)`.
//! - Holiday dates produce exactly one all-day marker session each, with
//!   [`NON_WORKING_LOCATION`] as the location.
//! - The run is validate-or-reject: any inconsistency in dates, labels or
//!   slot separators aborts with an error and no partial output. The one
//!   exception is a slot whose time range fails to parse, which is skipped
//!   with a `log::warn!`.
//! - Runs are pure and deterministic; the current year is an explicit
//!   parameter, never ambient clock state.

pub mod block;
pub mod dates;
pub mod dom;
pub mod error;
pub mod session;
pub mod slot;
pub mod weekday;

pub use block::{extract_day_block, RawDayBlock, ResolvedDateSet};
pub use dates::{resolve_date_list, MAX_YEAR, MIN_YEAR};
pub use dom::{DomNode, DomParser};
pub use error::{Result, ScheduleError};
pub use session::{expand_sessions, Session, NON_WORKING_ADDRESS, NON_WORKING_LOCATION};
pub use slot::{parse_slot, split_slot, SlotInfo};
pub use weekday::{validate_weekday, WEEKDAY_NAMES};
