//! Day-block extraction: weekday labels and all/working/holiday date sets
//!
//! One day block is a source subtree that states a weekday, a list of dates
//! and, optionally, color-highlighted holiday dates inside that list. The
//! extractor separates the two date texts, reconciles their leading weekday
//! labels and resolves every text through the date-list resolver.

use chrono::NaiveDate;

use crate::dates::resolve_date_list;
use crate::dom::DomNode;
use crate::error::{Result, ScheduleError};
use crate::weekday::validate_weekday;

/// Attribute-value marker the source uses to highlight holiday dates
const COLOR_MARKER: &str = "color:";

/// One source subtree describing a week/period
///
/// Holds the day node itself plus the ordered raw `time#location-html` slot
/// fragments collected for it. Produced by an upstream page walk, consumed
/// once by [`crate::session::expand_sessions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDayBlock {
    /// The day-group subtree: weekday label and date list
    pub day: DomNode,
    /// Raw `time#location-html` fragments, in page order
    pub slots: Vec<String>,
}

impl RawDayBlock {
    /// Create a day block from a day node and its slot fragments
    #[must_use]
    pub fn new(day: DomNode, slots: Vec<String>) -> Self {
        Self { day, slots }
    }

    /// Leading word of the day cell, used as the session's day name
    #[must_use]
    pub fn day_label(&self) -> String {
        let text = self.day.inner_text();
        let text = text.trim();
        match text.find([' ', '\n']) {
            Some(pos) => text[..pos].to_string(),
            None => text.to_string(),
        }
    }
}

/// Resolved date sets for one day block
///
/// Invariants: `holiday ⊆ all`, `working = all − holiday`, and both `all`
/// and `working` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDateSet {
    /// The reconciled weekday label
    pub weekday_label: String,
    /// Every date the block states, in token order
    pub all: Vec<NaiveDate>,
    /// Dates the stop is actually visited
    pub working: Vec<NaiveDate>,
    /// Highlighted holiday dates; empty when the block has no exceptions
    pub holiday: Vec<NaiveDate>,
}

/// Extract and validate the date sets of one day block
///
/// # Errors
///
/// Fails when the block's texts split into an unsupported shape
/// ([`ScheduleError::UnexpectedBlockShape`]), the weekday labels disagree
/// ([`ScheduleError::InconsistentLabels`],
/// [`ScheduleError::WeekdayLabelMismatch`]), a date text is garbled, the
/// block states no dates or no working dates ([`ScheduleError::NoDates`],
/// [`ScheduleError::NoWorkingDates`]), or the label does not match the first
/// listed date ([`ScheduleError::WeekdayMismatch`]).
pub fn extract_day_block(block: &RawDayBlock, initial_year: i32) -> Result<ResolvedDateSet> {
    let all_text = all_dates_text(&block.day);
    let holiday_text = holiday_dates_text(&block.day);

    let all_parts = label_and_dates(&all_text);
    let holiday_parts = label_and_dates(&holiday_text);

    let (all_label, all_dates, holiday_label, holiday_dates) =
        match (all_parts.as_slice(), holiday_parts.as_slice()) {
            // No weekday label on either side: both lists stay untouched.
            ([_], [_]) => (
                String::new(),
                all_text.clone(),
                String::new(),
                holiday_text.clone(),
            ),
            ([all_label, all_dates], [holiday_label, holiday_dates]) => (
                (*all_label).to_string(),
                (*all_dates).to_string(),
                (*holiday_label).to_string(),
                (*holiday_dates).to_string(),
            ),
            // Holiday side has no label of its own: its text stays untouched.
            ([all_label, all_dates], [] | [_]) => (
                (*all_label).to_string(),
                (*all_dates).to_string(),
                String::new(),
                holiday_text.clone(),
            ),
            ([_], [holiday_label, holiday_dates]) => (
                String::new(),
                all_text.clone(),
                (*holiday_label).to_string(),
                (*holiday_dates).to_string(),
            ),
            _ => {
                return Err(ScheduleError::UnexpectedBlockShape {
                    all_parts: all_parts.len(),
                    holiday_parts: holiday_parts.len(),
                })
            }
        };

    if holiday_label.is_empty() {
        if all_label.is_empty() {
            return Err(ScheduleError::InconsistentLabels {
                all_label,
                holiday_label,
            });
        }
    } else if all_label.is_empty() {
        return Err(ScheduleError::InconsistentLabels {
            all_label,
            holiday_label,
        });
    } else if holiday_label != all_label {
        return Err(ScheduleError::WeekdayLabelMismatch {
            all_label,
            holiday_label,
        });
    }

    // The holiday text is removed as a literal substring, not token-wise;
    // the trailing comma appended per highlighted node makes mid-list
    // removals splice cleanly.
    let working_dates = if holiday_dates.is_empty() {
        all_dates.clone()
    } else {
        all_dates.replace(&holiday_dates, "")
    };

    let all = resolve_list_or_empty(&all_dates, initial_year)?;
    let working = resolve_list_or_empty(&working_dates, initial_year)?;
    let holiday = resolve_list_or_empty(&holiday_dates, initial_year)?;

    if all.is_empty() {
        return Err(ScheduleError::NoDates { day: all_label });
    }
    if working.is_empty() {
        return Err(ScheduleError::NoWorkingDates { day: all_label });
    }

    validate_weekday(&all_label, all[0])?;

    Ok(ResolvedDateSet {
        weekday_label: all_label,
        all,
        working,
        holiday,
    })
}

/// Full inner text of the day node with non-breaking spaces and literal
/// spaces stripped
fn all_dates_text(day: &DomNode) -> String {
    strip_spaces(&day.inner_text())
}

/// Concatenated inner text of every node highlighted with an inline
/// `color:` marker, each followed by a separating comma
fn holiday_dates_text(day: &DomNode) -> String {
    let mut collected = String::new();
    for node in day.walk() {
        for value in node.attribute_values() {
            if value.contains(COLOR_MARKER) {
                collected.push_str(node.inner_text().trim());
                collected.push(',');
            }
        }
    }
    strip_spaces(&collected)
}

fn strip_spaces(text: &str) -> String {
    text.replace(['\u{a0}', ' '], "").trim().to_string()
}

/// Split a cleaned date text on tab/newline into at most a leading weekday
/// label and the date-list remainder
fn label_and_dates(text: &str) -> Vec<&str> {
    text.split(['\t', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Resolve a date text, treating a token-free text as an empty list
fn resolve_list_or_empty(text: &str, initial_year: i32) -> Result<Vec<NaiveDate>> {
    match resolve_date_list(text, initial_year) {
        Err(ScheduleError::EmptyDateList) => Ok(Vec::new()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn styled(text: &str) -> DomNode {
        DomNode::element(
            "span",
            vec![("style".to_string(), "color:#e03e2d".to_string())],
            vec![DomNode::text(text)],
        )
    }

    fn block(children: Vec<DomNode>) -> RawDayBlock {
        RawDayBlock::new(DomNode::element("td", vec![], children), vec![])
    }

    #[test]
    fn test_block_without_holidays() {
        // Mondays in March 2025.
        let block = block(vec![DomNode::text("ponedjeljak\n3.3.2025,10.3,17.3")]);
        let resolved = extract_day_block(&block, 2024).unwrap();

        assert_eq!(resolved.weekday_label, "ponedjeljak");
        assert_eq!(
            resolved.all,
            vec![date(2025, 3, 3), date(2025, 3, 10), date(2025, 3, 17)]
        );
        assert_eq!(resolved.working, resolved.all);
        assert!(resolved.holiday.is_empty());
    }

    #[test]
    fn test_highlighted_date_becomes_holiday() {
        let block = block(vec![
            DomNode::text("ponedjeljak\n3.3,"),
            styled("10.3"),
            DomNode::text(",17.3"),
        ]);
        let resolved = extract_day_block(&block, 2025).unwrap();

        assert_eq!(
            resolved.all,
            vec![date(2025, 3, 3), date(2025, 3, 10), date(2025, 3, 17)]
        );
        assert_eq!(resolved.working, vec![date(2025, 3, 3), date(2025, 3, 17)]);
        assert_eq!(resolved.holiday, vec![date(2025, 3, 10)]);
    }

    #[test]
    fn test_holiday_span_covering_the_label() {
        // The highlighted span starts at the top of the cell, so both texts
        // carry the same leading weekday word. Tuesdays in March 2025.
        let block = block(vec![styled("utorak\n11.3"), DomNode::text(",4.3,18.3")]);
        let resolved = extract_day_block(&block, 2025).unwrap();

        assert_eq!(resolved.weekday_label, "utorak");
        assert_eq!(
            resolved.all,
            vec![date(2025, 3, 11), date(2025, 3, 4), date(2025, 3, 18)]
        );
        assert_eq!(resolved.working, vec![date(2025, 3, 4), date(2025, 3, 18)]);
        assert_eq!(resolved.holiday, vec![date(2025, 3, 11)]);
    }

    #[test]
    fn test_three_line_cell_is_unsupported() {
        let block = block(vec![DomNode::text("utorak\n4.3\n11.3")]);
        let err = extract_day_block(&block, 2025).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnexpectedBlockShape {
                all_parts: 3,
                holiday_parts: 0,
            }
        );
    }

    #[test]
    fn test_unlabeled_cell_without_holidays_is_unsupported() {
        let block = block(vec![DomNode::text("3.3,10.3")]);
        let err = extract_day_block(&block, 2025).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnexpectedBlockShape {
                all_parts: 1,
                holiday_parts: 0,
            }
        );
    }

    #[test]
    fn test_missing_labels_on_both_sides() {
        let block = block(vec![
            DomNode::text("3.3,"),
            styled("10.3"),
            DomNode::text(",17.3"),
        ]);
        let err = extract_day_block(&block, 2025).unwrap_err();
        assert!(matches!(err, ScheduleError::InconsistentLabels { .. }));
    }

    #[test]
    fn test_all_dates_holiday_fails() {
        let block = block(vec![
            DomNode::text("ponedjeljak\n"),
            styled("3.3,10.3"),
            DomNode::text(","),
        ]);
        let err = extract_day_block(&block, 2025).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NoWorkingDates {
                day: "ponedjeljak".to_string()
            }
        );
    }

    #[test]
    fn test_weekday_must_match_first_date() {
        // 2025-03-04 is a Tuesday.
        let block = block(vec![DomNode::text("ponedjeljak\n4.3.2025")]);
        let err = extract_day_block(&block, 2025).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::WeekdayMismatch {
                label: "ponedjeljak".to_string(),
                date: date(2025, 3, 4),
            }
        );
    }

    #[test]
    fn test_spaces_and_nbsp_are_stripped_before_splitting() {
        let block = block(vec![DomNode::text(
            "ponedjeljak\u{a0}\n 3.3.2025 , 10.3\u{a0}",
        )]);
        let resolved = extract_day_block(&block, 2024).unwrap();
        assert_eq!(resolved.all, vec![date(2025, 3, 3), date(2025, 3, 10)]);
    }

    #[test]
    fn test_day_label_takes_leading_word() {
        let block = RawDayBlock::new(
            DomNode::element(
                "td",
                vec![],
                vec![DomNode::text("  ponedjeljak\n3.3,10.3")],
            ),
            vec![],
        );
        assert_eq!(block.day_label(), "ponedjeljak");
    }

    #[test]
    fn test_day_label_without_separator() {
        let block = RawDayBlock::new(DomNode::text("srijeda"), vec![]);
        assert_eq!(block.day_label(), "srijeda");
    }
}
