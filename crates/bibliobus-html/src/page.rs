//! scraper-backed page walk
//!
//! Converts real markup into the owned [`DomNode`] trees the engine
//! consumes, and walks the schedule table into [`RawDayBlock`]s. The
//! expected shape is the one the source page uses: each day group starts
//! with a row of three cells (day cell spanning the group, time, location)
//! followed by two-cell continuation rows (time, location).

use bibliobus_schedule::{
    expand_sessions, parse_slot, split_slot, DomNode, DomParser, RawDayBlock, Session, SlotInfo,
};
use scraper::{ElementRef, Html, Selector};

use crate::error::{PageError, Result};

/// Fragment parser backed by the `scraper` crate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScraperParser;

impl DomParser for ScraperParser {
    fn parse_fragment(&self, html: &str) -> DomNode {
        parse_fragment(html)
    }
}

/// Parse an HTML fragment into an owned [`DomNode`] tree
#[must_use]
pub fn parse_fragment(html: &str) -> DomNode {
    let fragment = Html::parse_fragment(html);
    convert_element(fragment.root_element())
}

/// Parse one raw `time#location-html` fragment into a [`SlotInfo`]
///
/// # Errors
///
/// Propagates [`bibliobus_schedule::ScheduleError::MalformedSlot`] from the
/// embedded separator check.
pub fn parse_slot_fragment(fragment: &str) -> Result<SlotInfo> {
    let (_, location_html) = split_slot(fragment)?;
    let location = parse_fragment(location_html);
    Ok(parse_slot(fragment, &location)?)
}

/// Walk a schedule page into its day blocks
///
/// # Errors
///
/// Returns [`PageError::NoScheduleRows`] when no table row matches the
/// expected shape and [`PageError::OrphanScheduleRow`] when a two-cell
/// continuation row appears before any day row.
pub fn collect_day_blocks(page_html: &str) -> Result<Vec<RawDayBlock>> {
    let document = Html::parse_document(page_html);
    let table_selector =
        Selector::parse("table").map_err(|e| PageError::Selector(e.to_string()))?;

    let mut blocks: Vec<RawDayBlock> = Vec::new();

    for table in document.select(&table_selector) {
        for row in direct_rows(&table) {
            let cells = direct_cells(&row);
            match cells.as_slice() {
                [day, time, location] => {
                    blocks.push(RawDayBlock::new(
                        convert_element(*day),
                        vec![slot_fragment(time, location)],
                    ));
                }
                [time, location] => {
                    let Some(block) = blocks.last_mut() else {
                        return Err(PageError::OrphanScheduleRow { row: row.html() });
                    };
                    block.slots.push(slot_fragment(time, location));
                }
                _ => {
                    log::debug!("skipping row with {} data cell(s)", cells.len());
                }
            }
        }
    }

    if blocks.is_empty() {
        return Err(PageError::NoScheduleRows);
    }

    Ok(blocks)
}

/// Extract and expand a whole page in one call
///
/// # Errors
///
/// Propagates every walk error from [`collect_day_blocks`] and every engine
/// error from [`expand_sessions`].
pub fn expand_page(page_html: &str, initial_year: i32) -> Result<Vec<Session>> {
    let blocks = collect_day_blocks(page_html)?;
    Ok(expand_sessions(&blocks, initial_year, &ScraperParser)?)
}

/// Convert a parsed element subtree into the owned node model
fn convert_element(element: ElementRef<'_>) -> DomNode {
    let attributes = element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let mut children = Vec::new();
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            children.push(convert_element(child_element));
        } else if let Some(text) = child.value().as_text() {
            children.push(DomNode::text(text.to_string()));
        }
    }

    DomNode::element(element.value().name(), attributes, children)
}

/// Direct rows of a table, looking through `thead`/`tbody`/`tfoot` wrappers
/// but not into nested tables
fn direct_rows<'a>(table: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children() {
        let Some(child_element) = ElementRef::wrap(child) else {
            continue;
        };
        match child_element.value().name() {
            "tr" => rows.push(child_element),
            "thead" | "tbody" | "tfoot" => {
                for inner in child_element.children() {
                    if let Some(inner_element) = ElementRef::wrap(inner) {
                        if inner_element.value().name() == "tr" {
                            rows.push(inner_element);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    rows
}

/// Direct `td` cells of a row; header cells do not count
fn direct_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .collect()
}

/// Join a time cell and a location cell into the raw slot fragment
fn slot_fragment(time: &ElementRef<'_>, location: &ElementRef<'_>) -> String {
    let time_text = time.text().collect::<String>();
    format!("{}#{}", time_text.trim(), location.inner_html())
}
