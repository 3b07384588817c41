//! # bibliobus-html
//!
//! scraper-backed HTML adapter for the bibliobus schedule engine.
//!
//! `bibliobus-schedule` deliberately never touches an HTML parser: it
//! consumes owned `DomNode` trees through a narrow query surface. This
//! crate is the upstream collaborator that produces those trees from real
//! markup and walks the source page's schedule table into day blocks.
//!
//! ## Quick Start
//!
//! ```
//! use bibliobus_html::expand_page;
//!
//! let page = r#"<table>
//!   <tr><td rowspan="2">ponedjeljak
//! 3.3.2025,10.3</td><td>9:00-11:15</td><td>Sesvete</td></tr>
//!   <tr><td>12:00-13:30</td><td>Dubrava</td></tr>
//! </table>"#;
//!
//! let sessions = expand_page(page, 2025)?;
//! assert_eq!(sessions.len(), 4);
//! assert_eq!(sessions[0].location, "Sesvete");
//! # Ok::<(), bibliobus_html::PageError>(())
//! ```
//!
//! Fetching the page is the caller's business; this crate only ever sees
//! HTML text already in memory.

pub mod error;
pub mod page;

pub use error::{PageError, Result};
pub use page::{
    collect_day_blocks, expand_page, parse_fragment, parse_slot_fragment, ScraperParser,
};
