//! Climate table extraction.
//!
//! Locates the climate table on a page and turns each `<tr>` into a cleaned
//! [`RawRow`]:
//!
//! 1. Cell text is split into lines (`<br>` counts as a line break) and blank
//!    lines are dropped.
//! 2. Lines that are a bare parenthetical number, e.g. `(46.6)`, are the
//!    imperial duplicate of the preceding value and are dropped.
//! 3. Rows left with fewer than `min_data_cells` items are headers or
//!    footers and are discarded.
//! 4. The rightmost item (the annual figure) is removed.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::{RawPage, RawRow};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, instrument, warn};

static ALTERNATE_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\([0-9.\x{2212}-]+\)$").expect("valid alternate-unit pattern"));

/// Whether a cell is a parenthetical alternate-unit duplicate such as `(3.2)`.
pub fn is_alternate_unit(cell: &str) -> bool {
    ALTERNATE_UNIT.is_match(cell.trim())
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector(format!("{selector}: {e}")))
}

/// Extract the cleaned data rows of the climate table on `page`.
///
/// # Errors
///
/// [`ScrapeError::NotFound`] if no element matches the configured table
/// selector.
#[instrument(level = "info", skip_all, fields(city = %page.city))]
pub fn extract_rows(page: &RawPage, config: &ScrapeConfig) -> Result<Vec<RawRow>, ScrapeError> {
    let document = Html::parse_document(&page.html);
    let table_selector = parse_selector(&config.table_selector)?;
    let row_selector = parse_selector("tr")?;
    let cell_selector = parse_selector("th, td")?;

    let Some(table) = document.select(&table_selector).next() else {
        warn!(
            selector = %config.table_selector,
            page_preview = %truncate_for_log(&page.html, 200),
            "Climate table not found"
        );
        return Err(ScrapeError::NotFound {
            city: page.city.clone(),
            selector: config.table_selector.clone(),
        });
    };

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for tr in table.select(&row_selector) {
        let items: Vec<String> = tr.select(&cell_selector).flat_map(cell_lines).collect();
        match clean_row(items, config) {
            Some(row) => rows.push(row),
            None => skipped += 1,
        }
    }

    debug!(kept = rows.len(), skipped, "Extracted climate table rows");
    Ok(rows)
}

/// Text lines of one cell, trimmed, blanks removed.
fn cell_lines(cell: ElementRef<'_>) -> Vec<String> {
    let mut text = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Apply the blank, alternate-unit, minimum-width and trailing-cell rules.
/// Returns `None` for rows that are not data rows.
pub fn clean_row(items: Vec<String>, config: &ScrapeConfig) -> Option<RawRow> {
    let mut cells: Vec<String> = items
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .filter(|c| !is_alternate_unit(c))
        .collect();

    if cells.len() < config.min_data_cells {
        return None;
    }
    cells.truncate(cells.len().saturating_sub(config.trailing_summary_cells));
    Some(RawRow { cells })
}
