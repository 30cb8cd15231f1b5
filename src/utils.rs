//! Utility functions for cell coercion, month labels, logging and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Numeric coercion of scraped cell text
//! - Short month labels for output
//! - String truncation for logging
//! - File system validation for output directories

use chrono::Month;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Marker written and removed by [`ensure_writable_dir`].
const WRITE_CHECK_FILE: &str = ".climate_compare_write_check";

/// Coerce a scraped cell to a number.
///
/// Accepts the Unicode minus sign (U+2212) that encyclopedia tables use for
/// negative values, and comma thousands separators. Anything else that does
/// not parse as `f64` is a missing value.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(coerce_numeric("\u{2212}3.5"), Some(-3.5));
/// assert_eq!(coerce_numeric("trace"), None);
/// ```
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Three-letter month label, e.g. `"Jan"`.
pub fn month_abbrev(month: Month) -> &'static str {
    &month.name()[..3]
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (on a character
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting an empty marker file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    let dir = Path::new(path);
    fs::create_dir_all(dir).await?;

    let check = dir.join(WRITE_CHECK_FILE);
    fs::write(&check, b"").await?;
    if let Err(e) = fs::remove_file(&check).await {
        warn!(file = %check.display(), error = %e, "Could not remove write check file");
    }
    info!("Output directory is writable");
    Ok(())
}
