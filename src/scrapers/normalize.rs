//! Reshaping cleaned rows into tidy tables.
//!
//! Per city, [`transpose`] turns label-first rows into a [`CityTable`]
//! indexed by calendar month and [`shift_hemisphere`] moves southern
//! cities onto the northern calendar. Across cities, [`combine`] merges
//! the tables, unions the two precipitation rows, drops every column that
//! is incomplete anywhere, and converts precipitation to inches.

use crate::config::{MM_PER_INCH, ScrapeConfig};
use crate::error::ScrapeError;
use crate::models::{City, CityTable, CombinedRow, CombinedTable, RawRow, Record};
use crate::utils::coerce_numeric;
use chrono::Month;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Transpose cleaned rows into a month-indexed table.
///
/// The row labelled `config.month_label` supplies the month of each value
/// position; every other row becomes a column. Cells that do not coerce to
/// a number become `None`. Repeated row labels keep their first occurrence.
///
/// # Errors
///
/// [`ScrapeError::Layout`] when the month row is missing, holds a label
/// that is not a month, or repeats a month.
#[instrument(level = "debug", skip(rows, config))]
pub fn transpose(
    city: &str,
    rows: Vec<RawRow>,
    config: &ScrapeConfig,
) -> Result<CityTable<Month>, ScrapeError> {
    let month_row = rows
        .iter()
        .find(|r| r.label() == Some(config.month_label.as_str()))
        .ok_or_else(|| ScrapeError::layout(city, format!("no `{}` row", config.month_label)))?;

    let mut seen = HashSet::new();
    let mut months = Vec::with_capacity(12);
    for label in month_row.values() {
        let month: Month = label
            .parse()
            .map_err(|_| ScrapeError::layout(city, format!("unrecognised month `{label}`")))?;
        if !seen.insert(month.number_from_month()) {
            return Err(ScrapeError::layout(city, format!("month `{label}` repeated")));
        }
        months.push(month);
    }

    let mut columns: Vec<String> = Vec::new();
    let mut series: Vec<&[String]> = Vec::new();
    for row in &rows {
        let Some(label) = row.label() else { continue };
        if label == config.month_label {
            continue;
        }
        if columns.iter().any(|c| c == label) {
            debug!(%label, "Duplicate row label; keeping first");
            continue;
        }
        if row.values().len() > months.len() {
            warn!(
                %label,
                extra = row.values().len() - months.len(),
                "Row wider than month header; ignoring extra cells"
            );
        }
        columns.push(label.to_string());
        series.push(row.values());
    }

    let mut misses = 0usize;
    let records = months
        .iter()
        .enumerate()
        .map(|(i, &month)| {
            let values = series
                .iter()
                .map(|cells| {
                    let value = cells.get(i).and_then(|c| coerce_numeric(c));
                    if value.is_none() {
                        misses += 1;
                    }
                    value
                })
                .collect();
            Record {
                period: month,
                values,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        months = records.len(),
        columns = columns.len(),
        missing_cells = misses,
        "Transposed climate table"
    );
    Ok(CityTable {
        city: city.to_string(),
        columns,
        rows: records,
    })
}

/// The month six calendar positions later. Applying it twice is the identity.
pub fn shift_half_year(month: Month) -> Month {
    (0..6).fold(month, |m, _| m.succ())
}

/// Remap every row of a southern-hemisphere table onto the northern calendar.
pub fn shift_hemisphere(table: &mut CityTable<Month>) {
    for record in &mut table.rows {
        record.period = shift_half_year(record.period);
    }
    debug!(city = %table.city, "Shifted months by half a year");
}

struct PendingRow {
    city: City,
    month: Month,
    values: Vec<Option<f64>>,
}

/// Merge per-city tables into one dataset.
///
/// Columns are the union of all city columns in first-seen order. The
/// primary precipitation column takes the fallback column's value wherever
/// it is missing, and the fallback column is removed. Any column still
/// missing a value in any row is then dropped, and the surviving
/// precipitation column is converted from millimetres to inches.
#[instrument(level = "info", skip_all, fields(cities = tables.len()))]
pub fn combine(tables: Vec<CityTable<Month>>, config: &ScrapeConfig) -> CombinedTable {
    let mut columns: Vec<String> = tables
        .iter()
        .flat_map(|t| t.columns.iter())
        .unique()
        .cloned()
        .collect();
    let positions: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut rows = Vec::new();
    for table in &tables {
        let targets: Vec<Option<usize>> = table
            .columns
            .iter()
            .map(|c| positions.get(c.as_str()).copied())
            .collect();
        for record in &table.rows {
            let mut values = vec![None; columns.len()];
            for (value, target) in record.values.iter().zip(&targets) {
                if let Some(idx) = target {
                    values[*idx] = *value;
                }
            }
            rows.push(PendingRow {
                city: table.city.clone(),
                month: record.period,
                values,
            });
        }
    }

    reconcile_precipitation(
        &mut columns,
        &mut rows,
        &config.precipitation_label,
        &config.rainfall_label,
    );

    let (keep, dropped): (Vec<usize>, Vec<usize>) = (0..columns.len())
        .partition(|&i| rows.iter().all(|r| r.values[i].is_some()));
    if !dropped.is_empty() {
        info!(
            dropped = ?dropped.iter().map(|&i| columns[i].as_str()).collect::<Vec<_>>(),
            "Dropped incomplete columns"
        );
    }

    let mut combined = CombinedTable {
        columns: keep.iter().map(|&i| columns[i].clone()).collect(),
        rows: rows
            .into_iter()
            .map(|r| CombinedRow {
                city: r.city,
                month: r.month,
                values: keep.iter().filter_map(|&i| r.values[i]).collect(),
            })
            .collect(),
    };

    if let Some(idx) = combined.column_index(&config.precipitation_label) {
        for row in &mut combined.rows {
            row.values[idx] /= MM_PER_INCH;
        }
        debug!(column = %config.precipitation_label, "Converted precipitation to inches");
    }

    info!(
        rows = combined.rows.len(),
        columns = combined.columns.len(),
        "Combined climate tables"
    );
    combined
}

/// Fill the primary column from the fallback and remove the fallback.
/// With no primary column anywhere, the fallback is renamed instead.
fn reconcile_precipitation(
    columns: &mut Vec<String>,
    rows: &mut [PendingRow],
    primary: &str,
    fallback: &str,
) {
    let Some(fb) = columns.iter().position(|c| c == fallback) else {
        return;
    };
    let Some(pr) = columns.iter().position(|c| c == primary) else {
        columns[fb] = primary.to_string();
        return;
    };

    for row in rows.iter_mut() {
        if row.values[pr].is_none() {
            row.values[pr] = row.values[fb];
        }
        row.values.remove(fb);
    }
    columns.remove(fb);
}
