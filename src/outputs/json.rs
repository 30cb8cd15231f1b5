//! JSON output of scraped climate data.
//!
//! The dataset is written as tidy records, one per city and period:
//!
//! ```json
//! {"City": "London", "Month": "Jan", "Average high °C (°F)": 8.1, ...}
//! ```
//!
//! # Output Structure
//!
//! Files are organized by date, named after the data source:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── wikipedia.json
//!     └── harness.json
//! ```

use crate::models::{City, CityTable, CombinedTable, Quarter};
use crate::utils::month_abbrev;
use chrono::Local;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// A serialisable snapshot of one run.
#[derive(Debug, Serialize)]
pub struct ClimateReport {
    pub generated_at: String,
    pub source: String,
    pub columns: Vec<String>,
    pub records: Vec<Map<String, Value>>,
}

impl ClimateReport {
    /// Records from the merged scrape, keyed by `City`, `Month` and each column.
    pub fn from_combined(source: &str, table: &CombinedTable) -> Self {
        let records = table
            .rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert("City".into(), Value::from(row.city.as_str()));
                record.insert("Month".into(), Value::from(month_abbrev(row.month)));
                for (column, value) in table.columns.iter().zip(&row.values) {
                    record.insert(column.clone(), Value::from(*value));
                }
                record
            })
            .collect();
        Self::new(source, table.columns.clone(), records)
    }

    /// Records from fixture tables, keyed by `City`, `Quarter` and each column.
    pub fn from_quarterly(source: &str, tables: &BTreeMap<City, CityTable<Quarter>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut records = Vec::new();
        for table in tables.values() {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
            for row in &table.rows {
                let mut record = Map::new();
                record.insert("City".into(), Value::from(table.city.as_str()));
                record.insert("Quarter".into(), Value::from(row.period.to_string()));
                for (column, value) in table.columns.iter().zip(&row.values) {
                    record.insert(column.clone(), value.map_or(Value::Null, Value::from));
                }
                records.push(record);
            }
        }
        Self::new(source, columns, records)
    }

    fn new(source: &str, columns: Vec<String>, records: Vec<Map<String, Value>>) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            source: source.to_string(),
            columns,
            records,
        }
    }
}

/// Write a [`ClimateReport`] under a dated directory.
///
/// The file is written to `{json_output_dir}/{YYYY-MM-DD}/{source}.json`.
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &ClimateReport,
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    let local_date = Local::now().date_naive();
    let full_json_dir = format!("{}/{}", json_output_dir.trim_end_matches('/'), local_date);

    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!("{}/{}.json", full_json_dir, report.source);
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, records = report.records.len(), "Wrote JSON report");

    Ok(output_json_filename)
}
