//! Fixed quarterly data standing in for the scraper.
//!
//! Each known city has one four-value series, repeated across the `high`,
//! `low` and `precipitation` columns. Useful for exercising outputs without
//! touching the network.

use crate::error::ScrapeError;
use crate::models::{City, CityTable, Quarter, Record};
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Column names of every fixture table.
pub const HARNESS_FIELDS: [&str; 3] = ["high", "low", "precipitation"];

const QUARTERLY_SERIES: &[(&str, [f64; 4])] = &[
    ("Bristol", [4.0, 3.0, 2.0, 4.0]),
    ("London", [5.0, 3.0, 3.0, 6.0]),
    ("Auckland", [8.0, 4.0, 7.0, 9.0]),
    ("Wellington", [10.0, 9.0, 6.0, 8.0]),
];

/// Cities the fixture knows about.
pub fn known_cities() -> impl Iterator<Item = &'static str> {
    QUARTERLY_SERIES.iter().map(|(city, _)| *city)
}

/// Fixture tables keyed by city.
///
/// # Errors
///
/// [`ScrapeError::UnknownCity`] for any city without a fixture series.
#[instrument(level = "info")]
pub fn quarterly(cities: &[String]) -> Result<BTreeMap<City, CityTable<Quarter>>, ScrapeError> {
    let mut tables = BTreeMap::new();
    for city in cities.iter().unique() {
        let (_, series) = QUARTERLY_SERIES
            .iter()
            .find(|(name, _)| *name == city.as_str())
            .ok_or_else(|| {
                warn!(%city, known = ?known_cities().collect::<Vec<_>>(), "No fixture series");
                ScrapeError::UnknownCity(city.clone())
            })?;

        let rows = Quarter::ALL
            .iter()
            .zip(series)
            .map(|(&quarter, &value)| Record {
                period: quarter,
                values: vec![Some(value); HARNESS_FIELDS.len()],
            })
            .collect();
        tables.insert(
            city.clone(),
            CityTable {
                city: city.clone(),
                columns: HARNESS_FIELDS.iter().map(|f| f.to_string()).collect(),
                rows,
            },
        );
    }
    debug!(count = tables.len(), "Built fixture tables");
    Ok(tables)
}
