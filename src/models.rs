//! Data models for scraped climate tables.
//!
//! This module defines the structures that flow through the pipeline:
//! - [`RawPage`] and [`RawRow`]: transient scrape artifacts for one city
//! - [`CityTable`]: one city's tidy table, one [`Record`] per period
//! - [`CombinedTable`]: every requested city merged, with no missing values
//!
//! Missing values are explicit `Option`s until the merge step, which drops
//! any column that is incomplete anywhere in the dataset. The combined
//! table therefore stores plain `f64`s.

use chrono::Month;
use itertools::Itertools;
use std::fmt;

/// City identifier: page lookup key and result discriminator.
pub type City = String;

/// Unparsed markup for one city's page.
#[derive(Debug)]
pub struct RawPage {
    pub city: City,
    pub html: String,
}

/// Cleaned cell strings from one table row. The first cell is the row label.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn label(&self) -> Option<&str> {
        self.cells.first().map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        self.cells.get(1..).unwrap_or_default()
    }
}

/// One row of a [`CityTable`]: a period and a value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<P> {
    pub period: P,
    pub values: Vec<Option<f64>>,
}

/// A tidy per-city table indexed by period (calendar month for scraped
/// data, [`Quarter`] for the fixture data).
#[derive(Debug, Clone, PartialEq)]
pub struct CityTable<P> {
    pub city: City,
    pub columns: Vec<String>,
    pub rows: Vec<Record<P>>,
}

#[cfg(test)]
impl<P> CityTable<P> {
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// All values of one column, in row order.
    pub fn column(&self, label: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.column_index(label)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }
}

/// Calendar quarter, the period axis of the fixture data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        f.write_str(s)
    }
}

/// One row of the combined dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRow {
    pub city: City,
    pub month: Month,
    pub values: Vec<f64>,
}

/// All requested cities concatenated. Every column is complete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedTable {
    pub columns: Vec<String>,
    pub rows: Vec<CombinedRow>,
}

impl CombinedTable {
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Distinct city tags in first-seen order.
    pub fn cities(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.city.as_str()).unique().collect()
    }

    pub fn city_rows<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a CombinedRow> + 'a {
        self.rows.iter().filter(move |r| r.city == city)
    }

    #[cfg(test)]
    pub fn value(&self, row: &CombinedRow, label: &str) -> Option<f64> {
        self.column_index(label).map(|idx| row.values[idx])
    }
}
