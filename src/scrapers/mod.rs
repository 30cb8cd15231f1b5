//! Climate table scraping pipeline.
//!
//! Each requested city runs through the same steps, one city at a time:
//!
//! 1. **Fetching** ([`fetch`]): get the city's page through a [`PageSource`]
//! 2. **Extraction** ([`table`]): find the climate table and clean its rows
//! 3. **Reshaping** ([`normalize`]): transpose to a month-indexed table and
//!    shift southern-hemisphere months
//!
//! The per-city tables are then merged by [`normalize::combine`]. The first
//! failing city aborts the whole batch; nothing is retried.
//!
//! [`harness`] provides fixed quarterly data with the same per-city shape,
//! for use without network access.

pub mod fetch;
pub mod harness;
pub mod normalize;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::{CityTable, CombinedTable};
use chrono::Month;
use fetch::PageSource;
use futures::stream::{self, StreamExt, TryStreamExt};
use itertools::Itertools;
use tracing::{info, instrument};

/// Scrape every requested city and merge the results.
///
/// Duplicate city names are fetched once. Pages are fetched sequentially.
#[instrument(level = "info", skip_all, fields(requested = cities.len()))]
pub async fn scrape_cities<S: PageSource>(
    source: &S,
    cities: &[String],
    config: &ScrapeConfig,
) -> Result<CombinedTable, ScrapeError> {
    let requested: Vec<&String> = cities.iter().unique().collect();

    let tables: Vec<CityTable<Month>> = stream::iter(requested)
        .then(|city| scrape_city(source, city, config))
        .try_collect()
        .await?;

    let combined = normalize::combine(tables, config);
    info!(
        cities = combined.cities().len(),
        rows = combined.rows.len(),
        columns = ?combined.columns,
        "Scraped climate data"
    );
    Ok(combined)
}

/// Fetch, extract and reshape one city's table.
#[instrument(level = "info", skip(source, config))]
pub async fn scrape_city<S: PageSource>(
    source: &S,
    city: &str,
    config: &ScrapeConfig,
) -> Result<CityTable<Month>, ScrapeError> {
    let page = source.fetch_page(city).await?;
    let rows = table::extract_rows(&page, config)?;
    let mut city_table = normalize::transpose(city, rows, config)?;
    if config.is_southern(city) {
        normalize::shift_hemisphere(&mut city_table);
    }
    Ok(city_table)
}
