//! Markdown rendering: a plain-text comparison dashboard.
//!
//! One section per city, one table per section. Scraped data is listed on
//! the Northern-hemisphere month axis, so southern cities line up season
//! for season with northern ones.

use crate::models::{CityTable, CombinedTable};
use crate::utils::month_abbrev;
use itertools::Itertools;
use std::fmt::Display;

fn header(index: &str, columns: &[String]) -> String {
    let mut names = std::iter::once(index).chain(columns.iter().map(String::as_str));
    let separators = std::iter::repeat_n(" --- ", columns.len() + 1).join("|");
    format!("| {} |\n|{}|\n", names.join(" | "), separators)
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| format!("{v:.1}"))
}

/// Render the merged scrape, one table per city.
pub fn combined_to_markdown(table: &CombinedTable) -> String {
    let mut md = String::from("# Climate comparison\n\n");
    if table.rows.is_empty() {
        md.push_str("_No data._\n");
        return md;
    }
    md.push_str("Months on the Northern-hemisphere calendar. Precipitation in inches.\n");

    for city in table.cities() {
        md.push_str(&format!("\n## {city}\n\n"));
        md.push_str(&header("Month", &table.columns));
        for row in table
            .city_rows(city)
            .sorted_by_key(|r| r.month.number_from_month())
        {
            let cells = row.values.iter().map(|v| format_value(Some(*v))).join(" | ");
            md.push_str(&format!("| {} | {} |\n", month_abbrev(row.month), cells));
        }
    }
    md
}

/// Render one city table with an arbitrary period index.
pub fn city_table_to_markdown<P: Display>(table: &CityTable<P>, index: &str) -> String {
    let mut md = format!("## {}\n\n", table.city);
    md.push_str(&header(index, &table.columns));
    for row in &table.rows {
        let cells = row.values.iter().map(|v| format_value(*v)).join(" | ");
        md.push_str(&format!("| {} | {} |\n", row.period, cells));
    }
    md
}

/// Render several city tables under one title.
pub fn tables_to_markdown<'a, P: Display + 'a>(
    tables: impl IntoIterator<Item = &'a CityTable<P>>,
    index: &str,
) -> String {
    let sections = tables
        .into_iter()
        .map(|t| city_table_to_markdown(t, index))
        .join("\n");
    format!("# Climate comparison\n\n{sections}")
}
