//! Test fixtures: wiki-style climate pages and an in-memory page source.

use crate::error::ScrapeError;
use crate::models::RawPage;
use crate::scrapers::fetch::PageSource;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Builder for a page carrying one climate table in encyclopedia markup:
/// a caption row, the month header, one `<tr>` per data row with imperial
/// duplicates after `<br>`, an annual column, and a source footer.
pub struct ClimatePage {
    city: String,
    table_class: String,
    rows: Vec<(String, Vec<Option<f64>>)>,
}

impl ClimatePage {
    pub fn new(city: &str) -> Self {
        Self {
            city: city.to_string(),
            table_class: "wikitable collapsible".to_string(),
            rows: Vec::new(),
        }
    }

    pub fn table_class(mut self, class: &str) -> Self {
        self.table_class = class.to_string();
        self
    }

    pub fn row(mut self, label: &str, values: [f64; 12]) -> Self {
        self.rows.push((label.to_string(), values.iter().copied().map(Some).collect()));
        self
    }

    /// A row where `None` renders as a non-numeric cell.
    pub fn sparse_row(mut self, label: &str, values: [Option<f64>; 12]) -> Self {
        self.rows.push((label.to_string(), values.to_vec()));
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::from("<html><body><p>Intro</p>\n");
        html.push_str(&format!("<table class=\"{}\">\n<tbody>\n", self.table_class));
        html.push_str(&format!(
            "<tr><th colspan=\"14\">Climate data for {}</th></tr>\n",
            self.city
        ));

        html.push_str("<tr>\n<th>Month</th>\n");
        for m in MONTHS {
            html.push_str(&format!("<th>{m}</th>\n"));
        }
        html.push_str("<th>Year</th>\n</tr>\n");

        for (label, values) in &self.rows {
            html.push_str(&format!("<tr>\n<th><a href=\"#\">{label}</a></th>\n"));
            for v in values {
                match v {
                    Some(v) => html.push_str(&format!(
                        "<td style=\"background: #FFF;\">{}<br />({})</td>\n",
                        wiki_number(*v),
                        wiki_number(v * 1.8 + 32.0)
                    )),
                    None => html.push_str("<td>—</td>\n"),
                }
            }
            let total: f64 = values.iter().flatten().sum();
            html.push_str(&format!(
                "<td>{}<br />({})</td>\n</tr>\n",
                wiki_number(total),
                wiki_number(total / 25.4)
            ));
        }

        html.push_str("<tr><td colspan=\"14\">Source: Met Office</td></tr>\n");
        html.push_str("</tbody>\n</table>\n</body></html>\n");
        html
    }
}

/// One decimal place, Unicode minus for negatives.
fn wiki_number(v: f64) -> String {
    format!("{v:.1}").replace('-', "\u{2212}")
}

/// Serves fixed markup per city and records the order of requests.
#[derive(Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    unreachable: HashSet<String>,
    pub requests: Mutex<Vec<String>>,
}

impl StaticPages {
    pub fn with(mut self, city: &str, html: String) -> Self {
        self.pages.insert(city.to_string(), html);
        self
    }

    /// Requests for `city` fail with [`ScrapeError::Network`].
    pub fn unreachable(mut self, city: &str) -> Self {
        self.unreachable.insert(city.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl PageSource for StaticPages {
    async fn fetch_page(&self, city: &str) -> Result<RawPage, ScrapeError> {
        self.requests.lock().unwrap().push(city.to_string());
        if self.unreachable.contains(city) {
            let source = reqwest::Client::new()
                .get("http://unreachable host/")
                .build()
                .expect_err("invalid URL fails to build");
            return Err(ScrapeError::Network {
                city: city.to_string(),
                source,
            });
        }
        match self.pages.get(city) {
            Some(html) => Ok(RawPage {
                city: city.to_string(),
                html: html.clone(),
            }),
            None => Ok(RawPage {
                city: city.to_string(),
                html: "<html><body>Not found</body></html>".to_string(),
            }),
        }
    }
}
