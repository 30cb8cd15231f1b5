//! Scraping configuration.
//!
//! Every assumption about the source page layout lives here as a named
//! constant, so a change to the encyclopedia's table markup is a one-line
//! edit. Each constant backs a field of [`ScrapeConfig`], which can be
//! overridden from a YAML file passed with `--config`.
//!
//! ```yaml
//! base_url: https://en.wikipedia.org/wiki/
//! southern_hemisphere: [Auckland, Melbourne, Wellington, Sydney]
//! timeout_secs: 10
//! ```

use serde::Deserialize;
use std::error::Error;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Page URL prefix; the city name is appended as the last path segment.
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

/// CSS selector for the monthly climate table.
pub const CLIMATE_TABLE_SELECTOR: &str = "table.wikitable.collapsible";

/// Rows with fewer non-blank cells than this are headers or footers.
/// Twelve months plus a label plus the annual column, after imperial
/// duplicates are stripped.
pub const MIN_DATA_CELLS: usize = 12;

/// Cells dropped from the right of each surviving row (the annual figure).
pub const TRAILING_SUMMARY_CELLS: usize = 1;

/// Label of the header row that carries the month names.
pub const MONTH_LABEL: &str = "Month";

/// Primary precipitation row label.
pub const PRECIPITATION_LABEL: &str = "Average precipitation mm (inches)";

/// Fallback precipitation row label used by some pages.
pub const RAINFALL_LABEL: &str = "Average rainfall mm (inches)";

/// Cities whose months are shifted by half a year onto the northern calendar.
pub const SOUTHERN_HEMISPHERE_CITIES: &[&str] = &["Melbourne", "Wellington"];

pub const MM_PER_INCH: f64 = 25.4;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = concat!("climate_compare/", env!("CARGO_PKG_VERSION"));

/// Runtime scraping configuration. Missing YAML keys take the defaults above.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub table_selector: String,
    pub min_data_cells: usize,
    pub trailing_summary_cells: usize,
    pub month_label: String,
    pub precipitation_label: String,
    pub rainfall_label: String,
    pub southern_hemisphere: Vec<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            table_selector: CLIMATE_TABLE_SELECTOR.to_string(),
            min_data_cells: MIN_DATA_CELLS,
            trailing_summary_cells: TRAILING_SUMMARY_CELLS,
            month_label: MONTH_LABEL.to_string(),
            precipitation_label: PRECIPITATION_LABEL.to_string(),
            rainfall_label: RAINFALL_LABEL.to_string(),
            southern_hemisphere: SOUTHERN_HEMISPHERE_CITIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Whether `city` gets the half-year month remap. Exact, case-sensitive match.
    pub fn is_southern(&self, city: &str) -> bool {
        self.southern_hemisphere.iter().any(|c| c == city)
    }
}

/// Load configuration from a YAML file, or the defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<ScrapeConfig, Box<dyn Error>> {
    let Some(path) = path else {
        debug!("No config file given; using defaults");
        return Ok(ScrapeConfig::default());
    };

    let raw = fs::read_to_string(path).await?;
    let config = parse_config(&raw)?;
    info!(
        path,
        base_url = %config.base_url,
        southern = ?config.southern_hemisphere,
        "Loaded scrape configuration"
    );
    Ok(config)
}

fn parse_config(raw: &str) -> Result<ScrapeConfig, serde_yaml::Error> {
    if raw.trim().is_empty() {
        return Ok(ScrapeConfig::default());
    }
    serde_yaml::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = ScrapeConfig::default();
        assert_eq!(config.min_data_cells, 12);
        assert_eq!(config.trailing_summary_cells, 1);
        assert_eq!(config.table_selector, "table.wikitable.collapsible");
        assert!(config.base_url.ends_with('/'));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = parse_config("timeout_secs: 5\nsouthern_hemisphere: [Auckland]\n").unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.southern_hemisphere, vec!["Auckland".to_string()]);
        assert!(config.is_southern("Auckland"));
        assert!(!config.is_southern("Wellington"));
        assert_eq!(config.month_label, MONTH_LABEL);
        assert_eq!(config.precipitation_label, PRECIPITATION_LABEL);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = parse_config("  \n").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_is_southern() {
        let config = ScrapeConfig::default();
        assert!(config.is_southern("Wellington"));
        assert!(config.is_southern("Melbourne"));
        assert!(!config.is_southern("London"));
        assert!(!config.is_southern("Auckland"));
        assert!(!config.is_southern("wellington"));
    }

    #[tokio::test]
    async fn test_load_config_without_path() {
        let config = load_config(None).await.unwrap();
        assert_eq!(config.rainfall_label, RAINFALL_LABEL);
    }
}
