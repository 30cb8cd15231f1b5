//! Command-line interface definitions for Climate Compare.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the Climate Compare application.
///
/// # Examples
///
/// ```sh
/// # Compare the default cities, dashboard on stdout
/// climate_compare
///
/// # Pick cities and keep a JSON copy
/// climate_compare London Wellington -j ./json
///
/// # Fixture data, no network
/// climate_compare Bristol London --harness
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Cities to compare (page titles on the encyclopedia)
    #[arg(value_name = "CITY", default_values = ["Bristol", "London"])]
    pub cities: Vec<String>,

    /// Optional path to a YAML scrape configuration
    #[arg(short, long, env = "CLIMATE_CONFIG")]
    pub config: Option<String>,

    /// Output directory for the JSON report
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Output directory for the Markdown dashboard (printed to stdout when absent)
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,

    /// Use built-in quarterly fixture data instead of scraping
    #[arg(long)]
    pub harness: bool,
}

impl Cli {
    /// Name of the data source, used for output file names.
    pub fn source_name(&self) -> &'static str {
        if self.harness { "harness" } else { "wikipedia" }
    }
}
