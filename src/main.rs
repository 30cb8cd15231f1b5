//! # Climate Compare
//!
//! Scrapes the monthly climate tables from encyclopedia city pages and
//! lays the cities side by side: mean daily highs and lows, and monthly
//! precipitation in inches.
//!
//! ## Usage
//!
//! ```sh
//! climate_compare London Wellington -j ./json -m ./markdown
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Download each city's page, one at a time
//! 2. **Extraction**: Locate the climate table and clean its rows
//! 3. **Normalization**: Transpose to months, align hemispheres, merge cities,
//!    reconcile precipitation, drop incomplete columns, convert units
//! 4. **Output**: Markdown dashboard and an optional JSON report

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use outputs::json::{self, ClimateReport};
use outputs::markdown;
use scrapers::fetch::HttpPageSource;
use scrapers::harness;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("climate_compare starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = config::load_config(args.config.as_deref()).await?;

    // Fail before any network traffic if an output dir is unusable.
    for dir in [&args.json_output_dir, &args.markdown_output_dir].into_iter().flatten() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e);
        }
    }

    let (md, report) = if args.harness {
        let tables = harness::quarterly(&args.cities)?;
        info!(cities = tables.len(), "Loaded fixture data");
        (
            markdown::tables_to_markdown(tables.values(), "Quarter"),
            ClimateReport::from_quarterly(args.source_name(), &tables),
        )
    } else {
        let source = HttpPageSource::new(&config)?;
        let combined = scrapers::scrape_cities(&source, &args.cities, &config).await?;
        (
            markdown::combined_to_markdown(&combined),
            ClimateReport::from_combined(args.source_name(), &combined),
        )
    };

    if let Some(dir) = &args.json_output_dir {
        let path = json::write_report(&report, dir).await?;
        info!(%path, "JSON report written");
    }

    match &args.markdown_output_dir {
        Some(dir) => {
            let path = format!(
                "{}/{}_{}.md",
                dir.trim_end_matches('/'),
                Local::now().date_naive(),
                args.source_name()
            );
            info!(%path, "Writing Markdown");
            if let Err(e) = tokio::fs::write(&path, &md).await {
                error!(%path, error = %e, "Failed writing Markdown");
                return Err(e.into());
            }
        }
        None => println!("{md}"),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
