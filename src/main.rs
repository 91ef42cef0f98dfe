//! # feedforge
//!
//! A feed-generation pipeline that scrapes configured websites for article
//! listings, enriches each item with the full content of its linked page,
//! and writes RSS 2.0, Atom 1.0, and JSON Feed files plus a static index
//! page.
//!
//! ## Usage
//!
//! ```sh
//! feedforge --config config.yml
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Configuration**: Load and validate the YAML site list
//! 2. **Scraping**: Per site, extract listing items and fetch each item's
//!    content page (bounded concurrency, document order preserved)
//! 3. **Assembly**: Serialize each site's items as RSS, Atom, and JSON Feed
//! 4. **Output**: Write the feed files and the `index.html` landing page
//!
//! Per-site and per-item failures are logged and absorbed; only an unusable
//! configuration or output directory fails the process.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod dates;
mod extract;
mod feeds;
mod models;
mod outputs;
mod pipeline;
mod scrape;
mod utils;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feedforge starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.output_dir, "Parsed CLI arguments");

    let mut config = match config::load_config(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config, error = %e, "Failed to load configuration");
            return Err(e);
        }
    };
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    let client = pipeline::build_client()?;
    let summary = match pipeline::run(&config, &client).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Run failed");
            return Err(e);
        }
    };

    info!(
        sites_written = summary.sites_written,
        sites_total = summary.sites_total,
        items = summary.items_total,
        elapsed_secs = start_time.elapsed().as_secs_f32(),
        "Successfully generated all feeds"
    );
    Ok(())
}
