//! Per-site pipeline orchestration.
//!
//! Walks the configured sites in order; for each one, scrapes its items,
//! assembles the feed bundle, and writes the three output files. A failure
//! anywhere in one site's pipeline is logged and never stops the sites that
//! follow. The `index.html` landing page is written once at the end and only
//! advertises sites whose files actually landed on disk.

use crate::config::AppConfig;
use crate::feeds;
use crate::outputs::{files, indexes};
use crate::scrape;
use crate::utils::{ensure_writable_dir, safe_name};
use chrono::Utc;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Per-request timeout on every outbound fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Counts reported at the end of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Sites configured.
    pub sites_total: usize,
    /// Sites whose three feed files were written.
    pub sites_written: usize,
    /// Items scraped across all written sites.
    pub items_total: usize,
}

/// Build the shared HTTP client used for every fetch in a run.
pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}

/// Process every configured site and write the index page.
///
/// # Errors
///
/// Only run-fatal conditions return `Err`: an unusable output directory or
/// a failure writing the index page. Site-level and item-level problems are
/// logged and absorbed.
#[instrument(level = "info", skip_all, fields(sites = config.sites.len(), output_dir = %config.output_dir))]
pub async fn run(config: &AppConfig, client: &Client) -> Result<RunSummary, Box<dyn Error>> {
    ensure_writable_dir(&config.output_dir).await?;

    let built_at = Utc::now();
    let mut summary = RunSummary {
        sites_total: config.sites.len(),
        ..RunSummary::default()
    };
    let mut written_sites = Vec::new();

    for site in &config.sites {
        info!(site = %site.name, "Processing site");

        let items = match scrape::scrape_site(client, site).await {
            Ok(items) => items,
            Err(failure) => {
                error!(site = %site.name, error = %failure, "Site scrape failed; continuing with next site");
                continue;
            }
        };

        let bundle = match feeds::assemble(site, &items, built_at) {
            Ok(bundle) => bundle,
            Err(e) => {
                error!(site = %site.name, error = %e, "Feed assembly failed; continuing with next site");
                continue;
            }
        };

        let name = safe_name(&site.name);
        if let Err(e) = files::write_bundle(&config.output_dir, &name, &bundle).await {
            error!(site = %site.name, error = %e, "Feed write failed; continuing with next site");
            continue;
        }

        summary.sites_written += 1;
        summary.items_total += items.len();
        written_sites.push(site);
    }

    indexes::write_index(&config.output_dir, &written_sites).await?;

    info!(
        sites_total = summary.sites_total,
        sites_written = summary.sites_written,
        items_total = summary.items_total,
        "Run complete"
    );
    Ok(summary)
}
