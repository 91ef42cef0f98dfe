//! Filename derivation and output-directory validation helpers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static NON_ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9]+").unwrap());

/// Derive the filesystem-safe name used for a site's output files.
///
/// Lowercases the display name and collapses every run of non-alphanumeric
/// characters into a single hyphen, leading and trailing runs included.
/// Deterministic; two sites whose names collapse to the same safe name are
/// a configuration mistake, not something handled here.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(safe_name("My Site! v2"), "my-site-v2");
/// assert_eq!(safe_name(" Weekly "), "-weekly-");
/// ```
pub fn safe_name(name: &str) -> String {
    NON_ALNUM_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then probes it with a throwaway file.
/// A failure here is fatal for the run; better to find out before any site
/// has been scraped.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
