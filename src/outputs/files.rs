//! Feed file writing.

use crate::models::FeedBundle;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write one site's feed bundle as `<safe_name>.xml`, `.atom`, and `.json`
/// under `output_dir`.
///
/// The caller has already validated the directory; a write failure here is
/// site-level, the caller decides whether later sites proceed.
#[instrument(level = "info", skip_all, fields(%safe_name))]
pub async fn write_bundle(
    output_dir: &str,
    safe_name: &str,
    bundle: &FeedBundle,
) -> Result<(), Box<dyn Error>> {
    let dir = Path::new(output_dir);
    for (extension, body) in [
        ("xml", &bundle.rss),
        ("atom", &bundle.atom),
        ("json", &bundle.json),
    ] {
        let path = dir.join(format!("{safe_name}.{extension}"));
        fs::write(&path, body).await?;
        info!(path = %path.display(), bytes = body.len(), "Wrote feed file");
    }
    Ok(())
}
