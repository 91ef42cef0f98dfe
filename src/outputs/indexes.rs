//! Static `index.html` generation.
//!
//! Rendered once after all sites have been processed; one section per site
//! linking its RSS, Atom, and JSON Feed files. Sites whose scrape failed are
//! not passed in, so the page only advertises files that exist.

use crate::config::SiteConfig;
use crate::utils::safe_name;
use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Render the landing page for the given sites.
pub fn render_index(sites: &[&SiteConfig]) -> String {
    let mut sections = String::new();
    for site in sites {
        let name = safe_name(&site.name);
        write!(
            sections,
            r#"
      <div class="site-feeds">
        <h2>{title}</h2>
        <ul>
          <li><a href="{name}.xml">RSS Feed</a></li>
          <li><a href="{name}.atom">Atom Feed</a></li>
          <li><a href="{name}.json">JSON Feed</a></li>
        </ul>
      </div>"#,
            title = site.name,
        )
        .unwrap();
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>RSS Feeds</title>
    <style>
      body {{ font-family: system-ui; max-width: 800px; margin: 0 auto; padding: 2rem; }}
      .site-feeds {{ margin-bottom: 2rem; }}
      ul {{ list-style-type: none; padding: 0; }}
      li {{ margin: 0.5rem 0; }}
      a {{ color: #0066cc; text-decoration: none; }}
      a:hover {{ text-decoration: underline; }}
    </style>
  </head>
  <body>
    <h1>Available RSS Feeds</h1>{sections}
  </body>
</html>
"#
    )
}

/// Render and write `index.html` into `output_dir`.
#[instrument(level = "info", skip_all, fields(%output_dir, sites = sites.len()))]
pub async fn write_index(output_dir: &str, sites: &[&SiteConfig]) -> Result<(), Box<dyn Error>> {
    let html = render_index(sites);
    let path = Path::new(output_dir).join("index.html");
    fs::write(&path, html).await?;
    info!(path = %path.display(), "Wrote index page");
    Ok(())
}
