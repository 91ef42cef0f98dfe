//! Feed assembly (RSS 2.0, Atom 1.0, JSON Feed).
//!
//! Converts one site's metadata plus its scraped item sequence into the
//! three serialized feed bodies of a [`FeedBundle`]:
//!
//! - **RSS 2.0** ([`rss`]): written with `quick_xml`
//! - **Atom 1.0** ([`atom`]): written with `quick_xml`
//! - **JSON Feed v1** ([`json`]): serialized with `serde_json`
//!
//! All three share the same [`FeedMeta`] and emit one entry per item in
//! input order, mapping title→title, link→id and link, content→content,
//! date→date.

use crate::config::SiteConfig;
use crate::models::{FeedBundle, ScrapedItem};
use chrono::{DateTime, Utc};
use std::error::Error;
use tracing::{debug, instrument};

pub mod atom;
mod common;
pub mod json;
pub mod rss;

/// Channel-level metadata shared by all three serializations.
#[derive(Debug)]
pub struct FeedMeta {
    /// Feed title (the site's display name).
    pub title: String,
    /// Synthesized description.
    pub description: String,
    /// Feed identity and alternate link (the site's listing URL).
    pub link: String,
    /// Fixed feed language.
    pub language: &'static str,
    /// Build timestamp shared across the bundle.
    pub updated: DateTime<Utc>,
    /// Fixed generator label.
    pub generator: String,
}

impl FeedMeta {
    fn for_site(site: &SiteConfig, built_at: DateTime<Utc>) -> Self {
        Self {
            title: site.name.clone(),
            description: format!("RSS feed for {}", site.name),
            link: site.url.clone(),
            language: "en",
            updated: built_at,
            generator: format!(
                "{} {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

/// Build the three feed serializations for one site.
///
/// `built_at` is passed in rather than read from the clock so every body in
/// the bundle carries the same `updated` value.
#[instrument(level = "info", skip_all, fields(site = %site.name, items = items.len()))]
pub fn assemble(
    site: &SiteConfig,
    items: &[ScrapedItem],
    built_at: DateTime<Utc>,
) -> Result<FeedBundle, Box<dyn Error>> {
    let meta = FeedMeta::for_site(site, built_at);
    let bundle = FeedBundle {
        rss: rss::write_rss(&meta, items)?,
        atom: atom::write_atom(&meta, items)?,
        json: json::write_json(&meta, items)?,
    };
    debug!(
        rss_bytes = bundle.rss.len(),
        atom_bytes = bundle.atom.len(),
        json_bytes = bundle.json.len(),
        "Assembled feed bundle"
    );
    Ok(bundle)
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;
    use chrono::TimeZone;
    use url::Url;

    pub fn site() -> SiteConfig {
        SiteConfig {
            name: "Example News".to_string(),
            url: "https://news.example.com".to_string(),
            selector: "article".to_string(),
            title_selector: "h2".to_string(),
            link_selector: "a".to_string(),
            date_selector: "time".to_string(),
            content_selector: "div.body".to_string(),
        }
    }

    pub fn built_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 27, 12, 0, 0).unwrap()
    }

    pub fn items() -> Vec<ScrapedItem> {
        vec![
            ScrapedItem {
                title: "First Story".to_string(),
                link: Url::parse("https://news.example.com/2025/first").unwrap(),
                content: "<p>Ampersands &amp; angles stay intact.</p>".to_string(),
                date: Utc.with_ymd_and_hms(2025, 8, 1, 9, 30, 0).unwrap(),
            },
            ScrapedItem {
                title: "Second Story".to_string(),
                link: Url::parse("https://news.example.com/2025/second").unwrap(),
                content: String::new(),
                date: Utc.with_ymd_and_hms(2025, 8, 2, 9, 30, 0).unwrap(),
            },
        ]
    }
}
