//! JSON Feed v1 serialization.
//!
//! See <https://jsonfeed.org/version/1>. Built from plain `serde` structs;
//! the item's HTML content travels unescaped in `content_html`.

use super::FeedMeta;
use crate::models::ScrapedItem;
use chrono::SecondsFormat;
use serde::Serialize;
use std::error::Error;

const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

#[derive(Debug, Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    description: &'a str,
    items: Vec<JsonFeedItem<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonFeedItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    content_html: &'a str,
    date_published: String,
}

/// Serialize the feed as a JSON Feed v1 document.
pub fn write_json(meta: &FeedMeta, items: &[ScrapedItem]) -> Result<String, Box<dyn Error>> {
    let feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &meta.title,
        home_page_url: &meta.link,
        description: &meta.description,
        items: items
            .iter()
            .map(|item| JsonFeedItem {
                id: item.link.as_str(),
                url: item.link.as_str(),
                title: &item.title,
                content_html: &item.content,
                date_published: item.date.to_rfc3339_opts(SecondsFormat::Secs, true),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&feed)?)
}
