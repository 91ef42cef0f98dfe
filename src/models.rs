//! Data models for scraped articles and generated feeds.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`ScrapedItem`]: One normalized article extracted from a listing page
//! - [`FeedBundle`]: The three feed serializations produced for one site
//! - [`SiteFailure`] / [`ItemFailure`]: Named failure reasons for the two
//!   levels at which scraping can degrade
//!
//! All models are immutable after construction; a site's item sequence is
//! built once by the scraper and consumed once by the feed assembler.

use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

/// One article extracted from a listing page and enriched with the content
/// of its linked page.
///
/// # Invariants
///
/// * `link` is always a well-formed absolute URL. An item whose link cannot
///   be resolved is never constructed (see [`ItemFailure::LinkResolution`]).
/// * `title` is whitespace-trimmed and may be empty.
/// * `content` is the inner HTML of the first content-selector match on the
///   linked page, or empty when that page was unreachable or unmatched.
/// * `date` falls back to the wall-clock time the item was processed when
///   the source date text did not parse.
#[derive(Debug, Clone)]
pub struct ScrapedItem {
    /// Trimmed text of the title selector match; empty if missing.
    pub title: String,
    /// Absolute URL of the article's content page.
    pub link: Url,
    /// Inner HTML of the content selector match; empty if unavailable.
    pub content: String,
    /// Publication date, or the processing time if the source was unparseable.
    pub date: DateTime<Utc>,
}

/// The three serialized feed bodies produced for one site.
///
/// Created once per site after all items are scraped, handed to the file
/// writer, and not retained afterward.
#[derive(Debug)]
pub struct FeedBundle {
    /// RSS 2.0 document.
    pub rss: String,
    /// Atom 1.0 document.
    pub atom: String,
    /// JSON Feed v1 document.
    pub json: String,
}

/// A failure that takes down one site's whole scrape.
///
/// These are the only failures that empty a site's item sequence; the run
/// itself continues with the remaining sites.
#[derive(Debug, Error)]
pub enum SiteFailure {
    /// The listing page could not be fetched (network error or body read).
    #[error("listing fetch failed for {url}: {source}")]
    ListingFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The listing page answered with a non-success status.
    #[error("listing fetch for {url} returned HTTP {status}")]
    ListingStatus {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// A failure scoped to a single item within a site.
///
/// Covers the link and content-page failures; a missing title or date
/// element and unparseable date text are not failures at all, they degrade
/// inline to an empty string or the current time. The link variants drop
/// the item, the content variants leave it with empty content; none of them
/// propagate to the site.
#[derive(Debug, Error)]
pub enum ItemFailure {
    /// The link selector matched nothing, or the match carried no href.
    #[error("item has no link attribute ({selector})")]
    MissingLink { selector: String },
    /// The href could not be resolved against the site's base URL.
    #[error("could not resolve {href:?} against site URL: {source}")]
    LinkResolution {
        href: String,
        #[source]
        source: url::ParseError,
    },
    /// The content page could not be fetched; the item keeps empty content.
    #[error("content fetch failed for {url}: {source}")]
    ContentFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The content page answered with a non-success status.
    #[error("content fetch for {url} returned HTTP {status}")]
    ContentStatus {
        url: String,
        status: reqwest::StatusCode,
    },
}
