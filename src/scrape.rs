//! Listing-page scraping and per-item content enrichment.
//!
//! This is the heart of the pipeline. For one site it fetches the listing
//! page, extracts the repeated item containers in document order, resolves
//! each item's link against the site URL, fetches the linked content page,
//! and normalizes the date text into a timestamp.
//!
//! # Failure policy
//!
//! Only a listing fetch failure empties a site. Everything below that
//! degrades per item:
//!
//! - missing title or date element: empty string / current time
//! - missing or unresolvable link: the item is dropped (a [`ScrapedItem`]
//!   always carries a well-formed absolute link, so there is nothing valid
//!   to emit for it)
//! - content page unreachable or unmatched: empty content
//!
//! Content pages are fetched concurrently, at most
//! [`CONTENT_FETCH_CONCURRENCY`] in flight per site, and the output sequence
//! always matches listing document order regardless of completion order.

use crate::config::SiteConfig;
use crate::dates;
use crate::extract;
use crate::models::{ItemFailure, ScrapedItem, SiteFailure};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Upper bound on in-flight content-page fetches for one site.
pub const CONTENT_FETCH_CONCURRENCY: usize = 8;

/// An item as it exists after listing extraction, before its content page
/// has been fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedItem {
    pub title: String,
    pub link: Url,
    pub date_text: String,
}

/// Scrape one site into its ordered item sequence.
///
/// The only error this returns is a whole-site listing failure; the caller
/// logs it and skips the site. Per-item failures degrade inside as described
/// in the module docs and never surface here.
#[instrument(level = "info", skip_all, fields(site = %site.name, url = %site.url))]
pub async fn scrape_site(
    client: &Client,
    site: &SiteConfig,
) -> Result<Vec<ScrapedItem>, SiteFailure> {
    let base = match site.base_url() {
        Ok(base) => base,
        Err(e) => {
            // Unreachable for validated configs, but never worth a panic.
            error!(error = %e, "Site URL failed to parse");
            return Ok(Vec::new());
        }
    };

    let listing_html = fetch_page(client, site.url.clone()).await?;

    let listed = extract_listing(&listing_html, site, &base);
    info!(count = listed.len(), "Extracted listing items");

    let items: Vec<ScrapedItem> = stream::iter(listed)
        .map(|entry| async move {
            let content = match fetch_content(client, &entry.link, &site.content_selector).await {
                Ok(content) => content,
                Err(failure) => {
                    warn!(error = %failure, link = %entry.link, "Content fetch failed; emitting empty content");
                    String::new()
                }
            };
            let date = match dates::normalize(&entry.date_text) {
                Some(date) => date,
                None => {
                    debug!(text = %entry.date_text, link = %entry.link, "Date text unparseable; using current time");
                    Utc::now()
                }
            };
            ScrapedItem {
                title: entry.title,
                link: entry.link,
                content,
                date,
            }
        })
        .buffered(CONTENT_FETCH_CONCURRENCY)
        .collect()
        .await;

    info!(count = items.len(), "Scraped site");
    Ok(items)
}

/// Extract the listing items from raw HTML, in document order.
///
/// Items whose link attribute is absent or fails to resolve against `base`
/// are dropped here with a warning; every returned entry carries an absolute
/// link.
pub fn extract_listing(html: &str, site: &SiteConfig, base: &Url) -> Vec<ListedItem> {
    let document = Html::parse_document(html);
    let Ok(container) = Selector::parse(&site.selector) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for element in document.select(&container) {
        let title = extract::first_text(element, &site.title_selector);
        let date_text = extract::first_text(element, &site.date_selector);

        let link = match extract::first_attr(element, &site.link_selector, "href") {
            Some(href) => match base.join(&href) {
                Ok(link) => link,
                Err(e) => {
                    let failure = ItemFailure::LinkResolution { href, source: e };
                    warn!(error = %failure, title = %title, "Dropping item");
                    continue;
                }
            },
            None => {
                let failure = ItemFailure::MissingLink {
                    selector: site.link_selector.clone(),
                };
                warn!(error = %failure, title = %title, "Dropping item");
                continue;
            }
        };

        entries.push(ListedItem {
            title,
            link,
            date_text,
        });
    }
    entries
}

/// Fetch the listing page body, mapping failures to [`SiteFailure`].
async fn fetch_page(client: &Client, url: String) -> Result<String, SiteFailure> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|source| SiteFailure::ListingFetch {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SiteFailure::ListingStatus { url, status });
    }

    response
        .text()
        .await
        .map_err(|source| SiteFailure::ListingFetch { url, source })
}

/// Fetch one content page and return the inner HTML of the first
/// `content_selector` match, or an empty string when nothing matches.
async fn fetch_content(
    client: &Client,
    link: &Url,
    content_selector: &str,
) -> Result<String, ItemFailure> {
    let response = client
        .get(link.clone())
        .send()
        .await
        .map_err(|source| ItemFailure::ContentFetch {
            url: link.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ItemFailure::ContentStatus {
            url: link.to_string(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| ItemFailure::ContentFetch {
            url: link.to_string(),
            source,
        })?;

    // Parse and drop the document before returning; Html is not Send and
    // must not live across an await point.
    let content = {
        let document = Html::parse_document(&body);
        extract::first_inner_html(&document, content_selector).unwrap_or_default()
    };
    debug!(bytes = content.len(), link = %link, "Extracted content");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_site() -> SiteConfig {
        SiteConfig {
            name: "Example News".to_string(),
            url: "https://news.example.com/section/".to_string(),
            selector: "article.story".to_string(),
            title_selector: "h2".to_string(),
            link_selector: "a".to_string(),
            date_selector: "time".to_string(),
            content_selector: "div.article-body".to_string(),
        }
    }

    const LISTING: &str = r#"
        <html><body>
          <article class="story">
            <h2> First Story </h2>
            <a href="/2025/first">more</a>
            <time>2025-08-01</time>
          </article>
          <article class="story">
            <h2>Second Story</h2>
            <a href="https://elsewhere.example.org/second">more</a>
            <time>not a date</time>
          </article>
          <article class="story">
            <h2>No Link Story</h2>
            <time>2025-08-03</time>
          </article>
        </body></html>
    "#;

    #[test]
    fn test_extract_listing_preserves_document_order() {
        let site = test_site();
        let base = site.base_url().unwrap();
        let entries = extract_listing(LISTING, &site, &base);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "First Story");
        assert_eq!(entries[1].title, "Second Story");
    }

    #[test]
    fn test_relative_links_resolve_against_site_url() {
        let site = test_site();
        let base = site.base_url().unwrap();
        let entries = extract_listing(LISTING, &site, &base);
        assert_eq!(entries[0].link.as_str(), "https://news.example.com/2025/first");
        // Absolute hrefs pass through untouched.
        assert_eq!(
            entries[1].link.as_str(),
            "https://elsewhere.example.org/second"
        );
    }

    #[test]
    fn test_item_without_link_is_dropped() {
        let site = test_site();
        let base = site.base_url().unwrap();
        let entries = extract_listing(LISTING, &site, &base);
        assert!(entries.iter().all(|e| e.title != "No Link Story"));
    }

    #[test]
    fn test_unmatched_container_selector_yields_nothing() {
        let site = SiteConfig {
            selector: "li.nonexistent".to_string(),
            ..test_site()
        };
        let base = site.base_url().unwrap();
        assert!(extract_listing(LISTING, &site, &base).is_empty());
    }

    #[test]
    fn test_missing_title_and_date_yield_empty_fields() {
        let html = r#"<article class="story"><a href="/bare">x</a></article>"#;
        let site = test_site();
        let base = site.base_url().unwrap();
        let entries = extract_listing(html, &site, &base);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].date_text, "");
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serve `response` to exactly one connection and return the URL.
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{addr}/")
    }

    /// A local URL with nothing listening on its port.
    async fn dead_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/article")
    }

    #[tokio::test]
    async fn test_listing_http_500_is_a_site_failure() {
        let url = serve_once(http_response("500 Internal Server Error", "")).await;
        let site = SiteConfig { url, ..test_site() };
        let client = Client::new();
        let result = scrape_site(&client, &site).await;
        assert!(matches!(
            result,
            Err(SiteFailure::ListingStatus { status, .. }) if status.as_u16() == 500
        ));
    }

    #[tokio::test]
    async fn test_unreachable_listing_is_a_site_failure() {
        let site = SiteConfig {
            url: dead_url().await,
            ..test_site()
        };
        let client = Client::new();
        let result = scrape_site(&client, &site).await;
        assert!(matches!(result, Err(SiteFailure::ListingFetch { .. })));
    }

    #[tokio::test]
    async fn test_failed_content_fetch_yields_empty_content_only_for_that_item() {
        let article = http_response(
            "200 OK",
            r#"<html><body><div class="article-body"><p>Body text</p></div></body></html>"#,
        );
        let good_link = serve_once(article).await;
        let bad_link = dead_url().await;

        let listing = format!(
            r#"<html><body>
              <article class="story">
                <h2>First Story</h2><a href="{bad_link}">more</a><time>2025-08-01</time>
              </article>
              <article class="story">
                <h2>Second Story</h2><a href="{good_link}">more</a><time>2025-08-02</time>
              </article>
            </body></html>"#
        );
        let site = SiteConfig {
            url: serve_once(http_response("200 OK", &listing)).await,
            ..test_site()
        };

        let client = Client::new();
        let items = scrape_site(&client, &site).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First Story");
        assert_eq!(items[0].content, "");
        assert_eq!(items[1].title, "Second Story");
        assert!(items[1].content.contains("<p>Body text</p>"));
    }
}
