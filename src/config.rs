//! Site-list configuration loading and validation.
//!
//! The configuration is a YAML file naming an output directory and an
//! ordered list of sites, each described by a base URL and the CSS selectors
//! that locate its listing items and their fields:
//!
//! ```yaml
//! outputDir: ./feeds
//! sites:
//!   - name: Example News
//!     url: https://news.example.com
//!     selector: article.story
//!     titleSelector: h2
//!     linkSelector: a
//!     dateSelector: time
//!     contentSelector: div.article-body
//! ```
//!
//! Validation is eager: a config missing any selector, carrying a blank
//! selector, a selector that fails to compile, or a non-absolute `url` is
//! rejected at load time rather than failing mid-scrape.

use scraper::Selector;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// The full parsed configuration for one run.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory the feed files and index page are written into.
    pub output_dir: String,
    /// Sites to scrape, processed in the order given.
    pub sites: Vec<SiteConfig>,
}

/// One configured source site.
///
/// All selector fields are required and non-empty; `url` must be absolute.
/// The struct is loaded once per run and never mutated afterward.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Display name; also the basis of the output filenames.
    pub name: String,
    /// Absolute URL of the listing page.
    pub url: String,
    /// Selector matching each repeated item container on the listing page.
    pub selector: String,
    /// Selector for the title element, scoped within an item container.
    pub title_selector: String,
    /// Selector for the link element, scoped within an item container.
    pub link_selector: String,
    /// Selector for the date element, scoped within an item container.
    pub date_selector: String,
    /// Selector for the article body, applied to the fetched content page.
    pub content_selector: String,
}

/// A configuration rejected at load time, naming the offending site/field.
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error for ConfigError {}

impl ConfigError {
    fn new(message: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            message: message.into(),
        })
    }
}

/// Read and validate the configuration file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, or fails
/// [`validate`]. All of these are fatal for the run.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, Box<dyn Error>> {
    let raw = fs::read_to_string(path.as_ref()).await?;
    let config: AppConfig = serde_yaml::from_str(&raw)?;
    validate(&config)?;
    info!(sites = config.sites.len(), output_dir = %config.output_dir, "Loaded configuration");
    Ok(config)
}

/// Check every invariant the scraper relies on.
///
/// Selector strings are compiled here once so a typo surfaces as a config
/// error instead of a runtime panic inside the scrape loop.
pub fn validate(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    if config.output_dir.trim().is_empty() {
        return Err(ConfigError::new("outputDir must not be empty"));
    }
    if config.sites.is_empty() {
        return Err(ConfigError::new("at least one site must be configured"));
    }
    for site in &config.sites {
        if site.name.trim().is_empty() {
            return Err(ConfigError::new("site name must not be empty"));
        }
        let url = Url::parse(&site.url)
            .map_err(|e| ConfigError::new(format!("site {:?}: bad url {:?}: {e}", site.name, site.url)))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::new(format!(
                "site {:?}: url {:?} is not an absolute base URL",
                site.name, site.url
            )));
        }
        for (field, value) in [
            ("selector", &site.selector),
            ("titleSelector", &site.title_selector),
            ("linkSelector", &site.link_selector),
            ("dateSelector", &site.date_selector),
            ("contentSelector", &site.content_selector),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::new(format!(
                    "site {:?}: {field} must not be empty",
                    site.name
                )));
            }
            if Selector::parse(value).is_err() {
                return Err(ConfigError::new(format!(
                    "site {:?}: {field} {value:?} is not a valid selector",
                    site.name
                )));
            }
        }
    }
    Ok(())
}

impl SiteConfig {
    /// The site's listing URL as a parsed [`Url`].
    ///
    /// Infallible after [`validate`] has accepted the config.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
outputDir: ./feeds
sites:
  - name: Example News
    url: https://news.example.com
    selector: article.story
    titleSelector: h2
    linkSelector: a
    dateSelector: time
    contentSelector: div.article-body
"#
    }

    #[test]
    fn test_parse_and_validate_sample() {
        let config: AppConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.output_dir, "./feeds");
        assert_eq!(config.sites.len(), 1);
        assert_eq!(config.sites[0].title_selector, "h2");
        validate(&config).unwrap();
    }

    #[test]
    fn test_missing_selector_is_rejected_by_serde() {
        let yaml = r#"
outputDir: ./feeds
sites:
  - name: Example News
    url: https://news.example.com
    selector: article.story
    titleSelector: h2
    linkSelector: a
    dateSelector: time
"#;
        let parsed: Result<AppConfig, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_blank_selector_is_rejected() {
        let mut config: AppConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        config.sites[0].date_selector = "  ".to_string();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("dateSelector"));
        assert!(err.contains("Example News"));
    }

    #[test]
    fn test_invalid_selector_syntax_is_rejected() {
        let mut config: AppConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        config.sites[0].selector = "li[".to_string();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("selector"));
    }

    #[test]
    fn test_relative_url_is_rejected() {
        let mut config: AppConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        config.sites[0].url = "/just/a/path".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_site_list_is_rejected() {
        let config = AppConfig {
            output_dir: "./feeds".to_string(),
            sites: Vec::new(),
        };
        assert!(validate(&config).is_err());
    }
}
