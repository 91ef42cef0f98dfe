//! Command-line interface definitions.
//!
//! This module defines the CLI arguments using the `clap` crate. The config
//! path defaults to `config.yml` next to the invocation; the output
//! directory normally comes from the config file but can be overridden.

use clap::Parser;

/// Command-line arguments for the feed generator.
///
/// # Examples
///
/// ```sh
/// # Use ./config.yml and its configured output directory
/// feedforge
///
/// # Explicit config and output override
/// feedforge --config /etc/feedforge/sites.yml --output-dir ./public
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML site-list configuration
    #[arg(short, long, default_value = "config.yml")]
    pub config: String,

    /// Override the output directory from the config file
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["feedforge"]);
        assert_eq!(cli.config, "config.yml");
        assert!(cli.output_dir.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "feedforge",
            "--config",
            "/etc/feedforge/sites.yml",
            "--output-dir",
            "./public",
        ]);
        assert_eq!(cli.config, "/etc/feedforge/sites.yml");
        assert_eq!(cli.output_dir.as_deref(), Some("./public"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["feedforge", "-c", "sites.yml", "-o", "/tmp/feeds"]);
        assert_eq!(cli.config, "sites.yml");
        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/feeds"));
    }
}
