//! Command-line interface parsing for deskdash
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated `StartupConfig`.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::app::{DashboardSettings, DEFAULT_ORGANIZATION, DEFAULT_STATUS_FILTER, DEFAULT_UPDATES_SECTION};
use crate::data::{ContentError, StaticContent};
use crate::refresh::{RefreshConfig, REFRESH_INTERVAL};

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The help-desk origin is not an http(s) URL
    #[error("Invalid URL: '{0}'. Expected an origin such as https://support.example.com")]
    InvalidUrl(String),

    /// Refresh interval of zero seconds
    #[error("Invalid interval: refresh interval must be at least 1 second")]
    InvalidInterval,

    /// Static content file could not be loaded
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// deskdash - help-desk dashboard for tickets, articles and community activity
#[derive(Parser, Debug)]
#[command(name = "deskdash")]
#[command(about = "Help-desk dashboard: tickets, articles, community posts and status")]
#[command(version)]
pub struct Cli {
    /// Help-desk origin, e.g. https://support.example.com
    #[arg(long, value_name = "ORIGIN")]
    pub url: String,

    /// Seconds between refreshes of tickets and system status
    #[arg(long, value_name = "SECS", default_value_t = REFRESH_INTERVAL.as_secs())]
    pub interval: u64,

    /// Load every panel once and exit
    #[arg(long)]
    pub once: bool,

    /// Comma-separated ticket statuses to list
    #[arg(long, value_name = "LIST", default_value = DEFAULT_STATUS_FILTER)]
    pub status: String,

    /// Organization id for the county tickets panel
    #[arg(long, value_name = "ID", default_value = DEFAULT_ORGANIZATION)]
    pub org: String,

    /// Help-center section id for the updates feed
    #[arg(long, value_name = "ID", default_value = DEFAULT_UPDATES_SECTION)]
    pub updates_section: String,

    /// Show article suggestions for a search query
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// JSON file with agenda, due-this-week and system status content
    #[arg(long, value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Only log errors
    #[arg(long, short)]
    pub quiet: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Help-desk origin without trailing slash
    pub origin: String,
    pub settings: DashboardSettings,
    pub refresh: RefreshConfig,
}

/// Checks that `url` looks like an http(s) origin
///
/// # Returns
/// * `Ok(String)` with any trailing slash removed
/// * `Err(CliError::InvalidUrl)` otherwise
pub fn parse_origin(url: &str) -> Result<String, CliError> {
    let trimmed = url.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
            Ok(trimmed.to_string())
        }
        _ => Err(CliError::InvalidUrl(url.to_string())),
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` for a bad URL, a zero interval or unreadable content
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let origin = parse_origin(&cli.url)?;

        if cli.interval == 0 {
            return Err(CliError::InvalidInterval);
        }

        let content = match &cli.content {
            Some(path) => StaticContent::from_file(path)?,
            None => StaticContent::default(),
        };

        Ok(StartupConfig {
            origin,
            settings: DashboardSettings {
                status_filter: cli.status.clone(),
                organization_id: cli.org.clone(),
                updates_section: cli.updates_section.clone(),
                search_query: cli.search.clone(),
                content,
            },
            refresh: RefreshConfig {
                interval: Duration::from_secs(cli.interval),
                enabled: !cli.once,
            },
        })
    }
}
