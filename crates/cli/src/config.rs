//! Command-line and environment configuration.

use std::time::Duration;

use anyhow::Context;
use bandsintown::{BandsInTownClient, EventDate};
use clap::{Parser, ValueEnum};
use contract::{ApiError, AppId, ArtistName, TransportConfig};

/// Look up an artist and their events on Bandsintown.
#[derive(Debug, Parser)]
#[command(name = "gigscout", version)]
pub struct Cli {
    /// Artist to look up.
    #[arg(default_value = "Molchat Doma")]
    pub artist: String,

    /// Application id sent with every request.
    #[arg(long, env = "BANDSINTOWN_APP_ID")]
    pub app_id: String,

    /// Which events to list: upcoming, past, all, or YYYY-MM-DD,YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<EventDate>,

    /// Upstream host, optionally with `:port`.
    #[arg(long, env = "BANDSINTOWN_HOST", default_value = bandsintown::HOST)]
    pub host: String,

    /// Upstream URL scheme.
    #[arg(long, env = "BANDSINTOWN_SCHEME", default_value = bandsintown::SCHEME)]
    pub scheme: String,

    /// Idle timeout while waiting for response data, in seconds.
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Limit for the whole exchange, in seconds.
    #[arg(long, default_value_t = 300)]
    pub resource_timeout_secs: u64,

    /// Log line format (written to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Result format (written to stdout).
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Result format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Artist name, URL, and event lineups.
    Text,
    /// The decoded artist and events as JSON.
    Json,
}

impl Cli {
    /// Transport configuration for the selected upstream.
    pub fn transport_config(&self) -> Result<TransportConfig, ApiError> {
        BandsInTownClient::config_builder()
            .scheme(&self.scheme)
            .host(&self.host)
            .request_timeout(Duration::from_secs(self.request_timeout_secs))
            .resource_timeout(Duration::from_secs(self.resource_timeout_secs))
            .build()
    }

    /// The application id, rejecting a blank value.
    pub fn app_id(&self) -> anyhow::Result<AppId> {
        AppId::new(self.app_id.trim()).context("app id must not be empty")
    }

    /// The artist to look up, rejecting a blank value.
    pub fn artist_name(&self) -> anyhow::Result<ArtistName> {
        ArtistName::new(self.artist.trim()).context("artist name must not be empty")
    }
}
