//! GigScout CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: command-line arguments with environment
//!    fallbacks (`BANDSINTOWN_APP_ID`, `BANDSINTOWN_HOST`, `BANDSINTOWN_SCHEME`).
//! 2. **Wire observability**: configure `tracing-subscriber` and, when an OTLP
//!    endpoint is configured, the OpenTelemetry exporter. All `tracing` spans
//!    and structured events emitted by every crate flow through this layer.
//! 3. **Construct infrastructure**: build the `TransportConfig`, the
//!    `ReqwestTransport` behind `BandsInTownClient`, and run the lookup.
//! 4. **Report the outcome**: details on stdout and exit code 0; an upstream
//!    error payload on stderr and exit code 2; a call that failed to complete on
//!    stderr and exit code 1.

mod config;
mod render;
mod telemetry;

use std::process::ExitCode;

use anyhow::Context;
use bandsintown::BandsInTownClient;
use clap::Parser;
use contract::Either;
use tracing::{error, info, warn};

use crate::config::Cli;

/// Exit code for a lookup the upstream answered with an error payload.
const EXIT_UPSTREAM_ERROR: u8 = 2;

/// How a lookup that ran to completion ended.
enum Outcome {
    /// Rendered artist details and events.
    Details(String),
    /// The upstream's error message.
    UpstreamError(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match telemetry::init(cli.log_format) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let code = match run(&cli).await {
        Ok(Outcome::Details(details)) => {
            println!("{details}");
            ExitCode::SUCCESS
        }
        Ok(Outcome::UpstreamError(message)) => {
            warn!(%message, "upstream returned an error payload");
            eprintln!("Bandsintown returned an error: {message}");
            ExitCode::from(EXIT_UPSTREAM_ERROR)
        }
        Err(e) => {
            error!(error = ?e, "lookup failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}

async fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let config = cli
        .transport_config()
        .context("invalid upstream configuration")?;
    let client = BandsInTownClient::with_config(cli.app_id()?, config)
        .context("failed to build Bandsintown client")?;
    let artist_name = cli.artist_name()?;

    info!(artist = %artist_name, "looking up artist");
    let artist = match client
        .find_artist_by_name(artist_name.clone())
        .await
        .context("artist lookup did not complete")?
    {
        Either::Response(artist) => artist,
        Either::ErrorResponse(e) => return Ok(Outcome::UpstreamError(e.error_message)),
    };

    info!(artist = %artist_name, date = ?cli.date, "listing events");
    let events = match client
        .events_for(artist_name, cli.date)
        .await
        .context("event listing did not complete")?
    {
        Either::Response(events) => events,
        Either::ErrorResponse(e) => return Ok(Outcome::UpstreamError(e.error_message)),
    };

    info!(events = events.len(), "lookup complete");
    let details = render::render(cli.output, &artist, &events).context("failed to render result")?;
    Ok(Outcome::Details(details))
}
