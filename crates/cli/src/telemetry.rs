//! Observability wiring.
//!
//! Every crate in the workspace emits `tracing` spans and events; this module
//! installs the subscriber they flow into:
//!
//! - an [`EnvFilter`] (`RUST_LOG`, default `info`);
//! - a `fmt` layer on stderr, human-readable or JSON;
//! - when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an OTLP span exporter bridged
//!   through `tracing-opentelemetry`.

use anyhow::Context;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::{runtime, Resource};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LogFormat;

const SERVICE_NAME: &str = "gigscout";
const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Keeps the OTLP pipeline alive until [`Telemetry::shutdown`].
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Flushes pending spans. Logs, rather than fails, if the exporter errors.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "failed to flush OpenTelemetry spans");
            }
        }
    }
}

/// Installs the global subscriber. Must be called from within the Tokio
/// runtime when OTLP export is enabled.
pub fn init(format: LogFormat) -> anyhow::Result<Telemetry> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match format {
        LogFormat::Pretty => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    let provider = match std::env::var_os(OTLP_ENDPOINT_ENV) {
        Some(_) => Some(otlp_provider()?),
        None => None,
    };
    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(SERVICE_NAME)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(Telemetry { provider })
}

fn otlp_provider() -> anyhow::Result<TracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("failed to build OTLP span exporter")?;

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]))
        .build())
}
