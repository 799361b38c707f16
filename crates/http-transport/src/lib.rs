//! GigScout HTTP infrastructure adapter.
//!
//! Implements the [`contract::Transport`] trait over `reqwest`. One
//! [`ReqwestTransport`] is bound to one upstream through an immutable
//! [`contract::TransportConfig`]; every call builds its own URL, header map, and
//! body, so the transport can be shared across tasks without locking.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL assembly, header merging, timeouts, and the network
//! round-trip live here. The [`contract`] crate sees only
//! [`contract::Transport`], and decoding stays in [`contract::decode`].
//!
//! ## Timeouts
//!
//! | Setting | Default | Meaning |
//! |---------|---------|---------|
//! | `request_timeout` | 30 s | Idle time allowed between reads |
//! | `resource_timeout` | 300 s | Whole exchange, connect to last byte |
//!
//! A timeout surfaces as [`contract::ApiError::Transport`]. Nothing is retried.

pub mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use contract::{ApiError, RawResponse, ResolvedRequest, Transport, TransportConfig};
use tracing::{debug, instrument, warn, Span};

pub use wire::{build_url, merge_headers, to_reqwest};

/// Upper bound on idle pooled connections kept for the upstream.
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: Arc<TransportConfig>,
}

impl ReqwestTransport {
    /// Creates a transport for the upstream described by `config`.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be constructed
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: TransportConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .read_timeout(config.request_timeout())
            .timeout(config.resource_timeout())
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()
            .map_err(ApiError::transport)?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(
        name = "http_request",
        skip_all,
        fields(
            http.method = %request.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    async fn execute(&self, request: &ResolvedRequest) -> Result<RawResponse, ApiError> {
        let url = build_url(&self.config, &request.path, &request.query)?;
        // The query carries credentials such as `app_id`; keep it out of traces.
        Span::current().record("http.url", &url[..url::Position::AfterPath]);

        let headers = merge_headers(self.config.shared_headers(), &request.headers)?;
        let mut builder = self
            .client
            .request(to_reqwest(request.method), url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            let e = e.without_url();
            warn!(error = %e, timeout = e.is_timeout(), connect = e.is_connect(), "request failed");
            ApiError::transport(e)
        })?;

        let status = response.status().as_u16();
        Span::current().record("http.status_code", status);

        let body = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            warn!(error = %e, "failed to read response body");
            ApiError::transport(e)
        })?;
        debug!(bytes = body.len(), "response body read");

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
