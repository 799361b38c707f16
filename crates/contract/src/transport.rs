//! The Transport port and its configuration.
//!
//! [`Transport`] is implemented by infrastructure crates (the reqwest adapter
//! in `http-transport`, test doubles in tests). It performs exactly one network
//! round-trip per call and returns the undecoded [`RawResponse`]; decoding is
//! done by [`crate::decode`] so every transport gets the same status-driven
//! semantics.
//!
//! [`TransportConfig`] is built once and handed to the transport's
//! constructor. There is no way to reconfigure a transport after it is built,
//! so concurrent calls share it without locking.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::{ApiError, Host, RawResponse, ResolvedRequest, Scheme};

/// Default idle timeout while waiting for response data.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default limit for the whole exchange, from connect to last body byte.
pub const DEFAULT_RESOURCE_TIMEOUT: Duration = Duration::from_secs(300);

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Performs one HTTP round-trip for an already-resolved request.
///
/// Implementations must be safe to call concurrently: all per-call state
/// (URL, headers, body) is derived from `request` and stays local to the call.
/// Dropping the returned future abandons the call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the status and full body.
    ///
    /// ## Errors
    ///
    /// - [`ApiError::InvalidUrl`] if the URL cannot be formed.
    /// - [`ApiError::InvalidHeader`] if a header name or value is rejected.
    /// - [`ApiError::Transport`] for network-level failures.
    async fn execute(&self, request: &ResolvedRequest) -> Result<RawResponse, ApiError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Scheme, host, shared headers, and timeouts for one upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    scheme: Scheme,
    host: Host,
    shared_headers: BTreeMap<String, String>,
    request_timeout: Duration,
    resource_timeout: Duration,
}

impl TransportConfig {
    /// Starts a builder with default timeouts and no shared headers.
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }

    /// URL scheme.
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Host, optionally with `:port`.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Headers sent with every request unless overridden per call.
    pub fn shared_headers(&self) -> &BTreeMap<String, String> {
        &self.shared_headers
    }

    /// Idle timeout while waiting for response data.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Total timeout for the exchange.
    pub fn resource_timeout(&self) -> Duration {
        self.resource_timeout
    }
}

/// Builder for [`TransportConfig`].
#[derive(Debug, Clone)]
pub struct TransportConfigBuilder {
    scheme: Option<String>,
    host: Option<String>,
    shared_headers: BTreeMap<String, String>,
    request_timeout: Duration,
    resource_timeout: Duration,
}

impl Default for TransportConfigBuilder {
    fn default() -> Self {
        Self {
            scheme: None,
            host: None,
            shared_headers: BTreeMap::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            resource_timeout: DEFAULT_RESOURCE_TIMEOUT,
        }
    }
}

impl TransportConfigBuilder {
    /// Sets the URL scheme (e.g. `"https"`).
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the host, optionally with `:port`.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Adds a header sent with every request. A later call with the same name
    /// replaces the earlier value.
    pub fn shared_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.shared_headers.insert(name.into(), value.into());
        self
    }

    /// Overrides the idle timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Overrides the total timeout.
    pub fn resource_timeout(mut self, timeout: Duration) -> Self {
        self.resource_timeout = timeout;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::NotConfigured`] if the scheme or host is missing or
    /// empty, or if either timeout is zero.
    pub fn build(self) -> Result<TransportConfig, ApiError> {
        let scheme = self
            .scheme
            .and_then(Scheme::new)
            .ok_or_else(|| not_configured("scheme is required"))?;
        let host = self
            .host
            .and_then(Host::new)
            .ok_or_else(|| not_configured("host is required"))?;

        if self.request_timeout.is_zero() || self.resource_timeout.is_zero() {
            return Err(not_configured("timeouts must be non-zero"));
        }

        Ok(TransportConfig {
            scheme,
            host,
            shared_headers: self.shared_headers,
            request_timeout: self.request_timeout,
            resource_timeout: self.resource_timeout,
        })
    }
}

fn not_configured(message: &str) -> ApiError {
    ApiError::NotConfigured {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        let config = TransportConfig::builder()
            .scheme("https")
            .host("rest.bandsintown.com")
            .shared_header("Content-Type", "application/json")
            .build()
            .unwrap();

        assert_eq!(config.scheme().as_str(), "https");
        assert_eq!(config.host().as_str(), "rest.bandsintown.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.resource_timeout(), Duration::from_secs(300));
        assert_eq!(
            config.shared_headers().get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_missing_host_is_not_configured() {
        let err = TransportConfig::builder().scheme("https").build().unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured { .. }));
    }

    #[test]
    fn test_empty_scheme_is_not_configured() {
        let err = TransportConfig::builder()
            .scheme("")
            .host("example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured { ref message } if message.contains("scheme")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = TransportConfig::builder()
            .scheme("https")
            .host("example.com")
            .request_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured { .. }));
    }
}
