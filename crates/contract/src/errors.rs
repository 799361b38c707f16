//! Error taxonomy for the contract layer.
//!
//! [`ApiError`] covers every hard failure a caller of
//! [`crate::dispatch`] or [`crate::Transport::execute`] can observe: misuse of
//! the configuration, path templates that do not match their request value,
//! URL assembly, the network round-trip itself, and response decoding.
//!
//! A well-formed error payload from the upstream is **not** an [`ApiError`]. It
//! is delivered as [`crate::Either::ErrorResponse`] when the request's response
//! format is [`crate::EitherJson`].

use thiserror::Error;

/// Boxed underlying cause of a [`ApiError::Transport`] failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Contract errors
// ---------------------------------------------------------------------------

/// Errors produced while resolving, sending, or decoding a request.
///
/// None of these are retried internally; each one surfaces to the caller of
/// the domain client method that triggered it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport configuration is missing a required value.
    ///
    /// Produced by: [`crate::TransportConfigBuilder::build`]. Configuration is
    /// injected at construction, so no request can reach the network without it.
    #[error("Transport not configured: {message}")]
    NotConfigured {
        /// Which part of the configuration is missing or empty.
        message: String,
    },

    /// A path template placeholder has no matching path parameter.
    #[error("Unresolved path parameter '{placeholder}' in template '{template}'")]
    UnresolvedPathParameter {
        /// Placeholder name as written between the braces.
        placeholder: String,
        /// The endpoint's path template.
        template: String,
    },

    /// A path parameter was supplied that no placeholder consumes.
    #[error("Path parameter '{name}' is not used by template '{template}'")]
    UnusedPathParameter {
        /// Wire name of the unconsumed parameter.
        name: String,
        /// The endpoint's path template.
        template: String,
    },

    /// A path parameter's value rendered as an empty string.
    ///
    /// Substituting it would collapse the segment (`/items//sub`).
    #[error("Path parameter '{placeholder}' is empty in template '{template}'")]
    EmptyPathParameter {
        /// Placeholder the empty value was bound to.
        placeholder: String,
        /// The endpoint's path template.
        template: String,
    },

    /// Two query parameters or two headers share one wire name.
    #[error("Duplicate {role} parameter '{name}'")]
    DuplicateParameter {
        /// The shared wire name. Header names compare case-insensitively.
        name: String,
        /// `"query"` or `"header"`.
        role: &'static str,
    },

    /// The path template has an unterminated or empty `{}` placeholder.
    #[error("Malformed path template '{template}'")]
    InvalidPathTemplate {
        /// The offending template.
        template: String,
    },

    /// The request body could not be serialised to JSON.
    #[error("Failed to encode request body")]
    BodyEncoding {
        /// Serialiser error.
        #[source]
        source: serde_json::Error,
    },

    /// The URL could not be formed from scheme, host, path, and query.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// Best-effort rendering of the URL that was being assembled.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// A shared or per-call header has an invalid name or value.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as supplied.
        name: String,
        /// Why the header was rejected.
        reason: String,
    },

    /// The network round-trip failed (connection refused, DNS, timeout, ...).
    #[error("Transport failure: {source}")]
    Transport {
        /// The underlying client error.
        #[source]
        source: BoxError,
    },

    /// The upstream answered without any body bytes.
    #[error("Empty response body (HTTP {status})")]
    EmptyBody {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The response body could not be decoded into the selected shape.
    #[error("Failed to decode response body (HTTP {status})")]
    Decoding {
        /// HTTP status code that selected the decode target.
        status: u16,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Wraps any client-level error as [`ApiError::Transport`].
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    /// Returns `true` if the call never produced an HTTP response.
    ///
    /// Callers use this to tell "the upstream could not be reached" apart from
    /// "the upstream answered with something unusable".
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = ApiError::UnresolvedPathParameter {
            placeholder: "id".to_string(),
            template: "/users/{id}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unresolved path parameter 'id' in template '/users/{id}'"
        );
    }

    #[test]
    fn test_duplicate_parameter_display() {
        let err = ApiError::DuplicateParameter {
            name: "app_id".to_string(),
            role: "query",
        };
        assert_eq!(err.to_string(), "Duplicate query parameter 'app_id'");
    }

    #[test]
    fn test_decoding_keeps_source() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ApiError::Decoding {
            status: 200,
            source: parse_err,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_helper() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ApiError::transport(io);
        assert!(err.is_transport());
        assert!(err.to_string().contains("refused"));
    }
}
