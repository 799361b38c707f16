//! Shared value types for describing an endpoint and classifying its responses.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! protocol meaning: [`HttpMethod`] is the closed set of verbs this layer can
//! issue, [`Endpoint`] pairs one of them with a path template, and
//! [`StatusOutcome`] is the discriminant that chooses a decode target.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// HTTP method
// ---------------------------------------------------------------------------

/// HTTP verbs supported by the contract layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Retrieve a resource.
    Get,
    /// Create a resource or trigger an action.
    Post,
    /// Replace a resource.
    Put,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Returns the uppercase wire token (`"GET"`, `"POST"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a verb outside [`HttpMethod`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported HTTP method '{0}'")]
pub struct UnsupportedMethod(pub String);

impl std::str::FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(UnsupportedMethod(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint descriptor
// ---------------------------------------------------------------------------

/// A method plus a path template identifying one logical HTTP operation.
///
/// Placeholders are written as `{name}` and are filled from the request
/// value's path parameters by [`crate::resolve`].
///
/// ```rust
/// use contract::{Endpoint, HttpMethod};
///
/// const FIND_USER: Endpoint = Endpoint::get("/users/{id}");
/// assert_eq!(FIND_USER.method(), HttpMethod::Get);
/// assert_eq!(FIND_USER.path(), "/users/{id}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    method: HttpMethod,
    path: &'static str,
}

impl Endpoint {
    /// Creates an endpoint from a method and a path template.
    pub const fn new(method: HttpMethod, path: &'static str) -> Self {
        Self { method, path }
    }

    /// `GET` endpoint.
    pub const fn get(path: &'static str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// `POST` endpoint.
    pub const fn post(path: &'static str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// `PUT` endpoint.
    pub const fn put(path: &'static str) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// `DELETE` endpoint.
    pub const fn delete(path: &'static str) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// The HTTP method.
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// The unresolved path template.
    pub const fn path(&self) -> &'static str {
        self.path
    }
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

/// Which response shape an HTTP status code selects.
///
/// Computed from the status line before any JSON is parsed; see
/// [`crate::ResponseFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusOutcome {
    /// Status in `200..=299`.
    Success,
    /// Any other status.
    Failure,
}

impl StatusOutcome {
    /// Classifies a raw HTTP status code.
    pub fn from_status(status: u16) -> Self {
        if (200..=299).contains(&status) {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// Returns `true` for [`StatusOutcome::Success`].
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}
