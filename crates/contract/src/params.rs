//! Parameter descriptors and the builder that registers them.
//!
//! A request value is a plain struct whose fields are typed as [`Path`],
//! [`Query`], [`Header`] or [`Body`]. The type of the field says where its
//! value travels; the request's [`crate::ApiRequest::parameters`] registers each
//! field under its field name with a [`Parameters`] builder.
//!
//! ```rust
//! use contract::{Body, Parameters, Path, Query};
//!
//! struct RenameUser {
//!     id: Path<u64>,
//!     dry_run: Query<bool>,
//!     payload: Body<serde_json::Value>,
//! }
//!
//! let request = RenameUser {
//!     id: Path::new(7),
//!     dry_run: Query::named(true, "dryRun"),
//!     payload: Body::new(serde_json::json!({ "name": "Ada" })),
//! };
//!
//! let params = Parameters::new()
//!     .path("id", &request.id)
//!     .query("dry_run", &request.dry_run)
//!     .body(&request.payload)
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(params.query().get("dryRun").map(String::as_str), Some("true"));
//! ```
//!
//! The body slot can be filled once: [`Parameters::body`] is only available on
//! a builder that has no body yet, so a second body does not compile.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

use crate::ApiError;

// ---------------------------------------------------------------------------
// Macro for named, Display-convertible descriptors.
// Generates: struct, new(), named(), value(), custom_name(), wire_name(), From<T>.
// ---------------------------------------------------------------------------
macro_rules! named_param {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name<T> {
            value: T,
            custom_name: Option<&'static str>,
        }

        impl<T> $name<T> {
            /// Wraps a value whose wire name is the registering field's name.
            pub fn new(value: T) -> Self {
                Self { value, custom_name: None }
            }

            /// Wraps a value with an explicit wire name.
            pub fn named(value: T, name: &'static str) -> Self {
                Self { value, custom_name: Some(name) }
            }

            /// The wrapped value.
            pub fn value(&self) -> &T {
                &self.value
            }

            /// The explicit wire name, if one was given.
            pub fn custom_name(&self) -> Option<&'static str> {
                self.custom_name
            }

            /// The custom name if present, otherwise `field`.
            pub fn wire_name(&self, field: &'static str) -> &'static str {
                self.custom_name.unwrap_or(field)
            }
        }

        impl<T> From<T> for $name<T> {
            fn from(value: T) -> Self {
                Self::new(value)
            }
        }
    };
}

named_param! {
    /// A field substituted into a `{placeholder}` of the endpoint's path.
    Path
}

named_param! {
    /// A field serialised into the URL query string.
    Query
}

named_param! {
    /// A field sent as a per-call request header.
    ///
    /// Per-call headers override the transport's shared headers of the same
    /// name.
    Header
}

/// The field that supplies the whole JSON request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body<T>(T);

impl<T> Body<T> {
    /// Wraps the body value.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.0
    }
}

impl<T: Serialize> Body<T> {
    /// Serialises the body to JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(&self.0).map_err(|source| ApiError::BodyEncoding { source })
    }
}

// ---------------------------------------------------------------------------
// Body slot typestate
// ---------------------------------------------------------------------------

/// Builder state: no body registered yet.
#[derive(Debug, Clone, Default)]
pub struct NoBody;

/// Builder state: a body has been registered and encoded.
#[derive(Debug, Clone)]
pub struct WithBody(Vec<u8>);

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::NoBody {}
    impl Sealed for super::WithBody {}
}

/// The two states of the [`Parameters`] body slot.
pub trait BodySlot: sealed::Sealed {
    /// Encoded payload, if any.
    fn into_payload(self) -> Option<Vec<u8>>;
}

impl BodySlot for NoBody {
    fn into_payload(self) -> Option<Vec<u8>> {
        None
    }
}

impl BodySlot for WithBody {
    fn into_payload(self) -> Option<Vec<u8>> {
        Some(self.0)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects a request value's fields by role.
#[derive(Debug, Clone)]
pub struct Parameters<B = NoBody> {
    path: Vec<(String, String)>,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    duplicates: Vec<(&'static str, String)>,
    body: B,
}

impl Default for Parameters<NoBody> {
    fn default() -> Self {
        Self::new()
    }
}

impl Parameters<NoBody> {
    /// Starts an empty builder.
    pub fn new() -> Self {
        Self {
            path: Vec::new(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            duplicates: Vec::new(),
            body: NoBody,
        }
    }

    /// Registers the request body, encoding it to JSON immediately.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::BodyEncoding`] if the value cannot be serialised.
    pub fn body<T: Serialize>(self, body: &Body<T>) -> Result<Parameters<WithBody>, ApiError> {
        let payload = body.encode()?;
        Ok(Parameters {
            path: self.path,
            query: self.query,
            headers: self.headers,
            duplicates: self.duplicates,
            body: WithBody(payload),
        })
    }
}

impl<B: BodySlot> Parameters<B> {
    /// Registers a path parameter under `field` (or its custom name).
    pub fn path<T: Display>(mut self, field: &'static str, param: &Path<T>) -> Self {
        self.path
            .push((param.wire_name(field).to_string(), param.value().to_string()));
        self
    }

    /// Registers a query parameter under `field` (or its custom name).
    pub fn query<T: Display>(mut self, field: &'static str, param: &Query<T>) -> Self {
        self.insert_query(param.wire_name(field), param.value().to_string());
        self
    }

    /// Registers an optional query parameter; `None` adds nothing.
    pub fn query_opt<T: Display>(mut self, field: &'static str, param: &Query<Option<T>>) -> Self {
        if let Some(value) = param.value() {
            self.insert_query(param.wire_name(field), value.to_string());
        }
        self
    }

    /// Registers a per-call header under `field` (or its custom name).
    pub fn header<T: Display>(mut self, field: &'static str, param: &Header<T>) -> Self {
        let name = param.wire_name(field);
        if self.headers.keys().any(|k| k.eq_ignore_ascii_case(name)) {
            self.duplicates.push(("header", name.to_string()));
        } else {
            self.headers.insert(name.to_string(), param.value().to_string());
        }
        self
    }

    fn insert_query(&mut self, name: &str, value: String) {
        if self.query.contains_key(name) {
            self.duplicates.push(("query", name.to_string()));
        } else {
            self.query.insert(name.to_string(), value);
        }
    }

    /// Finishes registration.
    pub fn build(self) -> RequestParameters {
        RequestParameters {
            path: self.path,
            query: self.query,
            headers: self.headers,
            duplicates: self.duplicates,
            body: self.body.into_payload(),
        }
    }
}

/// A request value's fields, grouped by role and converted to wire strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    path: Vec<(String, String)>,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    // Wire names registered more than once, as `(role, name)`.
    duplicates: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
}

impl RequestParameters {
    /// Path parameters in registration order, as `(wire name, value)`.
    pub fn path(&self) -> &[(String, String)] {
        &self.path
    }

    /// Query parameters by wire name.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Per-call headers by name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Encoded JSON body, if one was registered.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Fails on the first wire name registered twice.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::DuplicateParameter`].
    pub(crate) fn check_unique(&self) -> Result<(), ApiError> {
        match self.duplicates.first() {
            Some((role, name)) => Err(ApiError::DuplicateParameter {
                name: name.clone(),
                role: *role,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<(String, String)>,
        BTreeMap<String, String>,
        BTreeMap<String, String>,
        Option<Vec<u8>>,
    ) {
        (self.path, self.query, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name_defaults_to_field() {
        let p = Path::new("x");
        assert_eq!(p.wire_name("artist_name"), "artist_name");
        let q = Query::named(3, "appId");
        assert_eq!(q.wire_name("app_id"), "appId");
        assert_eq!(q.custom_name(), Some("appId"));
    }

    #[test]
    fn test_query_order_not_significant() {
        let a = Query::new("1");
        let b = Query::new("2");
        let first = Parameters::new().query("a", &a).query("b", &b).build();
        let second = Parameters::new().query("b", &b).query("a", &a).build();
        assert_eq!(first, second);
        assert_eq!(first.query().get("a").map(String::as_str), Some("1"));
        assert_eq!(first.query().get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_query_opt_skips_none() {
        let present = Query::new(Some("upcoming"));
        let absent: Query<Option<&str>> = Query::new(None);
        let params = Parameters::new()
            .query_opt("date", &present)
            .query_opt("limit", &absent)
            .build();
        assert_eq!(params.query().len(), 1);
        assert_eq!(params.query().get("date").map(String::as_str), Some("upcoming"));
    }

    #[test]
    fn test_body_round_trips_as_json() {
        let body = Body::new(serde_json::json!({ "x": 1 }));
        let params = Parameters::new().body(&body).unwrap().build();
        let decoded: serde_json::Value = serde_json::from_slice(params.body().unwrap()).unwrap();
        assert_eq!(decoded, serde_json::json!({ "x": 1 }));
    }

    #[test]
    fn test_no_body_means_no_payload() {
        let params = Parameters::new().path("id", &Path::new(1)).build();
        assert!(params.body().is_none());
        assert_eq!(params.path(), &[("id".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_header_registration() {
        let h = Header::named("abc", "X-Trace");
        let params = Parameters::new().header("trace", &h).build();
        assert_eq!(params.headers().get("X-Trace").map(String::as_str), Some("abc"));
    }
}
