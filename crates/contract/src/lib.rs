//! Contract-description layer for GigScout.
//!
//! This crate lets a request value describe an HTTP endpoint declaratively and
//! turns it into a wire request plus a typed response. Infrastructure crates
//! implement [`Transport`]; domain clients declare request values and call
//! [`dispatch`].
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no network dependencies.
//! It defines *what* a request looks like; `http-transport` defines *how* it
//! reaches the network.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`Host`, `AppId`, `RequestId`, etc.) |
//! | [`types`] | `HttpMethod`, `Endpoint`, `StatusOutcome` |
//! | [`params`] | `Path`, `Query`, `Header`, `Body` descriptors and the `Parameters` builder |
//! | [`dispatch`] | `ApiRequest`, `resolve`, `dispatch` |
//! | [`response`] | `Either`, response formats, status-driven `decode` |
//! | [`transport`] | `Transport` port and `TransportConfig` |
//! | [`errors`] | `ApiError` |

pub mod dispatch;
pub mod errors;
pub mod identifiers;
pub mod params;
pub mod response;
pub mod transport;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use dispatch::{dispatch, resolve, resolve_parts, ApiRequest, ResolvedRequest, ResponseOf};
pub use errors::{ApiError, BoxError};
pub use identifiers::{AppId, ArtistName, Host, RequestId, Scheme};
pub use params::{
    Body, BodySlot, Header, NoBody, Parameters, Path, Query, RequestParameters, WithBody,
};
pub use response::{decode, Either, EitherJson, Json, RawResponse, ResponseFormat};
pub use transport::{
    Transport, TransportConfig, TransportConfigBuilder, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_RESOURCE_TIMEOUT,
};
pub use types::{Endpoint, HttpMethod, StatusOutcome, UnsupportedMethod};
