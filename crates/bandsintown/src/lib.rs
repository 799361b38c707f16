//! GigScout Bandsintown domain client.
//!
//! [`BandsInTownClient`] binds one [`contract::Transport`] to
//! `https://rest.bandsintown.com` with a JSON `Content-Type` shared header and
//! exposes one typed method per endpoint. Each method builds its request value,
//! hands it to [`contract::dispatch`], and returns the result unchanged.
//!
//! ## Architectural Layer
//!
//! **Domain client facade.** No protocol logic lives here: request values
//! declare their shape with [`contract`] descriptors, and the transport is
//! whatever was injected (by default [`http_transport::ReqwestTransport`]).
//!
//! ## Results
//!
//! Both endpoints return [`contract::Either`]: a `2xx` answer decodes to the
//! success shape, anything else to [`ErrorResponse`]. An [`ErrorResponse`] is a
//! completed call with an application-level error; an `Err(ApiError)` is a call
//! that failed to complete.

pub mod dates;
pub mod models;
pub mod requests;

use std::sync::Arc;

use chrono::NaiveDate;
use contract::{
    dispatch, ApiError, AppId, ArtistName, Either, Transport, TransportConfig,
    TransportConfigBuilder,
};
use http_transport::ReqwestTransport;
use thiserror::Error;
use tracing::instrument;

pub use dates::{DateRange, EventDate};
pub use models::{Artist, ErrorResponse, Event, Offer, Venue};
pub use requests::{ArtistEvents, FindArtist};

/// Scheme of the production upstream.
pub const SCHEME: &str = "https";

/// Host of the production upstream.
pub const HOST: &str = "rest.bandsintown.com";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building Bandsintown request inputs.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A date range ends before it starts.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// First day supplied.
        from: NaiveDate,
        /// Last day supplied.
        to: NaiveDate,
    },

    /// Text could not be parsed as an [`EventDate`].
    #[error("Invalid event date '{input}': expected upcoming, past, all, or YYYY-MM-DD,YYYY-MM-DD")]
    InvalidEventDate {
        /// The rejected input.
        input: String,
    },
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Typed client for the Bandsintown REST API.
#[derive(Clone)]
pub struct BandsInTownClient {
    transport: Arc<dyn Transport>,
    app_id: AppId,
}

impl std::fmt::Debug for BandsInTownClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BandsInTownClient")
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

impl BandsInTownClient {
    /// Configuration for the production upstream, ready for further overrides
    /// (timeouts, host for staging or tests).
    pub fn config_builder() -> TransportConfigBuilder {
        TransportConfig::builder()
            .scheme(SCHEME)
            .host(HOST)
            .shared_header("Content-Type", "application/json")
    }

    /// Creates a client for the production upstream.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(app_id: AppId) -> Result<Self, ApiError> {
        Self::with_config(app_id, Self::config_builder().build()?)
    }

    /// Creates a client bound to an explicit upstream configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn with_config(app_id: AppId, config: TransportConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(app_id, Arc::new(transport)))
    }

    /// Creates a client over an arbitrary transport.
    pub fn with_transport(app_id: AppId, transport: Arc<dyn Transport>) -> Self {
        Self { transport, app_id }
    }

    /// The app id sent by the convenience methods.
    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// Looks up an artist by name.
    #[instrument(skip_all, fields(artist = %request.artist_name.value()))]
    pub async fn find_artist(
        &self,
        request: &FindArtist,
    ) -> Result<Either<Artist, ErrorResponse>, ApiError> {
        dispatch(self.transport.as_ref(), request).await
    }

    /// Lists an artist's events.
    #[instrument(skip_all, fields(artist = %request.artist_name.value()))]
    pub async fn artist_events(
        &self,
        request: &ArtistEvents,
    ) -> Result<Either<Vec<Event>, ErrorResponse>, ApiError> {
        dispatch(self.transport.as_ref(), request).await
    }

    /// [`Self::find_artist`] using this client's app id.
    pub async fn find_artist_by_name(
        &self,
        artist_name: ArtistName,
    ) -> Result<Either<Artist, ErrorResponse>, ApiError> {
        self.find_artist(&FindArtist::new(artist_name, self.app_id.clone()))
            .await
    }

    /// [`Self::artist_events`] using this client's app id.
    pub async fn events_for(
        &self,
        artist_name: ArtistName,
        date: Option<EventDate>,
    ) -> Result<Either<Vec<Event>, ErrorResponse>, ApiError> {
        self.artist_events(&ArtistEvents::new(artist_name, self.app_id.clone(), date))
            .await
    }
}
