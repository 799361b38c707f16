//! Response shapes returned by the Bandsintown REST API.
//!
//! Only `name`/`url` on [`Artist`] and `id`/`datetime` on [`Event`] are
//! required; everything else is optional because the upstream omits fields
//! freely.

use serde::{Deserialize, Serialize};

/// Artist details from `GET /artists/{artist_name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// Display name.
    pub name: String,
    /// Bandsintown artist page.
    pub url: String,
    /// Upstream artist identifier.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub facebook_page_url: Option<String>,
    /// Number of users tracking the artist.
    #[serde(default)]
    pub tracker_count: Option<u64>,
    #[serde(default)]
    pub upcoming_event_count: Option<u64>,
}

/// One event from `GET /artists/{artist_name}/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Local start time as sent by the upstream (`YYYY-MM-DDTHH:MM:SS`).
    pub datetime: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub venue: Option<Venue>,
    /// Performing artists, headliner first.
    #[serde(default)]
    pub lineup: Vec<String>,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

/// Where an [`Event`] takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    // Coordinates arrive as strings.
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

/// A ticket offer attached to an [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Offer kind, e.g. `"Tickets"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    /// e.g. `"available"`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Error payload the upstream sends with a non-`2xx` status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}
