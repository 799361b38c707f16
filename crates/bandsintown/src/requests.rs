//! Request values for the two Bandsintown endpoints.

use contract::{
    ApiError, ApiRequest, AppId, ArtistName, EitherJson, Endpoint, Parameters, Path, Query,
    RequestParameters,
};

use crate::{Artist, ErrorResponse, Event, EventDate};

/// `GET /artists/{artist_name}?app_id=..`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindArtist {
    /// Artist to look up; fills the `{artist_name}` segment.
    pub artist_name: Path<ArtistName>,
    /// Caller's application id.
    pub app_id: Query<AppId>,
}

impl FindArtist {
    /// Builds the lookup for `artist_name`.
    pub fn new(artist_name: ArtistName, app_id: AppId) -> Self {
        Self {
            artist_name: Path::new(artist_name),
            app_id: Query::new(app_id),
        }
    }
}

impl ApiRequest for FindArtist {
    const ENDPOINT: Endpoint = Endpoint::get("/artists/{artist_name}");
    type Response = EitherJson<Artist, ErrorResponse>;

    fn parameters(&self) -> Result<RequestParameters, ApiError> {
        Ok(Parameters::new()
            .path("artist_name", &self.artist_name)
            .query("app_id", &self.app_id)
            .build())
    }
}

/// `GET /artists/{artist_name}/events?app_id=..&date=..`
///
/// Without a `date` the upstream lists upcoming events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistEvents {
    /// Artist whose events are listed; fills the `{artist_name}` segment.
    pub artist_name: Path<ArtistName>,
    /// Caller's application id.
    pub app_id: Query<AppId>,
    /// Optional filter, omitted from the query when `None`.
    pub date: Query<Option<EventDate>>,
}

impl ArtistEvents {
    /// Builds the event listing for `artist_name`.
    pub fn new(artist_name: ArtistName, app_id: AppId, date: Option<EventDate>) -> Self {
        Self {
            artist_name: Path::new(artist_name),
            app_id: Query::new(app_id),
            date: Query::new(date),
        }
    }
}

impl ApiRequest for ArtistEvents {
    const ENDPOINT: Endpoint = Endpoint::get("/artists/{artist_name}/events");
    type Response = EitherJson<Vec<Event>, ErrorResponse>;

    fn parameters(&self) -> Result<RequestParameters, ApiError> {
        Ok(Parameters::new()
            .path("artist_name", &self.artist_name)
            .query("app_id", &self.app_id)
            .query_opt("date", &self.date)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use contract::{resolve, HttpMethod};

    use super::*;
    use crate::DateRange;

    fn name(value: &str) -> ArtistName {
        ArtistName::new(value).unwrap()
    }

    fn app() -> AppId {
        AppId::new("123").unwrap()
    }

    #[test]
    fn test_find_artist_resolves() {
        let resolved = resolve(&FindArtist::new(name("Molchat Doma"), app())).unwrap();
        assert_eq!(resolved.method, HttpMethod::Get);
        assert_eq!(resolved.path, "/artists/Molchat%20Doma");
        assert_eq!(resolved.query.get("app_id").map(String::as_str), Some("123"));
        assert!(resolved.headers.is_empty());
        assert!(resolved.body.is_none());
    }

    #[test]
    fn test_artist_with_slash_stays_one_segment() {
        let resolved = resolve(&FindArtist::new(name("AC/DC"), app())).unwrap();
        assert_eq!(resolved.path, "/artists/AC%2FDC");
    }

    #[test]
    fn test_artist_events_with_range() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 5, 5).unwrap(),
            NaiveDate::from_ymd_opt(2023, 9, 5).unwrap(),
        )
        .unwrap();
        let request = ArtistEvents::new(name("Molchat Doma"), app(), Some(range.into()));
        let resolved = resolve(&request).unwrap();

        assert_eq!(resolved.path, "/artists/Molchat%20Doma/events");
        assert_eq!(
            resolved.query.get("date").map(String::as_str),
            Some("2023-05-05,2023-09-05")
        );
        assert_eq!(resolved.query.len(), 2);
    }

    #[test]
    fn test_artist_events_without_date_omits_filter() {
        let resolved = resolve(&ArtistEvents::new(name("Molchat Doma"), app(), None)).unwrap();
        assert!(!resolved.query.contains_key("date"));
    }
}
