//! Response formats and status-driven decoding.
//!
//! A request declares how its response body is decoded through
//! [`crate::ApiRequest::Response`], which names a [`ResponseFormat`]:
//!
//! - [`Json<T>`] decodes the body as `T` whatever the status code.
//! - [`EitherJson<R, E>`] decodes the body as `R` for a `2xx` status and as `E`
//!   for anything else, producing an [`Either`]. The status code picks the
//!   target *before* parsing; the body's shape is never sniffed.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::{ApiError, StatusOutcome};

/// Undecoded result of one network round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Full response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a raw response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Either
// ---------------------------------------------------------------------------

/// Exactly one of a success shape or an upstream error shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Either<R, E> {
    /// Decoded from a `2xx` response.
    Response(R),
    /// Decoded from any other status.
    ErrorResponse(E),
}

impl<R, E> Either<R, E> {
    /// Returns `true` for [`Either::Response`].
    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    /// The success value, if present.
    pub fn response(self) -> Option<R> {
        match self {
            Self::Response(r) => Some(r),
            Self::ErrorResponse(_) => None,
        }
    }

    /// The upstream error value, if present.
    pub fn error_response(self) -> Option<E> {
        match self {
            Self::Response(_) => None,
            Self::ErrorResponse(e) => Some(e),
        }
    }

    /// Converts into a `Result`, mapping the upstream error case to `Err`.
    pub fn into_result(self) -> Result<R, E> {
        match self {
            Self::Response(r) => Ok(r),
            Self::ErrorResponse(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// How a response body is turned into a typed value.
pub trait ResponseFormat {
    /// The decoded value.
    type Output;

    /// Decodes `body` given the status outcome computed from the status line.
    fn decode(outcome: StatusOutcome, body: &[u8]) -> Result<Self::Output, serde_json::Error>;
}

/// Plain JSON body, decoded the same way for every status.
#[derive(Debug)]
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned> ResponseFormat for Json<T> {
    type Output = T;

    fn decode(_outcome: StatusOutcome, body: &[u8]) -> Result<T, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// JSON body whose shape is chosen by the status code.
#[derive(Debug)]
pub struct EitherJson<R, E>(PhantomData<fn() -> (R, E)>);

impl<R: DeserializeOwned, E: DeserializeOwned> ResponseFormat for EitherJson<R, E> {
    type Output = Either<R, E>;

    fn decode(outcome: StatusOutcome, body: &[u8]) -> Result<Either<R, E>, serde_json::Error> {
        match outcome {
            StatusOutcome::Success => serde_json::from_slice(body).map(Either::Response),
            StatusOutcome::Failure => serde_json::from_slice(body).map(Either::ErrorResponse),
        }
    }
}

/// Decodes a raw response with format `F`.
///
/// ## Errors
///
/// - [`ApiError::EmptyBody`] if no body bytes were received.
/// - [`ApiError::Decoding`] if the body does not parse as the selected shape.
pub fn decode<F: ResponseFormat>(response: RawResponse) -> Result<F::Output, ApiError> {
    let RawResponse { status, body } = response;
    if body.is_empty() {
        return Err(ApiError::EmptyBody { status });
    }

    let outcome = StatusOutcome::from_status(status);
    F::decode(outcome, &body).map_err(|source| {
        tracing::debug!(status, error = %source, "response body did not match the expected shape");
        ApiError::Decoding { status, source }
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Found {
        name: String,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Problem {
        #[serde(rename = "errorMessage")]
        error_message: String,
    }

    type Union = EitherJson<Found, Problem>;

    #[test]
    fn test_success_status_selects_response() {
        let raw = RawResponse::new(200, br#"{"name":"Molchat Doma"}"#.to_vec());
        let decoded = decode::<Union>(raw).unwrap();
        assert_eq!(
            decoded,
            Either::Response(Found {
                name: "Molchat Doma".to_string()
            })
        );
    }

    #[test]
    fn test_error_status_selects_error_response() {
        let raw = RawResponse::new(404, br#"{"errorMessage":"not found"}"#.to_vec());
        let decoded = decode::<Union>(raw).unwrap();
        assert_eq!(
            decoded.error_response(),
            Some(Problem {
                error_message: "not found".to_string()
            })
        );
    }

    #[test]
    fn test_status_decides_even_if_other_shape_would_parse() {
        // A body that fits both shapes still follows the status code.
        let body = br#"{"name":"x","errorMessage":"boom"}"#.to_vec();
        assert!(decode::<Union>(RawResponse::new(201, body.clone()))
            .unwrap()
            .is_response());
        assert!(!decode::<Union>(RawResponse::new(500, body))
            .unwrap()
            .is_response());
    }

    #[test]
    fn test_success_status_with_wrong_shape_is_decoding_error() {
        let raw = RawResponse::new(200, br#"{"errorMessage":"oops"}"#.to_vec());
        let err = decode::<Union>(raw).unwrap_err();
        assert!(matches!(err, ApiError::Decoding { status: 200, .. }));
    }

    #[test]
    fn test_error_status_with_wrong_shape_is_decoding_error() {
        let raw = RawResponse::new(502, b"<html>Bad Gateway</html>".to_vec());
        let err = decode::<Union>(raw).unwrap_err();
        assert!(matches!(err, ApiError::Decoding { status: 502, .. }));
    }

    #[test]
    fn test_empty_body_fails() {
        let err = decode::<Json<Found>>(RawResponse::new(200, Vec::new())).unwrap_err();
        assert!(matches!(err, ApiError::EmptyBody { status: 200 }));
        let err = decode::<Union>(RawResponse::new(404, Vec::new())).unwrap_err();
        assert!(matches!(err, ApiError::EmptyBody { status: 404 }));
    }

    #[test]
    fn test_plain_json_ignores_status() {
        let raw = RawResponse::new(404, br#"{"name":"still decoded"}"#.to_vec());
        let found = decode::<Json<Found>>(raw).unwrap();
        assert_eq!(found.name, "still decoded");
    }

    #[test]
    fn test_into_result() {
        let ok: Either<u8, String> = Either::Response(1);
        assert_eq!(ok.into_result(), Ok(1));
        let err: Either<u8, String> = Either::ErrorResponse("no".to_string());
        assert_eq!(err.into_result(), Err("no".to_string()));
    }
}
