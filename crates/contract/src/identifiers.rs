//! Newtype identifiers.
//!
//! Configuration values and request inputs that have identity are represented
//! as distinct newtypes wrapping a primitive. This prevents accidentally
//! interchanging an [`AppId`] with an [`ArtistName`] even though both are
//! strings on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed, internally generated
// ---------------------------------------------------------------------------

/// Identifies a single dispatched request.
///
/// Generated fresh for every [`crate::dispatch`] call and recorded on its
/// tracing span, so the request and response events of one call can be
/// correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// URL scheme used to reach the upstream (e.g. `"https"`).
    Scheme
}

string_id! {
    /// Upstream authority: a host name, optionally followed by `:port`
    /// (e.g. `"rest.bandsintown.com"`, `"127.0.0.1:8080"`).
    Host
}

string_id! {
    /// Application identifier sent with every Bandsintown request.
    AppId
}

string_id! {
    /// Artist name as typed by the user; used verbatim as a path segment.
    ArtistName
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_id_rejected() {
        assert!(AppId::new("").is_none());
        assert!(Host::new(String::new()).is_none());
    }

    #[test]
    fn test_string_id_display() {
        let name = ArtistName::new("Molchat Doma").unwrap();
        assert_eq!(name.to_string(), "Molchat Doma");
        assert_eq!(name.as_str(), "Molchat Doma");
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new_random(), RequestId::new_random());
    }
}
