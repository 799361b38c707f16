//! The `date` filter accepted by the artist-events endpoint.

use chrono::NaiveDate;

use crate::RequestError;

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// An inclusive calendar range, rendered as `YYYY-MM-DD,YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Creates a range, returning an error if `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, RequestError> {
        if from > to {
            return Err(RequestError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.from
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.to
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{}",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )
    }
}

// ---------------------------------------------------------------------------
// Event date filter
// ---------------------------------------------------------------------------

/// Which events to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventDate {
    /// Events that have not happened yet (the upstream default).
    Upcoming,
    /// Events in the past.
    Past,
    /// Past and upcoming events.
    All,
    /// Events within an explicit range.
    Range(DateRange),
}

impl std::fmt::Display for EventDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => f.write_str("upcoming"),
            Self::Past => f.write_str("past"),
            Self::All => f.write_str("all"),
            Self::Range(range) => std::fmt::Display::fmt(range, f),
        }
    }
}

impl std::str::FromStr for EventDate {
    type Err = RequestError;

    /// Parses `upcoming`, `past`, `all`, or `YYYY-MM-DD,YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            "all" => Ok(Self::All),
            other => {
                let invalid = || RequestError::InvalidEventDate {
                    input: other.to_string(),
                };
                let (from, to) = other.split_once(',').ok_or_else(invalid)?;
                let from = NaiveDate::parse_from_str(from.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
                let to = NaiveDate::parse_from_str(to.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
                DateRange::new(from, to).map(Self::Range)
            }
        }
    }
}

impl From<DateRange> for EventDate {
    fn from(range: DateRange) -> Self {
        Self::Range(range)
    }
}
