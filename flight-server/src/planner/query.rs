//! Search queries and their validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{AirportCode, FlightFact};

use super::error::SearchError;

/// Ranking policy for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Cheapest first
    #[default]
    Cost,
    /// Shortest total travel time first
    Time,
    /// Even blend of normalized cost and time
    Optimized,
}

impl Priority {
    /// The wire token for this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Cost => "cost",
            Priority::Time => "time",
            Priority::Optimized => "optimized",
        }
    }

    /// Parse a priority token, falling back to [`Priority::Cost`].
    ///
    /// The fallback is logged, so a misspelt token is visible in the logs
    /// even though the caller gets results.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: SearchError| {
            warn!(token = s, error = %e, "unknown priority, ranking by cost");
            Priority::Cost
        })
    }
}

impl FromStr for Priority {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(Priority::Cost),
            "time" => Ok(Priority::Time),
            "optimized" => Ok(Priority::Optimized),
            _ => Err(SearchError::UnknownPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search request as supplied by a caller.
///
/// Source, destination and date are all optional; an absent field matches
/// anything. A date only counts when year, month and day are all given.
///
/// # Examples
///
/// ```
/// use flight_server::domain::AirportCode;
/// use flight_server::planner::{Priority, Query};
///
/// let query = Query::new()
///     .departing(AirportCode::parse("JFK").unwrap())
///     .arriving(AirportCode::parse("LAX").unwrap())
///     .on(2025, 8, 9)
///     .priority(Priority::Time)
///     .with_connections();
///
/// assert!(query.validate(true).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub source: Option<AirportCode>,
    pub destination: Option<AirportCode>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub priority: Priority,
    pub include_connections: bool,
    /// Overrides the configured connection cap.
    pub max_connections: Option<usize>,
    /// Overrides the configured result limit.
    pub limit: Option<usize>,
}

impl Query {
    /// An unconstrained query ranked by cost, without connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to flights departing `source`.
    pub fn departing(mut self, source: AirportCode) -> Self {
        self.source = Some(source);
        self
    }

    /// Restrict to flights arriving at `destination`.
    pub fn arriving(mut self, destination: AirportCode) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Restrict to flights on a calendar day.
    pub fn on(mut self, year: i32, month: u32, day: u32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self.day = Some(day);
        self
    }

    /// Restrict to flights on `date`.
    pub fn on_date(self, date: NaiveDate) -> Self {
        use chrono::Datelike;
        self.on(date.year(), date.month(), date.day())
    }

    /// Set the ranking policy.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Also search for one-stop itineraries.
    pub fn with_connections(mut self) -> Self {
        self.include_connections = true;
        self
    }

    /// Cap the number of connecting itineraries considered.
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Cap the number of itineraries returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The requested date, if year, month and day were all supplied.
    pub fn date(&self) -> Result<Option<NaiveDate>, SearchError> {
        match (self.year, self.month, self.day) {
            (None, None, None) => Ok(None),
            (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d)
                .map(Some)
                .ok_or_else(|| {
                    SearchError::InvalidQuery(format!("{y}-{m:02}-{d:02} is not a calendar date"))
                }),
            _ => Err(SearchError::InvalidQuery(
                "date requires year, month and day".to_string(),
            )),
        }
    }

    /// Check the query and resolve it into what the planner runs.
    ///
    /// With `strict` set, asking for connections without a source,
    /// destination and date is an error; otherwise connections are skipped
    /// with a warning.
    pub fn validate(&self, strict: bool) -> Result<ValidatedQuery, SearchError> {
        let date = self.date()?;

        if let (Some(source), Some(destination)) = (&self.source, &self.destination)
            && source == destination
        {
            return Err(SearchError::InvalidQuery(format!(
                "source and destination must differ (both {source})"
            )));
        }

        let filter = FlightFilter {
            source: self.source,
            destination: self.destination,
            date,
        };

        let connections = if self.include_connections {
            match filter.route_on_date() {
                Some(route) => Some(route),
                None if strict => {
                    return Err(SearchError::InvalidQuery(
                        "connections require source, destination and date".to_string(),
                    ));
                }
                None => {
                    warn!("connections need source, destination and date; skipping");
                    None
                }
            }
        } else {
            None
        };

        Ok(ValidatedQuery {
            filter,
            connections,
            priority: self.priority,
            max_connections: self.max_connections,
            limit: self.limit,
        })
    }
}

/// Which flights a direct search should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightFilter {
    pub source: Option<AirportCode>,
    pub destination: Option<AirportCode>,
    pub date: Option<NaiveDate>,
}

impl FlightFilter {
    /// Whether a flight satisfies every bound field.
    pub fn matches(&self, flight: &FlightFact) -> bool {
        self.source.is_none_or(|s| flight.source() == &s)
            && self.destination.is_none_or(|d| flight.destination() == &d)
            && self.date.is_none_or(|d| flight.date() == d)
    }

    /// The fully bound route and date, if every field is set.
    pub fn route_on_date(&self) -> Option<ConnectionRoute> {
        Some(ConnectionRoute {
            source: self.source?,
            destination: self.destination?,
            date: self.date?,
        })
    }
}

/// Origin, destination and date for a connection search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionRoute {
    pub source: AirportCode,
    pub destination: AirportCode,
    pub date: NaiveDate,
}

/// A query that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub filter: FlightFilter,
    /// Set when connections were requested and can be searched.
    pub connections: Option<ConnectionRoute>,
    pub priority: Priority,
    pub max_connections: Option<usize>,
    pub limit: Option<usize>,
}
