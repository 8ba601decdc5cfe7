//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{AirportCode, FlightFact, Itinerary};
use crate::planner::{Priority, Query, SearchError};

/// Query string of a search request.
///
/// Every field is optional and arrives as text. Empty values count as
/// absent, so a form that submits `year=` behaves like one that omits it.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,

    /// "cost", "time" or "optimized" (defaults to cost)
    pub priority: Option<String>,

    /// "true"/"false" (also "1"/"0")
    pub include_connections: Option<String>,

    pub max_connections: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    /// Convert the request into a planner query.
    ///
    /// In strict mode an unknown priority is rejected; otherwise it falls
    /// back to cost ordering with a warning.
    pub fn into_query(self, strict: bool) -> Result<Query, SearchError> {
        let mut query = Query::new();

        if let Some(source) = non_empty(&self.source) {
            query = query.departing(parse_airport("source", source)?);
        }
        if let Some(destination) = non_empty(&self.destination) {
            query = query.arriving(parse_airport("destination", destination)?);
        }

        query.year = parse_number("year", &self.year)?;
        query.month = parse_number("month", &self.month)?;
        query.day = parse_number("day", &self.day)?;

        if let Some(priority) = non_empty(&self.priority) {
            let priority = if strict {
                priority.parse::<Priority>()?
            } else {
                Priority::parse_lenient(priority)
            };
            query = query.priority(priority);
        }

        if let Some(flag) = non_empty(&self.include_connections) {
            query.include_connections = parse_flag(flag)?;
        }

        query.max_connections = parse_number("max_connections", &self.max_connections)?;
        query.limit = parse_number("limit", &self.limit)?;

        Ok(query)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_airport(field: &str, value: &str) -> Result<AirportCode, SearchError> {
    AirportCode::parse_normalized(value)
        .map_err(|e| SearchError::InvalidQuery(format!("{field}: {e}")))
}

fn parse_number<T: std::str::FromStr>(
    field: &str,
    value: &Option<String>,
) -> Result<Option<T>, SearchError> {
    non_empty(value)
        .map(|v| {
            v.parse::<T>().map_err(|_| {
                SearchError::InvalidQuery(format!("{field} must be a non-negative number, got {v:?}"))
            })
        })
        .transpose()
}

fn parse_flag(value: &str) -> Result<bool, SearchError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SearchError::InvalidQuery(format!(
            "include_connections must be true or false, got {value:?}"
        ))),
    }
}

/// Response to a search request.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Itineraries, best first
    pub results: Vec<ItineraryResult>,

    /// Candidates found before the result limit was applied
    pub total_candidates: usize,
}

/// Whether an itinerary is one flight or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItineraryKind {
    Direct,
    Connecting,
}

/// An itinerary in search results.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub kind: ItineraryKind,

    /// Travel date (YYYY-MM-DD)
    pub date: String,

    pub source: String,
    pub destination: String,

    /// Total cost in cents, the unit of the dataset's cost field
    pub cost_cents: u64,

    /// Total cost as dollars; a dataset cost of 250 is "$2.50"
    pub cost: String,

    /// First takeoff (HHMM)
    pub takeoff: String,

    /// Final landing (HHMM)
    pub landing: String,

    /// Total duration including any layover
    pub duration_minutes: u32,

    /// Where the traveller changes planes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_airport: Option<String>,

    /// Layover length, to one decimal place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layover_hours: Option<f64>,

    /// Flights in travel order
    pub segments: Vec<SegmentResult>,
}

/// One flight within an itinerary.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub source: String,
    pub destination: String,
    /// Fare in cents, as in the dataset
    pub cost_cents: u64,
    pub takeoff: String,
    pub landing: String,
    pub duration_minutes: u32,
}

/// Known airport codes, sorted.
#[derive(Debug, Serialize)]
pub struct AirportsResponse {
    pub airports: Vec<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let (kind, connection_airport, layover_hours) = match itinerary {
            Itinerary::Direct(_) => (ItineraryKind::Direct, None, None),
            Itinerary::Connecting(conn) => (
                ItineraryKind::Connecting,
                Some(conn.connection_airport().to_string()),
                Some(round_tenths(conn.layover_hours())),
            ),
        };

        Self {
            kind,
            date: itinerary.date().format("%Y-%m-%d").to_string(),
            source: itinerary.source().to_string(),
            destination: itinerary.destination().to_string(),
            cost_cents: itinerary.cost_cents(),
            cost: format_cost(itinerary.cost_cents()),
            takeoff: itinerary.takeoff().to_string(),
            landing: itinerary.landing().to_string(),
            duration_minutes: itinerary.duration_minutes(),
            connection_airport,
            layover_hours,
            segments: itinerary
                .segments()
                .into_iter()
                .map(|f| SegmentResult::from_flight(f))
                .collect(),
        }
    }
}

impl SegmentResult {
    /// Create from a domain FlightFact.
    pub fn from_flight(flight: &FlightFact) -> Self {
        Self {
            source: flight.source().to_string(),
            destination: flight.destination().to_string(),
            cost_cents: flight.cost_cents(),
            takeoff: flight.takeoff().to_string(),
            landing: flight.landing().to_string(),
            duration_minutes: flight.duration_minutes(),
        }
    }
}

/// Format cents as "$D.CC". Dataset costs are cents, so 2048 is "$20.48".
fn format_cost(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
