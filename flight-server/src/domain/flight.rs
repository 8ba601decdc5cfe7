//! Scheduled flight segments.

use chrono::NaiveDate;

use super::time::{flight_duration, parse_clock};
use super::AirportCode;

/// Position of a flight in a catalog.
///
/// Indexes store these instead of the flights themselves, so every index
/// bucket is a list of small integers into one shared arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightId(pub usize);

impl std::fmt::Display for FlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scheduled flight segment, as ingested from the dataset.
///
/// Immutable after construction. The duration is derived from the takeoff
/// and landing clocks once, at construction, and is always in `0..=1440`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use flight_server::domain::{AirportCode, FlightFact};
///
/// let flight = FlightFact::new(
///     NaiveDate::from_ymd_opt(2025, 8, 9).unwrap(),
///     AirportCode::parse("JFK").unwrap(),
///     AirportCode::parse("ATL").unwrap(),
///     100,
///     "0900",
///     "1100",
/// );
/// assert_eq!(flight.duration_minutes(), 120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightFact {
    date: NaiveDate,
    source: AirportCode,
    destination: AirportCode,
    cost_cents: u64,
    takeoff: String,
    landing: String,
    duration_minutes: u32,
}

impl FlightFact {
    /// Create a flight, deriving its duration from the clock strings.
    pub fn new(
        date: NaiveDate,
        source: AirportCode,
        destination: AirportCode,
        cost_cents: u64,
        takeoff: impl Into<String>,
        landing: impl Into<String>,
    ) -> Self {
        let takeoff = takeoff.into();
        let landing = landing.into();
        let duration_minutes = flight_duration(&takeoff, &landing);

        Self {
            date,
            source,
            destination,
            cost_cents,
            takeoff,
            landing,
            duration_minutes,
        }
    }

    /// Date of departure.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Departure airport.
    pub fn source(&self) -> &AirportCode {
        &self.source
    }

    /// Arrival airport.
    pub fn destination(&self) -> &AirportCode {
        &self.destination
    }

    /// Fare, in the dataset's minor currency unit.
    pub fn cost_cents(&self) -> u64 {
        self.cost_cents
    }

    /// Takeoff clock as given in the dataset.
    pub fn takeoff(&self) -> &str {
        &self.takeoff
    }

    /// Landing clock as given in the dataset.
    pub fn landing(&self) -> &str {
        &self.landing
    }

    /// Flight duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Takeoff as minutes since midnight, 0 if not a digit string.
    pub fn takeoff_minutes(&self) -> u32 {
        parse_clock(&self.takeoff)
    }

    /// Landing as minutes since midnight, 0 if not a digit string.
    ///
    /// Not range checked: a "2400" landing is 1440.
    pub fn landing_minutes(&self) -> u32 {
        parse_clock(&self.landing)
    }
}
