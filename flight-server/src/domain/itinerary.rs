//! Itinerary types.
//!
//! An `Itinerary` is one search result: either a single direct flight or a
//! pair of flights chained through a connection airport. Itineraries are
//! built per query and hold shared references into the catalog.

use std::sync::Arc;

use chrono::NaiveDate;

use super::time::layover_minutes;
use super::{AirportCode, DomainError, FlightFact};

/// Two flights chained through a shared airport.
///
/// Guarantees `outbound.destination == inbound.source` and that both fly on
/// the same date. All derived figures are computed once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    outbound: Arc<FlightFact>,
    inbound: Arc<FlightFact>,
    layover_minutes: u32,
}

impl Connection {
    /// Chain two flights, computing the layover from their clocks.
    ///
    /// A takeoff clock earlier than the landing clock is an overnight
    /// layover. The layover window itself is not checked here.
    pub fn new(outbound: Arc<FlightFact>, inbound: Arc<FlightFact>) -> Result<Self, DomainError> {
        if outbound.destination() != inbound.source() {
            return Err(DomainError::NotChained(
                *outbound.destination(),
                *inbound.source(),
            ));
        }
        if outbound.date() != inbound.date() {
            return Err(DomainError::DateMismatch);
        }

        let layover_minutes = layover_minutes(outbound.landing_minutes(), inbound.takeoff_minutes());

        Ok(Self {
            outbound,
            inbound,
            layover_minutes,
        })
    }

    /// First flight, out of the origin.
    pub fn outbound(&self) -> &Arc<FlightFact> {
        &self.outbound
    }

    /// Second flight, into the destination.
    pub fn inbound(&self) -> &Arc<FlightFact> {
        &self.inbound
    }

    /// Airport where the traveller changes planes.
    pub fn connection_airport(&self) -> &AirportCode {
        self.outbound.destination()
    }

    /// Ground time at the connection airport.
    pub fn layover_minutes(&self) -> u32 {
        self.layover_minutes
    }

    /// Ground time in (fractional) hours.
    pub fn layover_hours(&self) -> f64 {
        self.layover_minutes as f64 / 60.0
    }

    /// Sum of both fares, saturating at `u64::MAX`.
    pub fn total_cost(&self) -> u64 {
        self.outbound
            .cost_cents()
            .saturating_add(self.inbound.cost_cents())
    }

    /// Outbound flight time, plus layover, plus inbound flight time.
    pub fn total_duration(&self) -> u32 {
        self.outbound
            .duration_minutes()
            .saturating_add(self.layover_minutes)
            .saturating_add(self.inbound.duration_minutes())
    }
}

/// A search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Itinerary {
    /// A single nonstop flight
    Direct(Arc<FlightFact>),
    /// Two flights with one change of plane
    Connecting(Connection),
}

impl Itinerary {
    /// Total fare.
    pub fn cost_cents(&self) -> u64 {
        match self {
            Itinerary::Direct(flight) => flight.cost_cents(),
            Itinerary::Connecting(conn) => conn.total_cost(),
        }
    }

    /// Total time from first takeoff to last landing, in minutes.
    pub fn duration_minutes(&self) -> u32 {
        match self {
            Itinerary::Direct(flight) => flight.duration_minutes(),
            Itinerary::Connecting(conn) => conn.total_duration(),
        }
    }

    /// Origin airport.
    pub fn source(&self) -> &AirportCode {
        match self {
            Itinerary::Direct(flight) => flight.source(),
            Itinerary::Connecting(conn) => conn.outbound.source(),
        }
    }

    /// Final destination airport.
    pub fn destination(&self) -> &AirportCode {
        match self {
            Itinerary::Direct(flight) => flight.destination(),
            Itinerary::Connecting(conn) => conn.inbound.destination(),
        }
    }

    /// Departure date.
    pub fn date(&self) -> NaiveDate {
        match self {
            Itinerary::Direct(flight) => flight.date(),
            Itinerary::Connecting(conn) => conn.outbound.date(),
        }
    }

    /// First takeoff clock.
    pub fn takeoff(&self) -> &str {
        match self {
            Itinerary::Direct(flight) => flight.takeoff(),
            Itinerary::Connecting(conn) => conn.outbound.takeoff(),
        }
    }

    /// Final landing clock.
    pub fn landing(&self) -> &str {
        match self {
            Itinerary::Direct(flight) => flight.landing(),
            Itinerary::Connecting(conn) => conn.inbound.landing(),
        }
    }

    /// Whether this itinerary involves a change of plane.
    pub fn is_connecting(&self) -> bool {
        matches!(self, Itinerary::Connecting(_))
    }

    /// The flights making up this itinerary, in travel order.
    pub fn segments(&self) -> Vec<&Arc<FlightFact>> {
        match self {
            Itinerary::Direct(flight) => vec![flight],
            Itinerary::Connecting(conn) => vec![&conn.outbound, &conn.inbound],
        }
    }
}

impl From<Connection> for Itinerary {
    fn from(conn: Connection) -> Self {
        Itinerary::Connecting(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 9).unwrap()
    }

    fn flight(src: &str, dst: &str, cost: u64, takeoff: &str, landing: &str) -> Arc<FlightFact> {
        Arc::new(FlightFact::new(
            date(),
            code(src),
            code(dst),
            cost,
            takeoff,
            landing,
        ))
    }

    #[test]
    fn connection_derived_fields() {
        let out = flight("JFK", "ATL", 100, "0900", "1100");
        let inb = flight("ATL", "LAX", 150, "1230", "1500");
        let conn = Connection::new(out, inb).unwrap();

        assert_eq!(conn.connection_airport(), &code("ATL"));
        assert_eq!(conn.layover_minutes(), 90);
        assert!((conn.layover_hours() - 1.5).abs() < f64::EPSILON);
        assert_eq!(conn.total_cost(), 250);
        assert_eq!(conn.total_duration(), 120 + 90 + 150);
    }

    #[test]
    fn overnight_layover() {
        let out = flight("JFK", "ATL", 100, "2000", "2200");
        let inb = flight("ATL", "LAX", 150, "0100", "0300");
        let conn = Connection::new(out, inb).unwrap();
        assert_eq!(conn.layover_minutes(), 180);
    }

    #[test]
    fn layover_after_2400_landing() {
        let out = flight("JFK", "ATL", 100, "2200", "2400");
        let inb = flight("ATL", "LAX", 150, "0100", "0300");
        let conn = Connection::new(out, inb).unwrap();
        assert_eq!(conn.layover_minutes(), 60);
        assert_eq!(conn.total_duration(), 120 + 60 + 120);
    }

    #[test]
    fn huge_fares_saturate() {
        let out = flight("JFK", "ATL", u64::MAX, "0900", "1100");
        let inb = flight("ATL", "LAX", u64::MAX, "1230", "1500");
        let conn = Connection::new(out, inb).unwrap();
        assert_eq!(conn.total_cost(), u64::MAX);

        let itinerary: Itinerary = conn.into();
        assert_eq!(itinerary.cost_cents(), u64::MAX);
    }

    #[test]
    fn rejects_unchained_flights() {
        let out = flight("JFK", "ATL", 100, "0900", "1100");
        let inb = flight("ORD", "LAX", 150, "1230", "1500");
        let err = Connection::new(out, inb).unwrap_err();
        assert_eq!(err, DomainError::NotChained(code("ATL"), code("ORD")));
    }

    #[test]
    fn rejects_different_dates() {
        let out = flight("JFK", "ATL", 100, "0900", "1100");
        let inb = Arc::new(FlightFact::new(
            date().succ_opt().unwrap(),
            code("ATL"),
            code("LAX"),
            150,
            "1230",
            "1500",
        ));
        assert_eq!(
            Connection::new(out, inb).unwrap_err(),
            DomainError::DateMismatch
        );
    }

    #[test]
    fn itinerary_views() {
        let out = flight("JFK", "ATL", 100, "0900", "1100");
        let inb = flight("ATL", "LAX", 150, "1230", "1500");

        let direct = Itinerary::Direct(out.clone());
        assert!(!direct.is_connecting());
        assert_eq!(direct.cost_cents(), 100);
        assert_eq!(direct.duration_minutes(), 120);
        assert_eq!(direct.segments().len(), 1);

        let connecting: Itinerary = Connection::new(out, inb).unwrap().into();
        assert!(connecting.is_connecting());
        assert_eq!(connecting.source(), &code("JFK"));
        assert_eq!(connecting.destination(), &code("LAX"));
        assert_eq!(connecting.takeoff(), "0900");
        assert_eq!(connecting.landing(), "1500");
        assert_eq!(connecting.date(), date());
        assert_eq!(connecting.cost_cents(), 250);
        assert_eq!(connecting.duration_minutes(), 360);
        assert_eq!(connecting.segments().len(), 2);
    }
}
