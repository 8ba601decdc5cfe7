//! Domain types for the flight search engine.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod airport;
mod error;
mod flight;
mod itinerary;
mod time;

pub use airport::{AirportCode, InvalidAirportCode};
pub use error::DomainError;
pub use flight::{FlightFact, FlightId};
pub use itinerary::{Connection, Itinerary};
pub use time::{
    ClockTime, DEFAULT_DURATION_MINS, MINUTES_PER_DAY, TimeError, flight_duration,
    layover_minutes, parse_clock,
};
