//! One-stop connection search.
//!
//! A connection is an outbound flight from the origin and an inbound flight
//! to the destination that meet at the same airport on the same date, with
//! a layover inside the accepted window. Only fully specified queries
//! (origin, destination and date) are searched.
//!
//! Inbound candidates are bucketed by the airport they depart from, so each
//! outbound flight only looks at inbound flights it could actually connect
//! to. Enumeration stops as soon as the result cap is reached.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::domain::{AirportCode, Connection, FlightFact};

/// Inclusive range of acceptable layovers, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoverWindow {
    min_mins: u32,
    max_mins: u32,
}

impl LayoverWindow {
    /// Create a window from minimum and maximum layover durations.
    ///
    /// Negative durations count as zero.
    pub fn new(min: Duration, max: Duration) -> Self {
        let to_mins = |d: Duration| d.num_minutes().clamp(0, u32::MAX as i64) as u32;
        Self {
            min_mins: to_mins(min),
            max_mins: to_mins(max),
        }
    }

    /// Whether a layover of `minutes` is acceptable.
    pub fn contains(&self, minutes: u32) -> bool {
        (self.min_mins..=self.max_mins).contains(&minutes)
    }

    /// Shortest acceptable layover, in minutes.
    pub fn min_minutes(&self) -> u32 {
        self.min_mins
    }

    /// Longest acceptable layover, in minutes.
    pub fn max_minutes(&self) -> u32 {
        self.max_mins
    }
}

impl Default for LayoverWindow {
    fn default() -> Self {
        Self::new(Duration::hours(1), Duration::hours(8))
    }
}

/// Find up to `max_results` one-stop connections from `source` to
/// `destination` on `date`.
///
/// Results come in outbound-then-inbound catalog order. An empty list means
/// no valid pairing exists; it is never an error.
pub fn find_connections(
    catalog: &Catalog,
    source: &AirportCode,
    destination: &AirportCode,
    date: NaiveDate,
    window: LayoverWindow,
    max_results: usize,
) -> Vec<Connection> {
    let mut connections = Vec::new();
    if max_results == 0 {
        return connections;
    }

    let day_flights = catalog.resolve(catalog.by_date(date));

    let outbound: Vec<&Arc<FlightFact>> = day_flights
        .iter()
        .filter(|f| f.source() == source)
        .collect();

    // Inbound flights grouped by the airport they leave from.
    let mut inbound_by_origin: HashMap<AirportCode, Vec<&Arc<FlightFact>>> = HashMap::new();
    for flight in day_flights.iter().filter(|f| f.destination() == destination) {
        inbound_by_origin
            .entry(*flight.source())
            .or_default()
            .push(flight);
    }

    if outbound.is_empty() || inbound_by_origin.is_empty() {
        debug!(
            %source,
            %destination,
            %date,
            outbound = outbound.len(),
            inbound_airports = inbound_by_origin.len(),
            "no connection candidates"
        );
        return connections;
    }

    'outbound: for out in &outbound {
        let Some(candidates) = inbound_by_origin.get(out.destination()) else {
            continue;
        };

        for inb in candidates {
            let connection = match Connection::new(Arc::clone(*out), Arc::clone(*inb)) {
                Ok(c) => c,
                Err(e) => {
                    trace!(error = %e, "skipping unchainable pair");
                    continue;
                }
            };

            if !window.contains(connection.layover_minutes()) {
                trace!(
                    via = %connection.connection_airport(),
                    layover = connection.layover_minutes(),
                    "layover outside window"
                );
                continue;
            }

            connections.push(connection);
            if connections.len() >= max_results {
                break 'outbound;
            }
        }
    }

    debug!(
        %source,
        %destination,
        %date,
        outbound = outbound.len(),
        found = connections.len(),
        "connection search"
    );

    connections
}
