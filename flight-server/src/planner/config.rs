//! Search configuration for the flight planner.

use chrono::Duration;

use super::connections::LayoverWindow;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Shortest acceptable layover (minutes).
    /// Tighter connections risk a missed flight.
    pub min_layover_mins: u32,

    /// Longest acceptable layover (minutes).
    /// Longer waits are not a sellable itinerary.
    pub max_layover_mins: u32,

    /// Maximum number of connecting itineraries to build per query.
    pub max_connections: usize,

    /// Maximum number of itineraries to return.
    pub result_limit: usize,

    /// Maximum number of flights returned by an unconstrained query.
    pub full_scan_cap: usize,

    /// Reject unknown priorities and connection requests on partial
    /// queries, instead of falling back with a warning.
    pub strict: bool,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_layover_mins: u32,
        max_layover_mins: u32,
        max_connections: usize,
        result_limit: usize,
        full_scan_cap: usize,
        strict: bool,
    ) -> Self {
        Self {
            min_layover_mins,
            max_layover_mins,
            max_connections,
            result_limit,
            full_scan_cap,
            strict,
        }
    }

    /// Returns the minimum layover as a Duration.
    pub fn min_layover(&self) -> Duration {
        Duration::minutes(self.min_layover_mins as i64)
    }

    /// Returns the maximum layover as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::minutes(self.max_layover_mins as i64)
    }

    /// Returns the accepted layover range.
    pub fn layover_window(&self) -> LayoverWindow {
        LayoverWindow::new(self.min_layover(), self.max_layover())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_layover_mins: 60,  // 1 hour
            max_layover_mins: 480, // 8 hours
            max_connections: 10,
            result_limit: 50,
            full_scan_cap: 1000,
            strict: true,
        }
    }
}
