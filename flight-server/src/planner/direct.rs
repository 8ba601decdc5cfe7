//! Direct flight search over the catalog indexes.
//!
//! Every query is answered from the narrowest index its bound fields allow.
//! Only a query with no source, destination or date touches the arena
//! directly, and that scan is capped.

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::FlightId;

use super::query::FlightFilter;

/// Which index answered a direct search, most selective first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPlan {
    /// Source+date bucket, filtered by destination
    RouteOnDate,
    /// Source+destination bucket
    Route,
    /// Source+date bucket
    SourceOnDate,
    /// Destination+date bucket
    DestinationOnDate,
    /// Source bucket
    Source,
    /// Destination bucket
    Destination,
    /// Date bucket
    Date,
    /// Capped walk of the whole catalog
    FullScan,
}

impl IndexPlan {
    /// Pick the most selective index for the fields a filter binds.
    pub fn choose(filter: &FlightFilter) -> Self {
        match (
            filter.source.is_some(),
            filter.destination.is_some(),
            filter.date.is_some(),
        ) {
            (true, true, true) => IndexPlan::RouteOnDate,
            (true, true, false) => IndexPlan::Route,
            (true, false, true) => IndexPlan::SourceOnDate,
            (false, true, true) => IndexPlan::DestinationOnDate,
            (true, false, false) => IndexPlan::Source,
            (false, true, false) => IndexPlan::Destination,
            (false, false, true) => IndexPlan::Date,
            (false, false, false) => IndexPlan::FullScan,
        }
    }
}

/// Flights found by a direct search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMatches {
    pub plan: IndexPlan,
    /// Matching flight ids, in catalog order within the chosen bucket.
    pub flights: Vec<FlightId>,
}

/// Find flights matching a filter through the most selective index.
///
/// Returns exactly the flights `filter.matches` accepts, except for an
/// unconstrained filter, which returns the first `full_scan_cap` flights.
/// The result is unordered with respect to any ranking.
pub fn direct_search(catalog: &Catalog, filter: &FlightFilter, full_scan_cap: usize) -> DirectMatches {
    let plan = IndexPlan::choose(filter);

    let flights = match (&filter.source, &filter.destination, filter.date) {
        (Some(source), Some(destination), Some(date)) => catalog
            .by_source_date(source, date)
            .iter()
            .copied()
            .filter(|id| {
                catalog
                    .get(*id)
                    .is_some_and(|f| f.destination() == destination)
            })
            .collect(),
        (Some(source), Some(destination), None) => catalog.by_route(source, destination).to_vec(),
        (Some(source), None, Some(date)) => catalog.by_source_date(source, date).to_vec(),
        (None, Some(destination), Some(date)) => {
            catalog.by_destination_date(destination, date).to_vec()
        }
        (Some(source), None, None) => catalog.by_source(source).to_vec(),
        (None, Some(destination), None) => catalog.by_destination(destination).to_vec(),
        (None, None, Some(date)) => catalog.by_date(date).to_vec(),
        (None, None, None) => catalog.iter().take(full_scan_cap).map(|(id, _)| id).collect(),
    };

    debug!(?plan, matches = flights.len(), "direct search");

    DirectMatches { plan, flights }
}
