//! Itinerary search over a flight catalog.
//!
//! Direct flights come from the catalog indexes. When connections are
//! requested for a fully specified query, one-stop itineraries are added
//! and the combined list is ranked again.

use std::time::Instant;

use tracing::{debug, info, info_span};

use crate::catalog::Catalog;
use crate::domain::Itinerary;

use super::config::SearchConfig;
use super::connections::find_connections;
use super::direct::{IndexPlan, direct_search};
use super::error::SearchError;
use super::query::Query;
use super::rank::rank;

/// Result of itinerary search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Found itineraries, ranked best-first.
    pub itineraries: Vec<Itinerary>,

    /// Direct and connecting candidates found before truncation.
    pub total_candidates: usize,

    /// Index that answered the direct part of the query.
    pub plan: IndexPlan,
}

/// Itinerary planner over one catalog snapshot.
pub struct Planner<'a> {
    catalog: &'a Catalog,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(catalog: &'a Catalog, config: &'a SearchConfig) -> Self {
        Self { catalog, config }
    }

    /// Search for itineraries matching a query.
    ///
    /// Only an invalid query is an error. A query nothing matches returns
    /// an empty result.
    pub fn search(&self, query: &Query) -> Result<SearchResult, SearchError> {
        let started = Instant::now();
        let validated = query.validate(self.config.strict)?;

        let span = info_span!(
            "search",
            source = ?validated.filter.source,
            destination = ?validated.filter.destination,
            date = ?validated.filter.date,
            priority = %validated.priority,
        );
        let _guard = span.enter();

        let limit = validated.limit.unwrap_or(self.config.result_limit);

        let direct = direct_search(self.catalog, &validated.filter, self.config.full_scan_cap);
        let mut total_candidates = direct.flights.len();

        let itineraries: Vec<Itinerary> = self
            .catalog
            .resolve(&direct.flights)
            .into_iter()
            .map(Itinerary::Direct)
            .collect();
        let mut itineraries = rank(itineraries, validated.priority);
        itineraries.truncate(limit);

        if let Some(route) = validated.connections {
            let max = validated
                .max_connections
                .unwrap_or(self.config.max_connections);
            let connections = find_connections(
                self.catalog,
                &route.source,
                &route.destination,
                route.date,
                self.config.layover_window(),
                max,
            );
            debug!(found = connections.len(), "merging connections");
            total_candidates += connections.len();

            itineraries.extend(connections.into_iter().map(Itinerary::from));
            itineraries = rank(itineraries, validated.priority);
            itineraries.truncate(limit);
        }

        info!(
            plan = ?direct.plan,
            candidates = total_candidates,
            returned = itineraries.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "search complete"
        );

        Ok(SearchResult {
            itineraries,
            total_candidates,
            plan: direct.plan,
        })
    }
}

/// Search a catalog with a one-off planner.
pub fn search(
    catalog: &Catalog,
    config: &SearchConfig,
    query: &Query,
) -> Result<SearchResult, SearchError> {
    Planner::new(catalog, config).search(query)
}

