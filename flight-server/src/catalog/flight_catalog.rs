//! The in-memory flight catalog and its indexes.
//!
//! A catalog is built in one pass over a dataset and never changes after
//! that. Every flight lives once in an arena; the six indexes file flight
//! ids under the keys searches use, so no query has to scan the arena.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{AirportCode, FlightFact, FlightId};

use super::error::CatalogError;
use super::index::SearchIndex;
use super::loader::{LoadReport, parse_lines};

/// Bucket counts for each index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub by_source: usize,
    pub by_destination: usize,
    pub by_date: usize,
    pub by_route: usize,
    pub by_source_date: usize,
    pub by_destination_date: usize,
}

/// Summary of a built catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_flights: usize,
    pub total_airports: usize,
    pub indexes: IndexStats,
    pub load: LoadReport,
}

/// Immutable collection of flights plus lookup indexes.
///
/// `Catalog` is `Send + Sync` and holds no interior mutability, so any
/// number of searches can read one concurrently without locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    flights: Vec<Arc<FlightFact>>,
    airports: BTreeSet<AirportCode>,
    by_source: SearchIndex<AirportCode>,
    by_destination: SearchIndex<AirportCode>,
    by_date: SearchIndex<NaiveDate>,
    by_route: SearchIndex<(AirportCode, AirportCode)>,
    by_source_date: SearchIndex<(AirportCode, NaiveDate)>,
    by_destination_date: SearchIndex<(AirportCode, NaiveDate)>,
    report: LoadReport,
}

impl Catalog {
    /// Build a catalog from already-parsed flights.
    ///
    /// Flight ids follow input order, and so does every index bucket.
    pub fn build(facts: impl IntoIterator<Item = FlightFact>) -> Self {
        let mut catalog = Self {
            flights: Vec::new(),
            airports: BTreeSet::new(),
            by_source: SearchIndex::new(),
            by_destination: SearchIndex::new(),
            by_date: SearchIndex::new(),
            by_route: SearchIndex::new(),
            by_source_date: SearchIndex::new(),
            by_destination_date: SearchIndex::new(),
            report: LoadReport::default(),
        };

        for fact in facts {
            catalog.insert(fact);
        }
        catalog.report.accepted = catalog.flights.len();

        catalog
    }

    /// Parse dataset lines and build a catalog from the valid records.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (facts, report) = parse_lines(lines);
        let mut catalog = Self::build(facts);
        catalog.report = report;
        catalog
    }

    /// Read and index a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let start = Instant::now();

        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_lines(contents.lines());

        if catalog.report.dropped > 0 {
            warn!(
                path = %path.display(),
                dropped = catalog.report.dropped,
                "dropped malformed flight records"
            );
        }
        info!(
            path = %path.display(),
            flights = catalog.len(),
            airports = catalog.airports.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "catalog loaded"
        );

        Ok(catalog)
    }

    fn insert(&mut self, fact: FlightFact) {
        let id = FlightId(self.flights.len());
        let source = *fact.source();
        let destination = *fact.destination();
        let date = fact.date();

        self.airports.insert(source);
        self.airports.insert(destination);

        self.by_source.insert(source, id);
        self.by_destination.insert(destination, id);
        self.by_date.insert(date, id);
        self.by_route.insert((source, destination), id);
        self.by_source_date.insert((source, date), id);
        self.by_destination_date.insert((destination, date), id);

        self.flights.push(Arc::new(fact));
    }

    /// Number of flights.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Whether the catalog holds no flights.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Look up a flight by id.
    pub fn get(&self, id: FlightId) -> Option<&Arc<FlightFact>> {
        self.flights.get(id.0)
    }

    /// Resolve a list of ids to flights, skipping unknown ids.
    pub fn resolve(&self, ids: &[FlightId]) -> Vec<Arc<FlightFact>> {
        ids.iter().filter_map(|id| self.get(*id).cloned()).collect()
    }

    /// All flights with their ids, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (FlightId, &Arc<FlightFact>)> {
        self.flights.iter().enumerate().map(|(i, f)| (FlightId(i), f))
    }

    /// Flights departing an airport.
    pub fn by_source(&self, source: &AirportCode) -> &[FlightId] {
        self.by_source.get(source)
    }

    /// Flights arriving at an airport.
    pub fn by_destination(&self, destination: &AirportCode) -> &[FlightId] {
        self.by_destination.get(destination)
    }

    /// Flights on a date.
    pub fn by_date(&self, date: NaiveDate) -> &[FlightId] {
        self.by_date.get(&date)
    }

    /// Flights on a route, any date.
    pub fn by_route(&self, source: &AirportCode, destination: &AirportCode) -> &[FlightId] {
        self.by_route.get(&(*source, *destination))
    }

    /// Flights departing an airport on a date.
    pub fn by_source_date(&self, source: &AirportCode, date: NaiveDate) -> &[FlightId] {
        self.by_source_date.get(&(*source, date))
    }

    /// Flights arriving at an airport on a date.
    pub fn by_destination_date(&self, destination: &AirportCode, date: NaiveDate) -> &[FlightId] {
        self.by_destination_date.get(&(*destination, date))
    }

    /// Every airport seen as a source or destination, sorted.
    pub fn airports(&self) -> impl Iterator<Item = &AirportCode> {
        self.airports.iter()
    }

    /// Outcome of parsing the dataset this catalog was built from.
    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    /// Flight, airport and index counts.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_flights: self.flights.len(),
            total_airports: self.airports.len(),
            indexes: IndexStats {
                by_source: self.by_source.bucket_count(),
                by_destination: self.by_destination.bucket_count(),
                by_date: self.by_date.bucket_count(),
                by_route: self.by_route.bucket_count(),
                by_source_date: self.by_source_date.bucket_count(),
                by_destination_date: self.by_destination_date.bucket_count(),
            },
            load: self.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn fact(day: u32, src: &str, dst: &str, cost: u64) -> FlightFact {
        FlightFact::new(date(day), code(src), code(dst), cost, "0900", "1100")
    }

    fn sample() -> Catalog {
        Catalog::build(vec![
            fact(9, "JFK", "ATL", 100),
            fact(9, "ATL", "LAX", 150),
            fact(10, "JFK", "ATL", 120),
            fact(9, "JFK", "LAX", 400),
        ])
    }

    #[test]
    fn ids_follow_input_order() {
        let catalog = sample();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(FlightId(0)).unwrap().cost_cents(), 100);
        assert_eq!(catalog.get(FlightId(3)).unwrap().cost_cents(), 400);
        assert!(catalog.get(FlightId(4)).is_none());
    }

    #[test]
    fn indexes_every_key() {
        let catalog = sample();
        let (jfk, atl, lax) = (code("JFK"), code("ATL"), code("LAX"));

        assert_eq!(catalog.by_source(&jfk), &[FlightId(0), FlightId(2), FlightId(3)]);
        assert_eq!(catalog.by_destination(&atl), &[FlightId(0), FlightId(2)]);
        assert_eq!(catalog.by_date(date(9)), &[FlightId(0), FlightId(1), FlightId(3)]);
        assert_eq!(catalog.by_route(&jfk, &atl), &[FlightId(0), FlightId(2)]);
        assert_eq!(catalog.by_source_date(&jfk, date(10)), &[FlightId(2)]);
        assert_eq!(catalog.by_destination_date(&lax, date(9)), &[FlightId(1), FlightId(3)]);
    }

    #[test]
    fn missing_keys_are_empty() {
        let catalog = sample();
        assert!(catalog.by_source(&code("SFO")).is_empty());
        assert!(catalog.by_date(date(20)).is_empty());
        assert!(catalog.by_route(&code("LAX"), &code("JFK")).is_empty());
    }

    #[test]
    fn airports_are_sorted_and_unique() {
        let catalog = sample();
        let names: Vec<&str> = catalog.airports().map(|a| a.as_str()).collect();
        assert_eq!(names, vec!["ATL", "JFK", "LAX"]);
    }

    #[test]
    fn resolve_skips_unknown_ids() {
        let catalog = sample();
        let flights = catalog.resolve(&[FlightId(1), FlightId(99)]);
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].source(), &code("ATL"));
    }

    #[test]
    fn stats_report_bucket_counts() {
        let stats = sample().stats();
        assert_eq!(stats.total_flights, 4);
        assert_eq!(stats.total_airports, 3);
        assert_eq!(stats.indexes.by_source, 2);
        assert_eq!(stats.indexes.by_destination, 2);
        assert_eq!(stats.indexes.by_date, 2);
        assert_eq!(stats.indexes.by_route, 3);
        assert_eq!(stats.indexes.by_source_date, 3);
        assert_eq!(stats.indexes.by_destination_date, 3);
        assert_eq!(stats.load.accepted, 4);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::build(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.airports().count(), 0);
        assert_eq!(catalog.stats().total_flights, 0);
    }

    #[test]
    fn from_lines_records_report() {
        let catalog = Catalog::from_lines([
            "(flight 2025 08 09 JFK ATL 100 0900 1100)",
            "(flight 2025 08 09 JFK ATL free 0900 1100)",
            "",
        ]);
        assert_eq!(catalog.len(), 1);
        let report = catalog.load_report();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "(flight 2025 08 09 JFK ATL 100 0900 1100)").unwrap();
        writeln!(file, "(flight 2025 08 09 ATL LAX 150 1230 1500)").unwrap();
        writeln!(file, "(flight 2025 08 09 ATL LAX)").unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.load_report().dropped, 1);
    }

    #[test]
    fn load_missing_file_is_error() {
        let err = Catalog::load("/nonexistent/flights.metta").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
