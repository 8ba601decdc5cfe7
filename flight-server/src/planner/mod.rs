//! Itinerary planner.
//!
//! Answers "how can I fly from here to there on this date": direct flights
//! come straight from the catalog indexes, one-stop connections are built
//! by pairing an outbound and an inbound flight through a shared airport,
//! and the combined list is ranked by the caller's priority.

mod config;
mod connections;
mod direct;
mod error;
mod query;
mod rank;
mod search;


pub use config::SearchConfig;
pub use connections::{LayoverWindow, find_connections};
pub use direct::{DirectMatches, IndexPlan, direct_search};
pub use error::SearchError;
pub use query::{ConnectionRoute, FlightFilter, Priority, Query, ValidatedQuery};
pub use rank::{OptimizedScore, optimized_scores, rank};
pub use search::{Planner, SearchResult, search};
