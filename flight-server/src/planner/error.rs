//! Search error types.

/// Error from itinerary search.
///
/// Only caller mistakes are errors. An empty catalog, an unknown airport or
/// a date with no flights all produce an empty result instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Invalid search query
    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    /// Priority token is not one of the supported policies
    #[error("unknown priority {0:?}: expected cost, time or optimized")]
    UnknownPriority(String),
}
