//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::planner::SearchConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Published flight catalog
    pub catalog: CatalogStore,

    /// Itinerary search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: CatalogStore, config: SearchConfig) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }
}
