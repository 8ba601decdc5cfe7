//! Flight catalog: dataset parsing, indexing and publication.
//!
//! A catalog is built once per dataset version and is read-only from then
//! on. The store hands out snapshots and swaps in rebuilt catalogs.

mod error;
mod flight_catalog;
mod index;
mod loader;
mod store;

pub use error::CatalogError;
pub use flight_catalog::{Catalog, CatalogStats, IndexStats};
pub use index::SearchIndex;
pub use loader::{LoadReport, RecordError, parse_lines, parse_record};
pub use store::CatalogStore;
