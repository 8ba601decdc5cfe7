//! Published catalog with atomic replacement.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::CatalogError;
use super::flight_catalog::{Catalog, CatalogStats};

/// Thread-safe handle to the current catalog.
///
/// A store can only be created from a fully built catalog, so readers never
/// see a partial one. Readers take an `Arc` snapshot and search it without
/// holding the lock; a reload builds the replacement off to the side and
/// swaps the pointer, leaving in-flight searches on the old snapshot.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<RwLock<Arc<Catalog>>>,
    source: Option<PathBuf>,
}

impl CatalogStore {
    /// Publish an already-built catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
            source: None,
        }
    }

    /// Load a dataset file and publish the resulting catalog.
    ///
    /// The path is remembered for later [`reload`](Self::reload) calls.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let catalog = build_off_thread(&path).await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
            source: Some(path),
        })
    }

    /// The catalog currently published.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.inner.read().await;
        Arc::clone(&*guard)
    }

    /// Publish a new catalog, returning the one it replaced.
    pub async fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.inner.write().await;
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }

    /// Rebuild from the dataset file this store was opened from.
    ///
    /// On success, publishes the new catalog. On failure, the current
    /// catalog stays published and the error is returned. Stores created
    /// with [`new`](Self::new) have no file and keep their catalog.
    pub async fn reload(&self) -> Result<CatalogStats, CatalogError> {
        let Some(path) = &self.source else {
            return Ok(self.snapshot().await.stats());
        };

        let catalog = build_off_thread(path).await?;
        let stats = catalog.stats();
        self.replace(catalog).await;

        Ok(stats)
    }

    /// The dataset file backing this store, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Parse and index a dataset on the blocking pool.
async fn build_off_thread(path: &Path) -> Result<Catalog, CatalogError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || Catalog::load(path)).await?
}
