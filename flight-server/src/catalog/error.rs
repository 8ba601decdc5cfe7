//! Catalog error types.

use std::path::PathBuf;

/// Errors that can occur when loading or publishing a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Dataset file could not be read
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Background rebuild task failed
    #[error("catalog rebuild task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
