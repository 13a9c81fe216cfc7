use std::path::PathBuf;

use thiserror::Error;

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Error type surfaced by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate tracked id in seed set: {0}")]
    DuplicateId(String),
}

/// Result alias for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Error type surfaced when publishing the total.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write total to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
