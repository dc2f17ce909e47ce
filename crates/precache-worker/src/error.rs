//! Worker error types.

use http::StatusCode;
use precache_core::ConfigError;
use precache_store::StoreError;
use thiserror::Error;

use crate::network::FetchError;

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Errors surfaced by the reconciler.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// A partition operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// A network fetch failed.
    #[error("Network error: {0}")]
    Network(#[from] FetchError),

    /// A bulk download received a non-2xx response.
    #[error("HTTP {status} for {url}")]
    BadStatus { url: String, status: StatusCode },

    /// The manifest record could not be encoded.
    #[error("Failed to encode manifest: {0}")]
    ManifestEncode(#[from] ConfigError),

    /// Activation failed; every partition has been deleted.
    #[error("Activation aborted and caches cleared: {0}")]
    Activation(#[source] Box<WorkerError>),
}
