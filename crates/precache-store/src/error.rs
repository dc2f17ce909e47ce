//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a storage backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend refused a write for lack of space.
    #[error("Storage quota exceeded for partition '{0}'")]
    Quota(String),
}
