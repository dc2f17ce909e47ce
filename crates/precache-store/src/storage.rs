//! Storage traits.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::response::{CachedResponse, RequestKey};

/// A single named partition of stored responses.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Look up the response stored for a request.
    async fn get(&self, key: &RequestKey) -> StoreResult<Option<CachedResponse>>;

    /// Store a response, replacing any previous one for the same request.
    async fn put(&self, key: &RequestKey, response: CachedResponse) -> StoreResult<()>;

    /// Remove an entry. Returns whether it existed.
    async fn delete(&self, key: &RequestKey) -> StoreResult<bool>;

    /// All stored request keys.
    async fn keys(&self) -> StoreResult<Vec<RequestKey>>;
}

/// The set of named partitions.
///
/// Deleting a partition detaches handles that are still open; opening the
/// same name afterwards yields a new, empty partition.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Handle type for an open partition.
    type Cache: Cache;

    /// Open a partition, creating it if needed.
    async fn open(&self, name: &str) -> StoreResult<Self::Cache>;

    /// Delete a partition and everything in it. Returns whether it existed.
    async fn delete(&self, name: &str) -> StoreResult<bool>;

    /// Check whether a partition exists.
    async fn has(&self, name: &str) -> StoreResult<bool>;

    /// Names of all existing partitions.
    async fn names(&self) -> StoreResult<Vec<String>>;
}
