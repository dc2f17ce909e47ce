//! In-memory storage backend (for development/testing).

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::response::{CachedResponse, RequestKey};
use crate::storage::{Cache, CacheStorage};

type Entries = Arc<RwLock<BTreeMap<RequestKey, CachedResponse>>>;

/// In-memory set of partitions.
///
/// Clones share the same underlying partitions.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStorage {
    partitions: Arc<RwLock<BTreeMap<String, Entries>>>,
}

impl MemoryCacheStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    type Cache = MemoryCache;

    async fn open(&self, name: &str) -> StoreResult<MemoryCache> {
        let mut partitions = self.partitions.write().await;
        let entries = partitions.entry(name.to_string()).or_default().clone();
        Ok(MemoryCache {
            name: name.to_string(),
            entries,
        })
    }

    async fn delete(&self, name: &str) -> StoreResult<bool> {
        Ok(self.partitions.write().await.remove(name).is_some())
    }

    async fn has(&self, name: &str) -> StoreResult<bool> {
        Ok(self.partitions.read().await.contains_key(name))
    }

    async fn names(&self) -> StoreResult<Vec<String>> {
        Ok(self.partitions.read().await.keys().cloned().collect())
    }
}

/// Handle to one in-memory partition.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    name: String,
    entries: Entries,
}

impl MemoryCache {
    /// Partition name this handle was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check whether the partition is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &RequestKey) -> StoreResult<Option<CachedResponse>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &RequestKey, response: CachedResponse) -> StoreResult<()> {
        self.entries.write().await.insert(key.clone(), response);
        Ok(())
    }

    async fn delete(&self, key: &RequestKey) -> StoreResult<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn keys(&self) -> StoreResult<Vec<RequestKey>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(path: &str) -> RequestKey {
        RequestKey::new(format!("https://app.example.com/{}", path))
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let storage = MemoryCacheStorage::new();
        let cache = storage.open("content").await.unwrap();

        cache.put(&key("a.js"), CachedResponse::ok("a")).await.unwrap();
        assert_eq!(cache.get(&key("a.js")).await.unwrap().unwrap().text(), "a");
        assert!(cache.get(&key("b.js")).await.unwrap().is_none());

        assert!(cache.delete(&key("a.js")).await.unwrap());
        assert!(!cache.delete(&key("a.js")).await.unwrap());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_open_shares_partition() {
        let storage = MemoryCacheStorage::new();
        let first = storage.open("content").await.unwrap();
        let second = storage.open("content").await.unwrap();

        first.put(&key("a.js"), CachedResponse::ok("a")).await.unwrap();
        assert_eq!(second.len().await, 1);
        assert_eq!(second.name(), "content");
    }

    #[tokio::test]
    async fn test_delete_detaches_open_handles() {
        let storage = MemoryCacheStorage::new();
        let old = storage.open("content").await.unwrap();
        old.put(&key("a.js"), CachedResponse::ok("a")).await.unwrap();

        assert!(storage.delete("content").await.unwrap());
        assert!(!storage.has("content").await.unwrap());

        let fresh = storage.open("content").await.unwrap();
        assert!(fresh.is_empty().await);

        // Writes through the stale handle do not reach the new partition.
        old.put(&key("b.js"), CachedResponse::ok("b")).await.unwrap();
        assert!(fresh.is_empty().await);
    }

    #[tokio::test]
    async fn test_names_and_delete_missing() {
        let storage = MemoryCacheStorage::new();
        storage.open("b").await.unwrap();
        storage.open("a").await.unwrap();

        assert_eq!(storage.names().await.unwrap(), vec!["a", "b"]);
        assert!(!storage.delete("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_sorted() {
        let storage = MemoryCacheStorage::new();
        let cache = storage.open("content").await.unwrap();
        cache.put(&key("b"), CachedResponse::ok("")).await.unwrap();
        cache.put(&key("a"), CachedResponse::ok("")).await.unwrap();

        let keys = cache.keys().await.unwrap();
        assert_eq!(keys, vec![key("a"), key("b")]);
    }
}
