//! Partitioned response storage for the precache worker.
//!
//! This crate provides:
//! - `CacheStorage` - Named partitions that can be opened and deleted
//! - `Cache` - A single partition keyed by request URL
//! - `CachedResponse` - A stored HTTP response
//! - `MemoryCacheStorage` - In-memory backend
//!
//! # Example
//!
//! ```ignore
//! use precache_store::{Cache, CacheStorage, CachedResponse, MemoryCacheStorage, RequestKey};
//!
//! let storage = MemoryCacheStorage::new();
//! let cache = storage.open("app-cache").await?;
//! cache.put(&RequestKey::new("https://app.example.com/"), CachedResponse::ok("<html>")).await?;
//! ```

mod error;
mod memory;
mod response;
mod storage;

pub use error::*;
pub use memory::*;
pub use response::*;
pub use storage::*;
