//! Install, activation and request-serving logic for the precache worker.
//!
//! This crate provides:
//! - `Reconciler` - Keeps the live partition in step with the asset bundle
//! - `Fetch` - Network seam, with `StaticNetwork` for development/testing
//! - `WorkerHost` - Host lifecycle seam, with `RecordingHost`
//! - `WorkerMessage` - Commands accepted over the message channel
//!
//! # Example
//!
//! ```ignore
//! use precache_worker::{Reconciler, RecordingHost, StaticNetwork};
//! use precache_store::MemoryCacheStorage;
//!
//! let worker = Reconciler::new(MemoryCacheStorage::new(), network, RecordingHost::new(), scope, bundle);
//! worker.install().await?;
//! let report = worker.activate().await?;
//! ```

mod error;
mod host;
mod message;
mod network;
mod reconciler;
mod report;
mod serve;

pub use error::*;
pub use host::*;
pub use message::*;
pub use network::*;
pub use reconciler::*;
pub use report::*;
pub use serve::*;
