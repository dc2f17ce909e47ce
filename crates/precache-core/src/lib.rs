//! Build-time data model for the precache worker.
//!
//! This crate provides:
//! - `ResourceManifest` - Path to content fingerprint mapping
//! - `AssetBundle` - Resources plus the application shell list
//! - `WorkerScope` - Origin-relative URL and path mapping
//! - `PartitionConfig` - Names of the storage partitions
//! - `ManifestDiff` - Comparison of two manifests
//! - `WorkerConfig` - File-backed worker configuration
//!
//! # Example
//!
//! ```ignore
//! use precache_core::{ResourceManifest, WorkerScope};
//!
//! let mut resources = ResourceManifest::new();
//! resources.insert("/", "a1e042b2");
//! resources.insert("main.dart.js", "9f29154e");
//!
//! let scope = WorkerScope::new("https://app.example.com")?;
//! assert_eq!(scope.resolve_request("https://app.example.com/#/home").as_deref(), Some("/"));
//! ```

mod bundle;
mod config;
mod diff;
mod error;
mod manifest;
mod scope;

pub use bundle::*;
pub use config::*;
pub use diff::*;
pub use error::*;
pub use manifest::*;
pub use scope::*;
