//! Resource manifest: logical path to content fingerprint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;

/// Path of the application root document.
pub const ROOT_PATH: &str = "/";

/// Mapping from served path to content fingerprint.
///
/// The JSON form is a flat object and doubles as the persisted manifest
/// record written after every successful activation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceManifest(BTreeMap<String, String>);

impl ResourceManifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the fingerprint of a path, replacing any previous one.
    pub fn insert(&mut self, path: impl Into<String>, fingerprint: impl Into<String>) {
        self.0.insert(path.into(), fingerprint.into());
    }

    /// Add an entry (builder form).
    pub fn with(mut self, path: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        self.insert(path, fingerprint);
        self
    }

    /// Fingerprint recorded for a path.
    pub fn fingerprint(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(|s| s.as_str())
    }

    /// Check whether a path is listed.
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// All listed paths, in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|s| s.as_str())
    }

    /// Iterate `(path, fingerprint)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the manifest is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to the persisted record format.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a persisted record.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResourceManifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
