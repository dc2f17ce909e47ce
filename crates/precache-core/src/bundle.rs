//! Asset bundle: the resource manifest plus the application shell.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::manifest::{ResourceManifest, ROOT_PATH};

/// Build-time asset set shipped with one version of the worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBundle {
    /// Every servable resource and its fingerprint.
    #[serde(default)]
    pub resources: ResourceManifest,
    /// Shell files fetched during install, in order.
    #[serde(default)]
    pub core: Vec<String>,
}

impl AssetBundle {
    /// Create a bundle from resources and the shell list.
    pub fn new(resources: ResourceManifest, core: Vec<String>) -> Self {
        Self { resources, core }
    }

    /// Check that every path is non-empty and origin-relative, and every
    /// shell entry is a known, unique resource.
    ///
    /// `/` is the only path allowed to start with a slash.
    pub fn validate(&self) -> ConfigResult<()> {
        for path in self.resources.paths() {
            if path.is_empty() {
                return Err(ConfigError::EmptyPath);
            }
            if path != ROOT_PATH && path.starts_with('/') {
                return Err(ConfigError::RootedPath(path.to_string()));
            }
        }

        let mut seen = HashSet::new();
        for path in &self.core {
            if path.is_empty() {
                return Err(ConfigError::EmptyPath);
            }
            if !self.resources.contains(path) {
                return Err(ConfigError::UnknownCoreEntry(path.clone()));
            }
            if !seen.insert(path.as_str()) {
                return Err(ConfigError::DuplicateCoreEntry(path.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources() -> ResourceManifest {
        ResourceManifest::new()
            .with("/", "r1")
            .with("index.html", "r1")
            .with("main.dart.js", "m1")
            .with("assets/logo.png", "l1")
    }

    #[test]
    fn test_bundle_validate_ok() {
        let bundle = AssetBundle::new(
            resources(),
            vec!["main.dart.js".to_string(), "index.html".to_string()],
        );

        assert!(bundle.validate().is_ok());
    }

    #[test]
    fn test_bundle_unknown_core_entry() {
        let bundle = AssetBundle::new(resources(), vec!["flutter.js".to_string()]);

        assert!(matches!(
            bundle.validate(),
            Err(ConfigError::UnknownCoreEntry(p)) if p == "flutter.js"
        ));
    }

    #[test]
    fn test_bundle_duplicate_core_entry() {
        let bundle = AssetBundle::new(
            resources(),
            vec!["index.html".to_string(), "index.html".to_string()],
        );

        assert!(matches!(
            bundle.validate(),
            Err(ConfigError::DuplicateCoreEntry(_))
        ));
    }

    #[test]
    fn test_bundle_rejects_slash_prefixed_paths() {
        let bundle = AssetBundle::new(resources().with("/assets/a.png", "a1"), Vec::new());

        assert!(matches!(
            bundle.validate(),
            Err(ConfigError::RootedPath(p)) if p == "/assets/a.png"
        ));
    }

    #[test]
    fn test_bundle_root_is_only_slash_path() {
        let bundle = AssetBundle::new(ResourceManifest::new().with("/", "r1"), Vec::new());
        assert!(bundle.validate().is_ok());

        let bundle = AssetBundle::new(ResourceManifest::new().with("//", "r1"), Vec::new());
        assert!(matches!(bundle.validate(), Err(ConfigError::RootedPath(_))));
    }

    #[test]
    fn test_bundle_empty_path() {
        let bundle = AssetBundle::new(resources().with("", "x"), Vec::new());

        assert!(matches!(bundle.validate(), Err(ConfigError::EmptyPath)));
    }
}
