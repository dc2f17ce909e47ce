//! Worker configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bundle::AssetBundle;
use crate::error::{ConfigError, ConfigResult};
use crate::manifest::ResourceManifest;
use crate::scope::WorkerScope;

/// Names of the storage partitions owned by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Live partition served to requests.
    #[serde(default = "default_content")]
    pub content: String,
    /// Staging partition for shell files fetched during install.
    #[serde(default = "default_temp")]
    pub temp: String,
    /// Partition holding the last applied manifest record.
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// Key of the manifest record inside the manifest partition.
    #[serde(default = "default_manifest_key")]
    pub manifest_key: String,
}

fn default_content() -> String {
    "app-cache".to_string()
}

fn default_temp() -> String {
    "app-temp-cache".to_string()
}

fn default_manifest() -> String {
    "app-manifest".to_string()
}

fn default_manifest_key() -> String {
    "manifest".to_string()
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            temp: default_temp(),
            manifest: default_manifest(),
            manifest_key: default_manifest_key(),
        }
    }
}

impl PartitionConfig {
    /// All partition names, content first.
    pub fn names(&self) -> [&str; 3] {
        [&self.content, &self.temp, &self.manifest]
    }
}

/// Worker configuration file.
///
/// ```toml
/// origin = "https://app.example.com"
/// core = ["main.dart.js", "index.html"]
///
/// [resources]
/// "/" = "a1e042b2"
/// "index.html" = "a1e042b2"
/// "main.dart.js" = "9f29154e"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Origin the worker is registered for.
    pub origin: String,

    /// Partition naming.
    #[serde(default)]
    pub partitions: PartitionConfig,

    /// Resource manifest.
    #[serde(default)]
    pub resources: ResourceManifest,

    /// Shell files.
    #[serde(default)]
    pub core: Vec<String>,
}

impl WorkerConfig {
    /// Load config from a file; `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        Self::parse(&content, is_json).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(content: &str, is_json: bool) -> Result<Self, String> {
        if is_json {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            toml::from_str(content).map_err(|e| e.to_string())
        }
    }

    /// Validate and split into the pieces a worker is built from.
    pub fn into_parts(self) -> ConfigResult<(WorkerScope, PartitionConfig, AssetBundle)> {
        let scope = WorkerScope::new(self.origin)?;
        let bundle = AssetBundle::new(self.resources, self.core);
        bundle.validate()?;
        Ok((scope, self.partitions, bundle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML_CONFIG: &str = r#"
origin = "https://app.example.com"
core = ["main.dart.js", "index.html"]

[resources]
"/" = "r1"
"index.html" = "r1"
"main.dart.js" = "m1"
"#;

    #[test]
    fn test_partition_defaults() {
        let partitions = PartitionConfig::default();
        assert_eq!(partitions.names(), ["app-cache", "app-temp-cache", "app-manifest"]);
        assert_eq!(partitions.manifest_key, "manifest");
    }

    #[test]
    fn test_parse_toml() {
        let config = WorkerConfig::parse(TOML_CONFIG, false).unwrap();

        assert_eq!(config.origin, "https://app.example.com");
        assert_eq!(config.resources.len(), 3);
        assert_eq!(config.core, vec!["main.dart.js", "index.html"]);
        assert_eq!(config.partitions, PartitionConfig::default());
    }

    #[test]
    fn test_parse_json_with_partial_partitions() {
        let json = r#"{
            "origin": "http://localhost:8080",
            "partitions": { "content": "custom" },
            "resources": { "/": "r1" },
            "core": []
        }"#;
        let config = WorkerConfig::parse(json, true).unwrap();

        assert_eq!(config.partitions.content, "custom");
        assert_eq!(config.partitions.temp, "app-temp-cache");
    }

    #[test]
    fn test_into_parts_validates() {
        let config = WorkerConfig::parse(TOML_CONFIG, false).unwrap();
        let (scope, _, bundle) = config.into_parts().unwrap();

        assert_eq!(scope.origin(), "https://app.example.com");
        assert_eq!(bundle.core.len(), 2);

        let mut bad = WorkerConfig::parse(TOML_CONFIG, false).unwrap();
        bad.core.push("missing.js".to_string());
        assert!(matches!(
            bad.into_parts(),
            Err(ConfigError::UnknownCoreEntry(_))
        ));
    }

    #[test]
    fn test_load_demo_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/precache.toml");
        let (scope, partitions, bundle) = WorkerConfig::load(path).unwrap().into_parts().unwrap();

        assert_eq!(scope.origin(), "https://app.example.com");
        assert_eq!(partitions, PartitionConfig::default());
        assert_eq!(bundle.core.len(), 5);
        assert_eq!(bundle.resources.fingerprint("/"), bundle.resources.fingerprint("index.html"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = WorkerConfig::load("/nonexistent/precache.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
