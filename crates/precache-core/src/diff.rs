//! Comparison of a previously applied manifest with a new one.

use serde::Serialize;

use crate::manifest::ResourceManifest;

/// Whether a cached entry for `path` must be evicted when moving from
/// `previous` to `next`.
///
/// An entry survives only when `next` still lists it with the fingerprint
/// `previous` recorded for it.
pub fn should_evict(path: &str, previous: &ResourceManifest, next: &ResourceManifest) -> bool {
    match next.fingerprint(path) {
        None => true,
        Some(fingerprint) => previous.fingerprint(path) != Some(fingerprint),
    }
}

/// Path-level difference between two manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestDiff {
    /// Paths only in the new manifest.
    pub added: Vec<String>,
    /// Paths in both with a different fingerprint.
    pub changed: Vec<String>,
    /// Paths only in the previous manifest.
    pub removed: Vec<String>,
    /// Paths in both with the same fingerprint.
    pub unchanged: Vec<String>,
}

impl ManifestDiff {
    /// Compare `next` against an optional `previous` manifest.
    ///
    /// Without a previous manifest every path counts as added.
    pub fn between(previous: Option<&ResourceManifest>, next: &ResourceManifest) -> Self {
        let mut diff = Self::default();

        let Some(previous) = previous else {
            diff.added = next.paths().map(String::from).collect();
            return diff;
        };

        for (path, fingerprint) in next.iter() {
            match previous.fingerprint(path) {
                None => diff.added.push(path.to_string()),
                Some(old) if old == fingerprint => diff.unchanged.push(path.to_string()),
                Some(_) => diff.changed.push(path.to_string()),
            }
        }

        diff.removed = previous
            .paths()
            .filter(|p| !next.contains(p))
            .map(String::from)
            .collect();

        diff
    }

    /// Paths whose cached copies an incremental activation evicts.
    pub fn evicted(&self) -> impl Iterator<Item = &str> {
        self.changed
            .iter()
            .chain(self.removed.iter())
            .map(|s| s.as_str())
    }

    /// Check whether the manifests are identical.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn previous() -> ResourceManifest {
        ResourceManifest::new()
            .with("/", "r1")
            .with("main.dart.js", "m1")
            .with("assets/old.png", "o1")
            .with("assets/logo.png", "l1")
    }

    fn next() -> ResourceManifest {
        ResourceManifest::new()
            .with("/", "r1")
            .with("main.dart.js", "m2")
            .with("assets/logo.png", "l1")
            .with("assets/new.png", "n1")
    }

    #[test]
    fn test_should_evict() {
        let (prev, next) = (previous(), next());

        assert!(!should_evict("/", &prev, &next));
        assert!(!should_evict("assets/logo.png", &prev, &next));
        assert!(should_evict("main.dart.js", &prev, &next));
        assert!(should_evict("assets/old.png", &prev, &next));
        // Cached but never recorded: no basis to trust it.
        assert!(should_evict("assets/new.png", &prev, &next));
        assert!(should_evict("unknown.js", &prev, &next));
    }

    #[test]
    fn test_diff_between() {
        let diff = ManifestDiff::between(Some(&previous()), &next());

        assert_eq!(diff.added, vec!["assets/new.png"]);
        assert_eq!(diff.changed, vec!["main.dart.js"]);
        assert_eq!(diff.removed, vec!["assets/old.png"]);
        assert_eq!(diff.unchanged, vec!["/", "assets/logo.png"]);

        let evicted: Vec<&str> = diff.evicted().collect();
        assert_eq!(evicted, vec!["main.dart.js", "assets/old.png"]);
        assert!(!diff.is_empty());
    }

    #[test]
    fn test_diff_without_previous() {
        let diff = ManifestDiff::between(None, &next());

        assert_eq!(diff.added.len(), 4);
        assert!(diff.unchanged.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_diff_identical() {
        let diff = ManifestDiff::between(Some(&next()), &next());
        assert!(diff.is_empty());
        assert_eq!(diff.unchanged.len(), 4);
    }
}
