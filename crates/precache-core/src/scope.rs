//! Worker scope: mapping between request URLs and logical resource paths.

use http::Uri;

use crate::error::{ConfigError, ConfigResult};
use crate::manifest::ROOT_PATH;

/// Query marker used by the application to bust intermediate caches.
const VERSION_QUERY: &str = "?v=";

/// The origin a worker is registered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerScope {
    origin: String,
}

impl WorkerScope {
    /// Create a scope from an absolute origin such as `https://app.example.com`.
    pub fn new(origin: impl Into<String>) -> ConfigResult<Self> {
        let raw = origin.into();
        let trimmed = raw.trim_end_matches('/');

        let uri: Uri = trimmed
            .parse()
            .map_err(|_| ConfigError::InvalidOrigin(raw.clone()))?;

        let scheme_ok = matches!(uri.scheme_str(), Some("http") | Some("https"));
        let path_ok = uri.path().is_empty() || uri.path() == "/";
        if !scheme_ok || uri.host().is_none() || !path_ok || uri.query().is_some() {
            return Err(ConfigError::InvalidOrigin(raw));
        }

        Ok(Self {
            origin: trimmed.to_string(),
        })
    }

    /// The origin, without a trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute request URL identifying a logical path.
    pub fn request_url(&self, path: &str) -> String {
        if path == ROOT_PATH {
            return format!("{}/", self.origin);
        }
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }

    /// Logical path of a stored request URL.
    ///
    /// Returns `None` for URLs outside this origin.
    pub fn cache_path(&self, url: &str) -> Option<String> {
        if url == self.origin {
            return Some(ROOT_PATH.to_string());
        }

        let rest = self.strip_origin(url)?;
        if rest.is_empty() {
            Some(ROOT_PATH.to_string())
        } else {
            Some(rest.to_string())
        }
    }

    /// Resolve an intercepted request URL to the resource path it asks for.
    ///
    /// The origin itself, fragment routes (`origin/#...`) and the empty path
    /// all resolve to the root document. A `?v=` suffix is dropped.
    pub fn resolve_request(&self, url: &str) -> Option<String> {
        if url == self.origin {
            return Some(ROOT_PATH.to_string());
        }

        let rest = self.strip_origin(url)?;
        if rest.starts_with('#') {
            return Some(ROOT_PATH.to_string());
        }

        let path = match rest.find(VERSION_QUERY) {
            Some(idx) => &rest[..idx],
            None => rest,
        };

        if path.is_empty() {
            Some(ROOT_PATH.to_string())
        } else {
            Some(path.to_string())
        }
    }

    fn strip_origin<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.origin.as_str())?.strip_prefix('/')
    }
}

impl std::fmt::Display for WorkerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.origin)
    }
}
