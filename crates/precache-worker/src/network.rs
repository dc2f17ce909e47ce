//! Network seam.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use http::{Method, StatusCode};
use precache_store::CachedResponse;

/// Error type for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// How a fetch interacts with intermediate HTTP caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Normal HTTP caching.
    #[default]
    Default,
    /// Bypass intermediate caches and refresh them with the result.
    Reload,
}

/// An outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Intermediate cache behavior.
    pub cache_mode: CacheMode,
}

impl FetchRequest {
    /// Create a request.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            cache_mode: CacheMode::Default,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Set the cache mode.
    pub fn with_cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }
}

/// Performs live network requests.
///
/// Timeouts and retries belong to the implementation; callers see a single
/// result per request.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Send a request. Non-2xx statuses are responses, not errors.
    async fn fetch(&self, request: &FetchRequest) -> Result<CachedResponse, FetchError>;
}

#[derive(Debug, Default)]
struct NetworkState {
    routes: HashMap<String, CachedResponse>,
    failing: HashSet<String>,
    offline: bool,
    log: Vec<FetchRequest>,
}

/// In-memory network with a fixed route table (for development/testing).
///
/// Unknown URLs answer `404`. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct StaticNetwork {
    state: Arc<Mutex<NetworkState>>,
}

impl StaticNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, NetworkState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Serve `response` for `url`.
    pub fn route(&self, url: impl Into<String>, response: CachedResponse) -> &Self {
        self.state().routes.insert(url.into(), response);
        self
    }

    /// Serve a `200 OK` with `body` for `url`.
    pub fn route_ok(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> &Self {
        self.route(url, CachedResponse::ok(body))
    }

    /// Make requests to `url` fail with a connection error.
    pub fn fail(&self, url: impl Into<String>) -> &Self {
        self.state().failing.insert(url.into());
        self
    }

    /// Toggle connectivity for every URL.
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.state().log.clone()
    }

    /// Number of requests seen for `url`.
    pub fn request_count(&self, url: &str) -> usize {
        self.state().log.iter().filter(|r| r.url == url).count()
    }

    /// Forget the request log.
    pub fn clear_requests(&self) {
        self.state().log.clear();
    }
}

#[async_trait]
impl Fetch for StaticNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<CachedResponse, FetchError> {
        let mut state = self.state();
        state.log.push(request.clone());

        if state.offline || state.failing.contains(&request.url) {
            return Err(FetchError::Connection(format!(
                "{} {} unreachable",
                request.method, request.url
            )));
        }

        Ok(state
            .routes
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| CachedResponse::new(StatusCode::NOT_FOUND, "")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_network_routes() {
        let network = StaticNetwork::new();
        network.route_ok("https://a.test/x", "x");

        let resp = network.fetch(&FetchRequest::get("https://a.test/x")).await.unwrap();
        assert_eq!(resp.text(), "x");

        let missing = network.fetch(&FetchRequest::get("https://a.test/y")).await.unwrap();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        assert_eq!(network.requests().len(), 2);
        assert_eq!(network.request_count("https://a.test/x"), 1);
    }

    #[tokio::test]
    async fn test_static_network_failures() {
        let network = StaticNetwork::new();
        network.route_ok("https://a.test/x", "x").fail("https://a.test/bad");

        assert!(network.fetch(&FetchRequest::get("https://a.test/bad")).await.is_err());

        network.set_offline(true);
        let err = network.fetch(&FetchRequest::get("https://a.test/x")).await.unwrap_err();
        assert!(matches!(err, FetchError::Connection(_)));

        // Failed requests are still logged.
        assert_eq!(network.requests().len(), 2);
        network.clear_requests();
        assert!(network.requests().is_empty());
    }

    #[test]
    fn test_fetch_request_builder() {
        let req = FetchRequest::get("https://a.test/").with_cache_mode(CacheMode::Reload);
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.cache_mode, CacheMode::Reload);
    }
}
