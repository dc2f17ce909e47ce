//! Request serving: cache-first for resources, online-first for the root
//! document.

use http::Method;
use precache_core::ROOT_PATH;
use precache_store::{Cache, CacheStorage, CachedResponse, RequestKey};
use tracing::{debug, warn};

use crate::error::WorkerResult;
use crate::host::WorkerHost;
use crate::network::{Fetch, FetchRequest};
use crate::reconciler::Reconciler;

/// Where a served response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedFrom {
    Network,
    Cache,
}

/// What the fetch hook decided for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchDisposition {
    /// Not intercepted; the host handles the request normally.
    Passthrough,
    /// Intercepted and answered.
    Respond {
        response: CachedResponse,
        source: ServedFrom,
    },
}

impl FetchDisposition {
    fn respond(response: CachedResponse, source: ServedFrom) -> Self {
        Self::Respond { response, source }
    }

    /// The response, if the request was intercepted.
    pub fn into_response(self) -> Option<CachedResponse> {
        match self {
            Self::Passthrough => None,
            Self::Respond { response, .. } => Some(response),
        }
    }

    /// Source of the response, if the request was intercepted.
    pub fn source(&self) -> Option<ServedFrom> {
        match self {
            Self::Passthrough => None,
            Self::Respond { source, .. } => Some(*source),
        }
    }
}

impl<S, F, H> Reconciler<S, F, H>
where
    S: CacheStorage,
    F: Fetch,
    H: WorkerHost,
{
    /// Fetch hook.
    ///
    /// Only GET requests for known resources are intercepted. Entries are
    /// stored under the canonical URL of the resolved path, so `?v=` variants
    /// share one entry.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> WorkerResult<FetchDisposition> {
        if request.method != Method::GET {
            return Ok(FetchDisposition::Passthrough);
        }

        let Some(path) = self.scope.resolve_request(&request.url) else {
            return Ok(FetchDisposition::Passthrough);
        };
        if !self.bundle.resources.contains(&path) {
            return Ok(FetchDisposition::Passthrough);
        }

        let key = RequestKey::new(self.scope.request_url(&path));
        if path == ROOT_PATH {
            self.online_first(request, &key).await
        } else {
            self.cache_first(request, &key).await
        }
    }

    async fn cache_first(
        &self,
        request: &FetchRequest,
        key: &RequestKey,
    ) -> WorkerResult<FetchDisposition> {
        let content = self.storage.open(&self.partitions.content).await?;
        if let Some(cached) = content.get(key).await? {
            return Ok(FetchDisposition::respond(cached, ServedFrom::Cache));
        }

        let response = self.network.fetch(request).await?;
        if response.is_ok() {
            if let Err(err) = content.put(key, response.clone()).await {
                warn!(url = %key, error = %err, "Failed to cache fetched resource");
            }
        } else {
            debug!(url = %key, status = %response.status, "Not caching unsuccessful response");
        }

        Ok(FetchDisposition::respond(response, ServedFrom::Network))
    }

    async fn online_first(
        &self,
        request: &FetchRequest,
        key: &RequestKey,
    ) -> WorkerResult<FetchDisposition> {
        match self.network.fetch(request).await {
            Ok(response) => {
                self.store_live(key, response.clone()).await;
                Ok(FetchDisposition::respond(response, ServedFrom::Network))
            }
            Err(fetch_err) => {
                debug!(url = %key, error = %fetch_err, "Network failed, falling back to cache");
                match self.cached(key).await {
                    Ok(Some(cached)) => Ok(FetchDisposition::respond(cached, ServedFrom::Cache)),
                    Ok(None) => Err(fetch_err.into()),
                    Err(store_err) => {
                        warn!(url = %key, error = %store_err, "Cache fallback unavailable");
                        Err(fetch_err.into())
                    }
                }
            }
        }
    }

    async fn store_live(&self, key: &RequestKey, response: CachedResponse) {
        let result = match self.storage.open(&self.partitions.content).await {
            Ok(content) => content.put(key, response).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            warn!(url = %key, error = %err, "Failed to refresh cached root document");
        }
    }

    async fn cached(&self, key: &RequestKey) -> WorkerResult<Option<CachedResponse>> {
        let content = self.storage.open(&self.partitions.content).await?;
        Ok(content.get(key).await?)
    }
}
