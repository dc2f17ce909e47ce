//! Install and activation: keeping the live partition in step with the
//! asset bundle across worker versions.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use precache_core::{should_evict, AssetBundle, PartitionConfig, ResourceManifest, WorkerScope};
use precache_store::{Cache, CacheStorage, CachedResponse, RequestKey};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::{WorkerError, WorkerResult};
use crate::host::WorkerHost;
use crate::message::{UnknownMessage, WorkerMessage};
use crate::network::{CacheMode, Fetch, FetchRequest};
use crate::report::{ActivationMode, ActivationReport, InstallReport};

/// Owner of the content, staging and manifest partitions.
///
/// Only the reconciler writes these partitions. Activations are serialized;
/// request serving may run concurrently with anything.
pub struct Reconciler<S, F, H> {
    pub(crate) storage: S,
    pub(crate) network: F,
    host: H,
    pub(crate) scope: WorkerScope,
    pub(crate) partitions: PartitionConfig,
    pub(crate) bundle: AssetBundle,
    activation: Mutex<()>,
}

impl<S, F, H> Reconciler<S, F, H>
where
    S: CacheStorage,
    F: Fetch,
    H: WorkerHost,
{
    /// Create a reconciler with the default partition names.
    pub fn new(storage: S, network: F, host: H, scope: WorkerScope, bundle: AssetBundle) -> Self {
        Self {
            storage,
            network,
            host,
            scope,
            partitions: PartitionConfig::default(),
            bundle,
            activation: Mutex::new(()),
        }
    }

    /// Use custom partition names.
    pub fn with_partitions(mut self, partitions: PartitionConfig) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn network(&self) -> &F {
        &self.network
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn scope(&self) -> &WorkerScope {
        &self.scope
    }

    pub fn partitions(&self) -> &PartitionConfig {
        &self.partitions
    }

    pub fn bundle(&self) -> &AssetBundle {
        &self.bundle
    }

    /// Install hook: stage a fresh copy of every shell file.
    ///
    /// Shell files are fetched bypassing intermediate caches. Staging is
    /// all-or-nothing; on failure nothing new is stored and the previous
    /// version stays installed.
    pub async fn install(&self) -> WorkerResult<InstallReport> {
        self.host.skip_waiting();

        let temp = self.storage.open(&self.partitions.temp).await?;
        let requests = self
            .bundle
            .core
            .iter()
            .map(|path| {
                FetchRequest::get(self.scope.request_url(path)).with_cache_mode(CacheMode::Reload)
            })
            .collect();

        let fetched = self.add_all(&temp, requests).await?;
        info!(fetched, partition = %self.partitions.temp, "Staged shell files");

        Ok(InstallReport { fetched })
    }

    /// Activate hook: reconcile the live partition with the bundle.
    ///
    /// On any failure all three partitions are deleted, so the next
    /// activation rebuilds from scratch, and the cause is returned wrapped in
    /// [`WorkerError::Activation`].
    pub async fn activate(&self) -> WorkerResult<ActivationReport> {
        let _guard = self.activation.lock().await;
        let started = Instant::now();

        match self.reconcile().await {
            Ok(mut report) => {
                report.elapsed = started.elapsed();
                info!(
                    mode = ?report.mode,
                    evicted = report.evicted.len(),
                    retained = report.retained,
                    promoted = report.promoted,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    "Activated"
                );
                Ok(report)
            }
            Err(err) => {
                error!(error = %err, "Failed to upgrade worker caches, clearing all partitions");
                self.clear_partitions().await;
                Err(WorkerError::Activation(Box::new(err)))
            }
        }
    }

    async fn reconcile(&self) -> WorkerResult<ActivationReport> {
        let mut content = self.storage.open(&self.partitions.content).await?;
        let temp = self.storage.open(&self.partitions.temp).await?;
        let manifest = self.storage.open(&self.partitions.manifest).await?;

        let (mode, evicted, retained) = match self.read_manifest(&manifest).await? {
            None => {
                // Leftovers from an interrupted or unknown version cannot be
                // diffed against anything.
                self.storage.delete(&self.partitions.content).await?;
                content = self.storage.open(&self.partitions.content).await?;
                (ActivationMode::Fresh, Vec::new(), 0)
            }
            Some(previous) => {
                let (evicted, retained) = self.evict_stale(&content, &previous).await?;
                (ActivationMode::Incremental, evicted, retained)
            }
        };

        // Staged shell files always win over retained copies.
        let promoted = copy_entries(&temp, &content).await?;
        self.storage.delete(&self.partitions.temp).await?;

        self.write_manifest(&manifest).await?;
        self.host.claim_clients();

        Ok(ActivationReport {
            mode,
            evicted,
            retained,
            promoted,
            elapsed: Duration::ZERO,
        })
    }

    async fn evict_stale<C: Cache>(
        &self,
        content: &C,
        previous: &ResourceManifest,
    ) -> WorkerResult<(Vec<String>, usize)> {
        let mut evicted = Vec::new();
        let mut retained = 0;

        for key in content.keys().await? {
            let stale = match self.scope.cache_path(key.as_str()) {
                Some(path) => should_evict(&path, previous, &self.bundle.resources),
                None => true,
            };

            if stale {
                debug!(url = %key, "Evicting stale entry");
                content.delete(&key).await?;
                evicted.push(key.to_string());
            } else {
                retained += 1;
            }
        }

        Ok((evicted, retained))
    }

    fn manifest_key(&self) -> RequestKey {
        RequestKey::new(self.scope.request_url(&self.partitions.manifest_key))
    }

    async fn read_manifest<C: Cache>(&self, manifest: &C) -> WorkerResult<Option<ResourceManifest>> {
        let Some(record) = manifest.get(&self.manifest_key()).await? else {
            return Ok(None);
        };

        match ResourceManifest::from_json(&record.text()) {
            Ok(previous) => Ok(Some(previous)),
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable manifest record");
                Ok(None)
            }
        }
    }

    async fn write_manifest<C: Cache>(&self, manifest: &C) -> WorkerResult<()> {
        let record = CachedResponse::ok(self.bundle.resources.to_json()?)
            .with_header("content-type", "application/json");
        manifest.put(&self.manifest_key(), record).await?;
        Ok(())
    }

    async fn clear_partitions(&self) {
        for name in self.partitions.names() {
            if let Err(err) = self.storage.delete(name).await {
                warn!(partition = name, error = %err, "Failed to delete partition");
            }
        }
    }

    /// Fetch every request and store the responses, or store nothing.
    ///
    /// Fails if any fetch fails or any response is not 2xx.
    async fn add_all<C: Cache>(&self, cache: &C, requests: Vec<FetchRequest>) -> WorkerResult<usize> {
        let responses =
            try_join_all(requests.iter().map(|request| self.network.fetch(request))).await?;

        if let Some((request, response)) = requests
            .iter()
            .zip(&responses)
            .find(|(_, response)| !response.is_ok())
        {
            return Err(WorkerError::BadStatus {
                url: request.url.clone(),
                status: response.status,
            });
        }

        let count = responses.len();
        for (request, response) in requests.into_iter().zip(responses) {
            cache.put(&RequestKey::new(request.url), response).await?;
        }

        Ok(count)
    }

    /// Fetch every resource missing from the live partition.
    ///
    /// Returns the number of resources downloaded.
    pub async fn download_offline(&self) -> WorkerResult<usize> {
        let content = self.storage.open(&self.partitions.content).await?;

        let present: HashSet<String> = content
            .keys()
            .await?
            .iter()
            .filter_map(|key| self.scope.cache_path(key.as_str()))
            .collect();

        let missing: Vec<FetchRequest> = self
            .bundle
            .resources
            .paths()
            .filter(|path| !present.contains(*path))
            .map(|path| FetchRequest::get(self.scope.request_url(path)))
            .collect();

        if missing.is_empty() {
            debug!("All resources already available offline");
            return Ok(0);
        }

        let downloaded = self.add_all(&content, missing).await?;
        info!(downloaded, "Downloaded resources for offline use");
        Ok(downloaded)
    }

    /// Promote this version immediately. Clients must reload to use it.
    pub fn skip_waiting(&self) {
        self.host.skip_waiting();
    }

    /// Message hook.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResult<()> {
        debug!(%message, "Received message");
        match message {
            WorkerMessage::SkipWaiting => {
                self.skip_waiting();
                Ok(())
            }
            WorkerMessage::DownloadOffline => self.download_offline().await.map(|_| ()),
        }
    }

    /// Message hook for raw payloads; unrecognized payloads are ignored.
    pub async fn handle_raw_message(&self, payload: &str) -> WorkerResult<()> {
        match payload.parse::<WorkerMessage>() {
            Ok(message) => self.handle_message(message).await,
            Err(UnknownMessage(other)) => {
                debug!(payload = %other, "Ignoring unknown message");
                Ok(())
            }
        }
    }
}

async fn copy_entries<A: Cache, B: Cache>(from: &A, to: &B) -> WorkerResult<usize> {
    let mut copied = 0;
    for key in from.keys().await? {
        if let Some(response) = from.get(&key).await? {
            to.put(&key, response).await?;
            copied += 1;
        }
    }
    Ok(copied)
}
