//! The cache controller.

use std::sync::{Arc, Mutex, PoisonError};

use shell_cache::{CacheStatus, CacheStore};
use shell_core::{
    CacheKey, FetchRequest, FetchResponse, LifecycleState, PartitionNames, WorkerConfig,
};

use crate::error::WorkerError;
use crate::headers::tag_status;
use crate::host::HostRuntime;
use crate::message::ControlMessage;
use crate::network::{Network, NetworkError};
use crate::strategy::Strategy;

/// Result of intercepting one request.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The controller takes no action; the host handles the request.
    Passthrough,
    /// A response to deliver to the page.
    Response(FetchResponse),
    /// A total failure to propagate to the page.
    Failed(NetworkError),
}

impl FetchOutcome {
    /// Whether the controller declined to handle the request.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough)
    }

    /// The response, if one was produced.
    pub fn into_response(self) -> Option<FetchResponse> {
        match self {
            Self::Response(response) => Some(response),
            _ => None,
        }
    }
}

/// Resolves intercepted requests from named cache partitions or the
/// network, precaches the app shell at install, and prunes prior-version
/// partitions at activation.
///
/// Storage, network, and host runtime are injected so the controller runs
/// against real backends in an adapter and against fakes in tests.
pub struct CacheController {
    config: WorkerConfig,
    names: PartitionNames,
    store: Arc<dyn CacheStore>,
    network: Arc<dyn Network>,
    host: Arc<dyn HostRuntime>,
    state: Mutex<LifecycleState>,
}

impl CacheController {
    /// Create a controller in the `Installing` state.
    pub fn new(
        config: WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn Network>,
        host: Arc<dyn HostRuntime>,
    ) -> Self {
        let names = config.partition_names();
        Self {
            config,
            names,
            store,
            network,
            host,
            state: Mutex::new(LifecycleState::Installing),
        }
    }

    /// Re-create a controller for an already-installed version, as when
    /// the host restarts the worker. Starts active; no install or
    /// activation runs.
    pub fn resume(
        config: WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn Network>,
        host: Arc<dyn HostRuntime>,
    ) -> Self {
        let names = config.partition_names();
        Self {
            config,
            names,
            store,
            network,
            host,
            state: Mutex::new(LifecycleState::Active),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Partition names for this controller's version.
    pub fn partition_names(&self) -> &PartitionNames {
        &self.names
    }

    fn set_state(&self, to: LifecycleState) -> Result<(), WorkerError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = state.transition(to)?;
        Ok(())
    }

    /// Handle the install event: precache both manifests and open the api
    /// partition, all concurrently. Install succeeds only when all three
    /// settle; any single manifest URL failure fails it.
    pub async fn on_install(&self) -> Result<(), WorkerError> {
        tracing::info!(version = %self.config.version, "install started");

        match self.install_partitions().await {
            Ok(()) => {
                // Eager activation: skip the wait for prior-version pages.
                self.host.skip_waiting().await;
                self.set_state(LifecycleState::Waiting)?;
                tracing::info!(
                    version = %self.config.version,
                    shell = self.config.app_shell.len(),
                    assets = self.config.static_assets.len(),
                    "install complete"
                );
                Ok(())
            }
            Err(err) => {
                self.set_state(LifecycleState::Redundant)?;
                Err(err)
            }
        }
    }

    async fn install_partitions(&self) -> Result<(), WorkerError> {
        let primary = self.precache(&self.names.primary, &self.config.app_shell);
        let statics = self.precache(&self.names.statics, &self.config.static_assets);
        let api = async {
            self.store
                .open(&self.names.api)
                .await
                .map_err(WorkerError::from)
        };

        futures::try_join!(primary, statics, api)?;
        Ok(())
    }

    async fn precache(&self, partition: &str, paths: &[String]) -> Result<(), WorkerError> {
        self.store.open(partition).await?;

        for path in paths {
            let url = self.config.resolve(path)?;
            let request = FetchRequest::get_url(url.clone());
            let response =
                self.network
                    .fetch(&request)
                    .await
                    .map_err(|err| WorkerError::Install {
                        url: url.to_string(),
                        reason: err.to_string(),
                    })?;

            if !response.is_ok() {
                return Err(WorkerError::Install {
                    url: url.to_string(),
                    reason: format!("unexpected status {}", response.status),
                });
            }

            self.store
                .put(partition, &request.cache_key(), response)
                .await?;
        }

        tracing::debug!(partition, count = paths.len(), "partition precached");
        Ok(())
    }

    /// Handle the activate event: delete every partition not belonging to
    /// this version, then claim all open pages. Pruning strictly precedes
    /// claiming.
    pub async fn on_activate(&self) -> Result<(), WorkerError> {
        let mut pruned = 0usize;
        for name in self.store.partition_names().await? {
            if !self.names.contains(&name) && self.store.delete_partition(&name).await? {
                tracing::info!(partition = %name, "stale partition deleted");
                pruned += 1;
            }
        }

        self.host.claim_clients().await;
        self.set_state(LifecycleState::Active)?;
        tracing::info!(version = %self.config.version, pruned, "activated");
        Ok(())
    }

    /// Handle a fetch event.
    ///
    /// Non-GET requests, non-http(s) schemes, and events arriving while the
    /// controller is not active pass through to default host handling.
    pub async fn on_fetch(&self, request: &FetchRequest) -> FetchOutcome {
        if !request.is_get() || !request.is_http() {
            return FetchOutcome::Passthrough;
        }
        if !self.state().can_intercept() {
            return FetchOutcome::Passthrough;
        }

        let strategy = Strategy::classify(request, &self.config);
        tracing::debug!(url = %request.url, %strategy, "fetch intercepted");

        match strategy {
            Strategy::CacheFirst => self.cache_first(request).await,
            Strategy::NetworkFirst => self.network_first(request).await,
        }
    }

    /// Handle a control message from a page. Unrecognized messages are
    /// silently ignored.
    pub async fn on_message(&self, message: ControlMessage) {
        match message {
            ControlMessage::SkipWaiting => {
                if self.state() == LifecycleState::Waiting {
                    tracing::info!("skip-waiting requested by client");
                    self.host.skip_waiting().await;
                }
            }
            ControlMessage::Unknown => {
                tracing::debug!("ignoring unrecognized control message");
            }
        }
    }

    async fn cache_first(&self, request: &FetchRequest) -> FetchOutcome {
        let key = request.cache_key();

        if let Some(cached) = self.lookup_any(&key).await {
            return FetchOutcome::Response(self.finish(cached, CacheStatus::Hit));
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.spawn_write(self.names.statics.clone(), key, response.clone());
                }
                FetchOutcome::Response(self.finish(response, CacheStatus::Network))
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "cache-first fetch failed");
                match self.lookup_any(&key).await {
                    Some(cached) => FetchOutcome::Response(self.finish(cached, CacheStatus::Hit)),
                    None => FetchOutcome::Response(
                        self.finish(FetchResponse::service_unavailable(), CacheStatus::Miss),
                    ),
                }
            }
        }
    }

    async fn network_first(&self, request: &FetchRequest) -> FetchOutcome {
        let key = request.cache_key();

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.spawn_write(self.names.primary.clone(), key, response.clone());
                }
                FetchOutcome::Response(self.finish(response, CacheStatus::Network))
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "network-first fetch failed");

                if let Some(cached) = self.lookup_any(&key).await {
                    return FetchOutcome::Response(self.finish(cached, CacheStatus::Hit));
                }

                if request.is_navigation() {
                    if let Some(fallback) = self.offline_fallback(request).await {
                        return FetchOutcome::Response(
                            self.finish(fallback, CacheStatus::Fallback),
                        );
                    }
                }

                FetchOutcome::Failed(err)
            }
        }
    }

    /// Cached copy of the offline fallback document, resolved against the
    /// request's own origin.
    async fn offline_fallback(&self, request: &FetchRequest) -> Option<FetchResponse> {
        let url = request.url.join(&self.config.offline_fallback).ok()?;
        let key = FetchRequest::get_url(url).cache_key();
        self.lookup_any(&key).await
    }

    async fn lookup_any(&self, key: &CacheKey) -> Option<FetchResponse> {
        match self.store.lookup_any(key).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "cache lookup failed");
                None
            }
        }
    }

    /// Fire-and-forget cache write. A failure is logged and never joins
    /// the response path.
    fn spawn_write(&self, partition: String, key: CacheKey, response: FetchResponse) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.put(&partition, &key, response).await {
                tracing::warn!(partition = %partition, key = %key, error = %err, "cache write failed");
            }
        });
    }

    fn finish(&self, response: FetchResponse, status: CacheStatus) -> FetchResponse {
        tracing::debug!(%status, "fetch resolved");
        if self.config.debug_headers {
            tag_status(response, status)
        } else {
            response
        }
    }
}
