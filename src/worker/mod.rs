//! Offline Cache Worker
//!
//! Reacts to lifecycle events delivered by its host:
//! - `install` - Cache same-origin static assets, then skip waiting
//! - `activate` - Delete every region except the current version, then claim clients
//! - `fetch` - Cache-first with network fallback for intercepted GETs
//! - `sync`, `push`, `notification_click` - Placeholder hooks
//!
//! The host awaits each returned future; that await is what keeps the work
//! alive. The one exception is the cache write on a miss, which runs as a
//! spawned task whose handle is handed back in [`FetchOutcome::Network`].

mod filter;
mod host;
mod lifecycle;

pub use filter::{is_root_document, InterceptFilter};
pub use host::{ClientHost, InProcessHost, Notification};
pub use lifecycle::LifecycleState;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use crate::cache::{RequestKey, SharedStorage};
use crate::config::Config;
use crate::error::{Result, WorkerError};
use crate::network::{FetchRequest, FetchResponse, Network};
use crate::tasks::spawn_cache_write;

/// Sync tag that triggers the outbox placeholder.
pub const BACKGROUND_SYNC_TAG: &str = "background-sync";

/// Cached document served when the root page cannot be fetched.
const ROOT_DOCUMENT: &str = "/index.html";

// == Fetch Outcome ==
/// Result of offering a request to the worker.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Not intercepted; the host sends the request as-is
    Passthrough,
    /// Served from a cache region, no network request issued
    Cache(FetchResponse),
    /// Served from the network. `cache_write` is set when a copy is being stored.
    Network {
        response: FetchResponse,
        cache_write: Option<JoinHandle<()>>,
    },
    /// Network failed for the root document; whatever is cached for it, if anything
    Fallback(Option<FetchResponse>),
}

// == Sync Outcome ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The background-sync placeholder ran
    Handled,
    /// Unknown tag, nothing ran
    Ignored,
}

// == Offline Worker ==
/// The offline cache interceptor for one worker version.
pub struct OfflineWorker {
    cache_name: String,
    origin: Url,
    static_assets: Vec<String>,
    filter: InterceptFilter,
    await_cache_writes: bool,
    storage: SharedStorage,
    network: Arc<dyn Network>,
    host: Arc<dyn ClientHost>,
    state: RwLock<LifecycleState>,
    /// Serialises installs; an activated worker stays `Activated` while refreshing
    install_lock: Mutex<()>,
}

impl OfflineWorker {
    // == Constructor ==
    /// Creates a worker in the `Parsed` state.
    ///
    /// # Arguments
    /// * `config` - Version string, origin, asset list and filter settings
    /// * `storage` - Cache storage shared with any other worker version
    /// * `network` - Outbound network
    /// * `host` - Client host receiving skip-waiting, claim, and notification calls
    pub fn new(
        config: &Config,
        storage: SharedStorage,
        network: Arc<dyn Network>,
        host: Arc<dyn ClientHost>,
    ) -> Result<Self> {
        let origin = Url::parse(&config.app_origin).map_err(|e| {
            WorkerError::InvalidRequest(format!("bad origin {}: {e}", config.app_origin))
        })?;

        Ok(Self {
            cache_name: config.cache_version.clone(),
            origin,
            static_assets: config.same_origin_assets().map(str::to_string).collect(),
            filter: InterceptFilter::new(config.realtime_markers.clone()),
            await_cache_writes: config.await_cache_writes,
            storage,
            network,
            host,
            state: RwLock::new(LifecycleState::Parsed),
            install_lock: Mutex::new(()),
        })
    }

    /// Name of the region this version owns.
    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }

    /// Resolves a path or URL against the app origin.
    pub fn resolve(&self, path: &str) -> Result<String> {
        self.origin
            .join(path)
            .map(String::from)
            .map_err(|e| WorkerError::InvalidRequest(format!("{path}: {e}")))
    }

    // == Install ==
    /// Opens the region and caches every same-origin static asset.
    ///
    /// All assets are fetched before anything is written; one failure aborts
    /// the install and leaves the region untouched. A first install that fails
    /// marks this version redundant. Re-installing an installed or activated
    /// worker refreshes the assets; an activated worker keeps intercepting
    /// while that runs and stays activated whether or not the refresh succeeds.
    pub async fn install(&self) -> Result<()> {
        let _install = self.install_lock.lock().await;

        let previous = {
            let mut state = self.state.write().await;
            if !state.can_install() {
                return Err(WorkerError::TransitionInProgress(*state));
            }
            let previous = *state;
            if previous != LifecycleState::Activated {
                *state = LifecycleState::Installing;
            }
            previous
        };

        info!("Installing worker {}", self.cache_name);

        let result = match self.cache_static_assets().await {
            Ok(count) => self.host.skip_waiting().await.map(|_| count),
            Err(e) => Err(e),
        };

        let (next, outcome) = match result {
            Ok(count) => {
                info!("Cached {} static assets", count);
                let next = if previous == LifecycleState::Activated {
                    LifecycleState::Activated
                } else {
                    LifecycleState::Installed
                };
                (next, Ok(()))
            }
            Err(e) => {
                warn!("Install failed: {}", e);
                let next = match previous {
                    LifecycleState::Installed | LifecycleState::Activated => previous,
                    _ => LifecycleState::Redundant,
                };
                (next, Err(e))
            }
        };

        *self.state.write().await = next;
        outcome
    }

    async fn cache_static_assets(&self) -> Result<usize> {
        self.storage.write().await.open(&self.cache_name);

        let mut fetched = Vec::with_capacity(self.static_assets.len());
        for asset in &self.static_assets {
            let request = FetchRequest::get(self.resolve(asset)?);
            let response = self
                .network
                .fetch(&request)
                .await
                .map_err(|e| WorkerError::InstallFailed(format!("{asset}: {e}")))?;

            if !response.ok() {
                return Err(WorkerError::InstallFailed(format!(
                    "{asset}: status {}",
                    response.status
                )));
            }
            fetched.push((request.key(), response));
        }

        let count = fetched.len();
        self.storage.write().await.put_all(&self.cache_name, fetched);
        Ok(count)
    }

    // == Activate ==
    /// Deletes every region but the current one and claims clients.
    ///
    /// Returns the names of the deleted regions.
    pub async fn activate(&self) -> Result<Vec<String>> {
        {
            let mut state = self.state.write().await;
            if !state.can_activate() {
                return Err(WorkerError::InvalidState {
                    expected: LifecycleState::Installed,
                    actual: *state,
                });
            }
            *state = LifecycleState::Activating;
        }

        info!("Activating worker {}", self.cache_name);

        let deleted = {
            let mut storage = self.storage.write().await;
            let stale: Vec<String> = storage
                .keys()
                .into_iter()
                .filter(|name| name != &self.cache_name)
                .collect();
            for name in &stale {
                info!("Deleting old cache: {}", name);
                storage.delete(name);
            }
            stale
        };

        if let Err(e) = self.host.claim_clients().await {
            *self.state.write().await = LifecycleState::Installed;
            return Err(e);
        }

        *self.state.write().await = LifecycleState::Activated;
        Ok(deleted)
    }

    // == Fetch ==
    /// Applies the cache-first policy to an outgoing request.
    ///
    /// Requests that are not GET, not HTTP(S), or aimed at the realtime
    /// endpoint come back as [`FetchOutcome::Passthrough`], as does everything
    /// before activation. A network failure is returned as an error unless
    /// the URL is a root document, in which case the cached `/index.html` is
    /// returned instead.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchOutcome> {
        if !self.state().await.can_intercept_fetch() || !self.filter.should_intercept(request) {
            return Ok(FetchOutcome::Passthrough);
        }

        let key = request.key();
        let cached = self.storage.write().await.match_request(&key);
        if let Some(response) = cached {
            debug!("Serving from cache: {}", request.url);
            return Ok(FetchOutcome::Cache(response));
        }

        debug!("Fetching from network: {}", request.url);
        match self.network.fetch(request).await {
            Ok(response) => {
                if !response.is_cacheable() {
                    return Ok(FetchOutcome::Network {
                        response,
                        cache_write: None,
                    });
                }

                let handle = spawn_cache_write(
                    self.storage.clone(),
                    self.cache_name.clone(),
                    key,
                    response.clone(),
                );

                if self.await_cache_writes {
                    // Failures are logged by the write task itself.
                    let _ = handle.await;
                    return Ok(FetchOutcome::Network {
                        response,
                        cache_write: None,
                    });
                }

                Ok(FetchOutcome::Network {
                    response,
                    cache_write: Some(handle),
                })
            }
            Err(e) => {
                debug!("Fetch failed, trying cache: {}", e);
                if !is_root_document(&request.url) {
                    return Err(e);
                }

                let root = RequestKey::get(self.resolve(ROOT_DOCUMENT)?);
                let mut storage = self.storage.write().await;
                let fallback = storage.match_request(&root);
                if fallback.is_some() {
                    storage.record_fallback();
                }
                Ok(FetchOutcome::Fallback(fallback))
            }
        }
    }

    // == Sync ==
    /// Background sync hook. Only `background-sync` does anything, and that
    /// is currently a no-op.
    pub async fn sync(&self, tag: &str) -> Result<SyncOutcome> {
        info!("Background sync triggered: {}", tag);
        if tag != BACKGROUND_SYNC_TAG {
            return Ok(SyncOutcome::Ignored);
        }
        self.drain_outbox().await?;
        Ok(SyncOutcome::Handled)
    }

    // TODO: send messages queued while offline once the client persists an outbox.
    async fn drain_outbox(&self) -> Result<()> {
        debug!("Handling background sync");
        Ok(())
    }

    // == Push ==
    /// Shows the fixed new-message notification. The payload is ignored.
    pub async fn push(&self, _payload: &[u8]) -> Result<Notification> {
        info!("Push message received");
        let notification = Notification::new_message();
        self.host.show_notification(notification.clone()).await?;
        Ok(notification)
    }

    // == Notification Click ==
    /// Closes the clicked notification and opens (or focuses) the root window.
    pub async fn notification_click(&self, tag: &str) -> Result<()> {
        info!("Notification clicked");
        self.host.close_notification(tag).await?;
        self.host.open_window(&self.resolve("/")?).await
    }
}
