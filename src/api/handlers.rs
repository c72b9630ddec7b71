//! API Handlers
//!
//! Admin endpoints that deliver lifecycle events to the worker and expose
//! its cache state.

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Bytes, extract::State, Json};

use crate::cache::CacheStorage;
use crate::config::Config;
use crate::error::{Result, WorkerError};
use crate::models::{
    ActivateResponse, CachedEntrySummary, CachesResponse, HealthResponse, LifecycleResponse,
    NotificationClickRequest, StatsResponse, SyncRequest, SyncResponse,
};
use crate::network::{HttpNetwork, Network};
use crate::worker::{InProcessHost, Notification, OfflineWorker, SyncOutcome};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The offline cache worker
    pub worker: Arc<OfflineWorker>,
    /// Network used for requests the worker passes through
    pub network: Arc<dyn Network>,
    /// Host recording notifications and windows
    pub host: Arc<InProcessHost>,
}

impl AppState {
    /// Creates a new AppState with fresh cache storage.
    pub fn new(config: &Config, network: Arc<dyn Network>, host: Arc<InProcessHost>) -> Result<Self> {
        let worker = OfflineWorker::new(config, CacheStorage::shared(), network.clone(), host.clone())?;
        Ok(Self {
            worker: Arc::new(worker),
            network,
            host,
        })
    }

    /// Creates a new AppState from configuration, backed by the real network.
    pub fn from_config(config: &Config) -> Result<Self> {
        let network = HttpNetwork::new(
            &config.app_origin,
            Duration::from_secs(config.network_timeout),
        )?;
        Self::new(config, Arc::new(network), Arc::new(InProcessHost::new()))
    }

    async fn lifecycle(&self) -> LifecycleResponse {
        LifecycleResponse::new(self.worker.state().await, self.worker.cache_name())
    }
}

/// Handler for POST /_sw/install
pub async fn install_handler(State(state): State<AppState>) -> Result<Json<LifecycleResponse>> {
    state.worker.install().await?;
    Ok(Json(state.lifecycle().await))
}

/// Handler for POST /_sw/activate
pub async fn activate_handler(State(state): State<AppState>) -> Result<Json<ActivateResponse>> {
    let deleted = state.worker.activate().await?;
    Ok(Json(ActivateResponse {
        state: state.worker.state().await,
        deleted,
    }))
}

/// Handler for GET /_sw/state
pub async fn state_handler(State(state): State<AppState>) -> Json<LifecycleResponse> {
    Json(state.lifecycle().await)
}

/// Handler for POST /_sw/sync
pub async fn sync_handler(
    State(state): State<AppState>,
    Json(req): Json<SyncRequest>,
) -> Result<Json<SyncResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(WorkerError::InvalidRequest(error_msg));
    }

    let outcome = state.worker.sync(&req.tag).await?;
    Ok(Json(SyncResponse {
        tag: req.tag,
        handled: outcome == SyncOutcome::Handled,
    }))
}

/// Handler for POST /_sw/push
///
/// The body is the push payload; it is accepted and ignored.
pub async fn push_handler(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<Json<Notification>> {
    let notification = state.worker.push(&payload).await?;
    Ok(Json(notification))
}

/// Handler for POST /_sw/notificationclick
pub async fn notification_click_handler(
    State(state): State<AppState>,
    Json(req): Json<NotificationClickRequest>,
) -> Result<Json<LifecycleResponse>> {
    state.worker.notification_click(&req.tag).await?;
    Ok(Json(state.lifecycle().await))
}

/// Handler for GET /_sw/notifications
pub async fn notifications_handler(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.host.notifications().await)
}

/// Handler for GET /_sw/caches
pub async fn caches_handler(State(state): State<AppState>) -> Json<CachesResponse> {
    let storage = state.worker.storage().read().await;
    let regions = storage.keys();

    let mut entries = Vec::new();
    for name in &regions {
        let Some(region) = storage.region(name) else {
            continue;
        };
        let mut keys: Vec<_> = region.keys().collect();
        keys.sort_by(|a, b| a.url.cmp(&b.url));
        for key in keys {
            if let Some(entry) = region.entry(key) {
                entries.push(CachedEntrySummary::new(name, key, entry));
            }
        }
    }

    Json(CachesResponse {
        current: state.worker.cache_name().to_string(),
        regions,
        entries,
    })
}

/// Handler for GET /_sw/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let stats = state.worker.storage().read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /_sw/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.worker.state().await))
}
