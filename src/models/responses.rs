//! Response DTOs for the worker admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheEntry, CacheStats, RequestKey};
use crate::worker::LifecycleState;

/// Response body for GET /_sw/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub fallbacks: u64,
    pub regions: usize,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stores: stats.stores,
            fallbacks: stats.fallbacks,
            regions: stats.regions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for lifecycle endpoints (install, state, notificationclick)
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleResponse {
    /// Worker state after the event
    pub state: LifecycleState,
    /// Region owned by this worker
    pub cache: String,
}

impl LifecycleResponse {
    pub fn new(state: LifecycleState, cache: impl Into<String>) -> Self {
        Self {
            state,
            cache: cache.into(),
        }
    }
}

/// Response body for POST /_sw/activate
#[derive(Debug, Clone, Serialize)]
pub struct ActivateResponse {
    pub state: LifecycleState,
    /// Regions deleted during activation
    pub deleted: Vec<String>,
}

/// Response body for GET /_sw/caches
#[derive(Debug, Clone, Serialize)]
pub struct CachesResponse {
    /// Region owned by this worker
    pub current: String,
    /// Every region present
    pub regions: Vec<String>,
    /// Every stored entry, ordered by region then URL
    pub entries: Vec<CachedEntrySummary>,
}

/// One stored entry as listed by GET /_sw/caches
#[derive(Debug, Clone, Serialize)]
pub struct CachedEntrySummary {
    pub region: String,
    pub method: String,
    pub url: String,
    pub status: u16,
    /// Write time in ISO 8601 format
    pub stored_at: String,
    /// Milliseconds since the write
    pub age_ms: i64,
}

impl CachedEntrySummary {
    pub fn new(region: &str, key: &RequestKey, entry: &CacheEntry) -> Self {
        Self {
            region: region.to_string(),
            method: key.method.to_string(),
            url: key.url.clone(),
            status: entry.response.status.as_u16(),
            stored_at: entry.stored_at.to_rfc3339(),
            age_ms: entry.age_ms(),
        }
    }
}

/// Response body for POST /_sw/sync
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    pub tag: String,
    /// Whether the tag triggered any work
    pub handled: bool,
}

/// Response body for GET /_sw/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Worker lifecycle state
    pub worker: LifecycleState,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(worker: LifecycleState) -> Self {
        Self {
            status: "healthy".to_string(),
            worker,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
