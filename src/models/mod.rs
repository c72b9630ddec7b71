//! Request and Response models for the worker admin API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{NotificationClickRequest, SyncRequest};
pub use responses::{
    ActivateResponse, CachedEntrySummary, CachesResponse, ErrorResponse, HealthResponse,
    LifecycleResponse, StatsResponse, SyncResponse,
};
