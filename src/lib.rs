//! RetroChat Offline Cache
//!
//! Offline-first asset caching for the RetroChat web client: install-time
//! precaching, version-based invalidation, and cache-first request
//! interception with a network fallback.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod tasks;
pub mod worker;

pub use api::AppState;
pub use config::Config;
pub use worker::{FetchOutcome, OfflineWorker};
