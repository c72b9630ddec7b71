//! Error types for the offline cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::worker::LifecycleState;

// == Worker Error Enum ==
/// Unified error type for the offline cache worker and its host.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Network request failed before a response was received
    #[error("Network error: {0}")]
    Network(String),

    /// A static asset could not be cached, install aborted
    #[error("Install failed: {0}")]
    InstallFailed(String),

    /// Lifecycle event delivered out of order
    #[error("Invalid state: expected {expected}, found {actual}")]
    InvalidState {
        expected: LifecycleState,
        actual: LifecycleState,
    },

    /// Install requested while another lifecycle transition is running
    #[error("Lifecycle transition in progress: worker is {0}")]
    TransitionInProgress(LifecycleState),

    /// Request could not be interpreted (bad URL, bad body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Root document requested offline and never cached
    #[error("Offline: {0}")]
    Offline(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        let status = match &self {
            WorkerError::Network(_) => StatusCode::BAD_GATEWAY,
            WorkerError::InstallFailed(_) => StatusCode::BAD_GATEWAY,
            WorkerError::InvalidState { .. } => StatusCode::CONFLICT,
            WorkerError::TransitionInProgress(_) => StatusCode::CONFLICT,
            WorkerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            WorkerError::Offline(_) => StatusCode::SERVICE_UNAVAILABLE,
            WorkerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the offline cache.
pub type Result<T> = std::result::Result<T, WorkerError>;
