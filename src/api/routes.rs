//! API Routes
//!
//! Configures the Axum router: admin endpoints under `/_sw`, everything else
//! through the worker.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    activate_handler, caches_handler, health_handler, install_handler,
    notification_click_handler, notifications_handler, push_handler, state_handler,
    stats_handler, sync_handler, AppState,
};
use super::proxy::proxy_handler;

/// Creates the main router.
///
/// # Endpoints
/// - `POST /_sw/install`, `POST /_sw/activate` - Lifecycle events
/// - `POST /_sw/sync`, `POST /_sw/push`, `POST /_sw/notificationclick` - Hooks
/// - `GET /_sw/state`, `/_sw/caches`, `/_sw/stats`, `/_sw/notifications`, `/_sw/health`
/// - Anything else - Fetch interception
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/_sw/install", post(install_handler))
        .route("/_sw/activate", post(activate_handler))
        .route("/_sw/sync", post(sync_handler))
        .route("/_sw/push", post(push_handler))
        .route("/_sw/notificationclick", post(notification_click_handler))
        .route("/_sw/notifications", get(notifications_handler))
        .route("/_sw/state", get(state_handler))
        .route("/_sw/caches", get(caches_handler))
        .route("/_sw/stats", get(stats_handler))
        .route("/_sw/health", get(health_handler))
        .fallback(proxy_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
