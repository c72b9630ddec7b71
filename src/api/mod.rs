//! API Module
//!
//! Host integration for the offline worker: admin endpoints that deliver
//! lifecycle events, and a catch-all route that sends every other request
//! through fetch interception.
//!
//! # Endpoints
//! - `POST /_sw/install` - Deliver the install event
//! - `POST /_sw/activate` - Deliver the activate event
//! - `POST /_sw/sync` - Deliver a background sync event
//! - `POST /_sw/push` - Deliver a push message
//! - `POST /_sw/notificationclick` - Deliver a notification click
//! - `GET /_sw/state`, `/_sw/caches`, `/_sw/stats`, `/_sw/notifications`, `/_sw/health`

pub mod handlers;
pub mod proxy;
pub mod routes;

pub use handlers::*;
pub use proxy::proxy_handler;
pub use routes::create_router;
