//! Integration Tests for the Offline Proxy
//!
//! Drives the full router: lifecycle events over the admin API, then client
//! requests through fetch interception against a scripted network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use retro_cache::{
    api::create_router,
    cache::RequestKey,
    error::{Result, WorkerError},
    network::{FetchRequest, FetchResponse, Network, ResponseType},
    worker::{InProcessHost, LifecycleState},
    AppState, Config,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:8080";

// == Scripted Network ==

#[derive(Default)]
struct ScriptedNetwork {
    routes: RwLock<HashMap<String, FetchResponse>>,
    log: RwLock<Vec<(Method, String, Vec<u8>)>>,
    offline: AtomicBool,
}

impl ScriptedNetwork {
    async fn serve(&self, path: &str, status: StatusCode, body: &'static str) {
        let url = format!("{ORIGIN}{path}");
        self.routes
            .write()
            .await
            .insert(url.clone(), FetchResponse::new(url, status, body));
    }

    async fn serve_response(&self, response: FetchResponse) {
        self.routes
            .write()
            .await
            .insert(response.url.clone(), response);
    }

    fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    async fn calls(&self) -> usize {
        self.log.read().await.len()
    }

    async fn last_call(&self) -> Option<(Method, String, Vec<u8>)> {
        self.log.read().await.last().cloned()
    }
}

#[async_trait]
impl Network for ScriptedNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        self.log.write().await.push((
            request.method.clone(),
            request.url.clone(),
            request.body.to_vec(),
        ));

        if self.offline.load(Ordering::SeqCst) {
            return Err(WorkerError::Network("offline".to_string()));
        }

        Ok(self
            .routes
            .read()
            .await
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(request.url.clone(), StatusCode::NOT_FOUND, "")))
    }
}

// == Helper Functions ==

async fn create_test_state() -> (AppState, Arc<ScriptedNetwork>) {
    let network = Arc::new(ScriptedNetwork::default());
    network.serve("/", StatusCode::OK, "<root>").await;
    network.serve("/index.html", StatusCode::OK, "<index>").await;
    network.serve("/manifest.json", StatusCode::OK, "{\"name\":\"RetroChat\"}").await;
    network.serve("/app.js", StatusCode::OK, "boot()").await;

    let config = Config {
        app_origin: ORIGIN.to_string(),
        ..Config::default()
    };
    let state = AppState::new(&config, network.clone(), Arc::new(InProcessHost::new())).unwrap();
    (state, network)
}

async fn send(app: &Router, method: &str, uri: &str, body: Body) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_to_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn activated_app() -> (AppState, Arc<ScriptedNetwork>, Router) {
    let (state, network) = create_test_state().await;
    let app = create_router(state.clone());

    assert_eq!(send(&app, "POST", "/_sw/install", Body::empty()).await.status(), StatusCode::OK);
    assert_eq!(send(&app, "POST", "/_sw/activate", Body::empty()).await.status(), StatusCode::OK);

    (state, network, app)
}

// == Lifecycle Tests ==

#[tokio::test]
async fn test_install_then_activate_over_api() {
    let (state, _network) = create_test_state().await;
    state.worker.storage().write().await.open("retro-chat-v0");
    let app = create_router(state.clone());

    let installed = body_to_json(send(&app, "POST", "/_sw/install", Body::empty()).await).await;
    assert_eq!(installed["state"], "installed");
    assert_eq!(installed["cache"], "retro-chat-v1");

    let activated = body_to_json(send(&app, "POST", "/_sw/activate", Body::empty()).await).await;
    assert_eq!(activated["state"], "activated");
    assert_eq!(activated["deleted"][0], "retro-chat-v0");

    let caches = body_to_json(send(&app, "GET", "/_sw/caches", Body::empty()).await).await;
    assert_eq!(caches["regions"].as_array().unwrap().len(), 1);
    assert_eq!(caches["regions"][0], "retro-chat-v1");
    let entries = caches["entries"].as_array().unwrap();
    assert!(entries
        .iter()
        .any(|e| e["url"] == "http://localhost:8080/index.html" && e["age_ms"].is_i64()));

    assert!(state.host.claimed().await);
    assert!(state.host.skipped_waiting().await);
}

#[tokio::test]
async fn test_install_failure_marks_redundant() {
    let (state, network) = create_test_state().await;
    network.set_offline(true);
    let app = create_router(state);

    let response = send(&app, "POST", "/_sw/install", Body::empty()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let current = body_to_json(send(&app, "GET", "/_sw/state", Body::empty()).await).await;
    assert_eq!(current["state"], "redundant");
}

// == Fetch Interception Tests ==

#[tokio::test]
async fn test_precached_document_served_without_network() {
    let (_state, network, app) = activated_app().await;
    let before = network.calls().await;

    let response = send(&app, "GET", "/index.html", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"<index>");
    assert_eq!(network.calls().await, before);
}

#[tokio::test]
async fn test_miss_is_cached_for_next_request() {
    let (state, network, app) = activated_app().await;

    let response = send(&app, "GET", "/app.js", Body::empty()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"boot()");

    let key = RequestKey::get(format!("{ORIGIN}/app.js"));
    let mut landed = false;
    for _ in 0..100 {
        if state.worker.storage().read().await.peek(&key).is_some() {
            landed = true;
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(landed, "cache write never landed");

    let calls = network.calls().await;
    let again = send(&app, "GET", "/app.js", Body::empty()).await;
    assert_eq!(body_bytes(again).await, b"boot()");
    assert_eq!(network.calls().await, calls);
}

#[tokio::test]
async fn test_error_status_returned_uncached() {
    let (state, _network, app) = activated_app().await;

    let response = send(&app, "GET", "/missing.js", Body::empty()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    tokio::task::yield_now().await;
    let key = RequestKey::get(format!("{ORIGIN}/missing.js"));
    assert!(state.worker.storage().read().await.peek(&key).is_none());
}

#[tokio::test]
async fn test_cross_origin_response_returned_uncached() {
    let (state, network, app) = activated_app().await;
    network
        .serve_response(
            FetchResponse::new(format!("{ORIGIN}/fonts.css"), StatusCode::OK, "@font-face{}")
                .with_type(ResponseType::Opaque),
        )
        .await;

    let response = send(&app, "GET", "/fonts.css", Body::empty()).await;
    assert_eq!(response.status(), StatusCode::OK);

    tokio::task::yield_now().await;
    let key = RequestKey::get(format!("{ORIGIN}/fonts.css"));
    assert!(state.worker.storage().read().await.peek(&key).is_none());
}

#[tokio::test]
async fn test_write_request_passes_through_unmodified() {
    let (state, network, app) = activated_app().await;

    let response = send(
        &app,
        "POST",
        "/index.html",
        Body::from(r#"{"text":"hello"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (method, url, body) = network.last_call().await.unwrap();
    assert_eq!(method, Method::POST);
    assert_eq!(url, format!("{ORIGIN}/index.html"));
    assert_eq!(body, br#"{"text":"hello"}"#);

    let stats = body_to_json(send(&app, "GET", "/_sw/stats", Body::empty()).await).await;
    assert_eq!(stats["hits"], 0);
    assert_eq!(stats["misses"], 0);
    assert_eq!(state.worker.state().await, LifecycleState::Activated);
}

#[tokio::test]
async fn test_offline_root_serves_cached_index() {
    let (_state, network, app) = activated_app().await;
    network.set_offline(true);

    let response = send(&app, "GET", "/rooms/", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"<index>");

    let stats = body_to_json(send(&app, "GET", "/_sw/stats", Body::empty()).await).await;
    assert_eq!(stats["fallbacks"], 1);
}

#[tokio::test]
async fn test_offline_root_without_index_is_unavailable() {
    let (state, network, app) = activated_app().await;
    state
        .worker
        .storage()
        .write()
        .await
        .open("retro-chat-v1")
        .delete(&RequestKey::get(format!("{ORIGIN}/index.html")));
    network.set_offline(true);

    let response = send(&app, "GET", "/lobby/", Body::empty()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_offline_asset_propagates_failure() {
    let (_state, network, app) = activated_app().await;
    network.set_offline(true);

    let response = send(&app, "GET", "/chat.js", Body::empty()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("offline"));
}

// == Hook Tests ==

#[tokio::test]
async fn test_push_and_notification_click() {
    let (state, _network, app) = activated_app().await;

    let shown = body_to_json(send(&app, "POST", "/_sw/push", Body::from("opaque payload")).await).await;
    assert_eq!(shown["title"], "RetroChat");
    assert_eq!(shown["body"], "New message in RetroChat");

    let open = body_to_json(send(&app, "GET", "/_sw/notifications", Body::empty()).await).await;
    assert_eq!(open.as_array().unwrap().len(), 1);

    let response = send(
        &app,
        "POST",
        "/_sw/notificationclick",
        Body::from(r#"{"tag":"retro-chat-message"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(state.host.notifications().await.is_empty());
    assert_eq!(state.host.windows().await, vec![format!("{ORIGIN}/")]);
}

#[tokio::test]
async fn test_sync_endpoint() {
    let (_state, _network, app) = activated_app().await;

    let handled = body_to_json(
        send(&app, "POST", "/_sw/sync", Body::from(r#"{"tag":"background-sync"}"#)).await,
    )
    .await;
    assert_eq!(handled["handled"], true);

    let ignored = body_to_json(
        send(&app, "POST", "/_sw/sync", Body::from(r#"{"tag":"periodic"}"#)).await,
    )
    .await;
    assert_eq!(ignored["handled"], false);

    let invalid = send(&app, "POST", "/_sw/sync", Body::from(r#"{"tag":""}"#)).await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}
