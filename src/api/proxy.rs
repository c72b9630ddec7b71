//! Catch-all handler routing client requests through the worker.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::handlers::AppState;
use crate::error::{Result, WorkerError};
use crate::network::{FetchRequest, FetchResponse};
use crate::worker::FetchOutcome;

/// Fallback handler for every non-admin path.
///
/// Passed-through requests go straight to the network. Cache writes spawned
/// by the worker are not awaited.
pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    mut headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    // A leading `//` would resolve to another host.
    let url = state
        .worker
        .resolve(&format!("/{}", target.trim_start_matches('/')))?;
    headers.remove(header::HOST);

    let request = FetchRequest {
        method,
        url,
        headers,
        body,
    };

    let response = match state.worker.fetch(&request).await? {
        FetchOutcome::Passthrough => {
            debug!("Passing through {} {}", request.method, request.url);
            state.network.fetch(&request).await?
        }
        FetchOutcome::Cache(response) => response,
        FetchOutcome::Network { response, .. } => response,
        FetchOutcome::Fallback(Some(response)) => response,
        FetchOutcome::Fallback(None) => return Err(WorkerError::Offline(request.url)),
    };

    Ok(into_http_response(response))
}

fn into_http_response(response: FetchResponse) -> Response {
    let mut headers = response.headers;
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);
    (response.status, headers, response.body).into_response()
}
