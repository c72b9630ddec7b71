//! Network Module
//!
//! Request/response types shared by the cache and the interceptor, and the
//! `Network` seam through which every outbound request flows.

mod http;

pub use http::HttpNetwork;

use async_trait::async_trait;
use axum::http::{HeaderMap, Method, StatusCode};
use bytes::Bytes;

use crate::cache::RequestKey;
use crate::error::Result;

// == Response Type ==
/// Origin classification of a response, mirroring the fetch response types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Same-origin response
    Basic,
    /// Cross-origin response with readable body
    Cors,
    /// Cross-origin response with hidden status and body
    Opaque,
}

// == Fetch Request ==
/// An outbound request as seen by the interceptor.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Request method
    pub method: Method,
    /// Absolute request URL
    pub url: String,
    /// Request headers forwarded to the network
    pub headers: HeaderMap,
    /// Request body (empty for reads)
    pub body: Bytes,
}

impl FetchRequest {
    /// Creates a request with no headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Returns the cache identity of this request.
    pub fn key(&self) -> RequestKey {
        RequestKey::new(self.method.clone(), self.url.clone())
    }
}

// == Fetch Response ==
/// A fully buffered HTTP response.
///
/// The body is held as `Bytes`, so `clone()` is the structural copy taken
/// before a response is both stored and returned.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Final response URL
    pub url: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body bytes
    pub body: Bytes,
    /// Origin classification
    pub response_type: ResponseType,
}

impl FetchResponse {
    /// Creates a basic response with no headers.
    pub fn new(url: impl Into<String>, status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            status,
            headers: HeaderMap::new(),
            body: body.into(),
            response_type: ResponseType::Basic,
        }
    }

    /// Overrides the response type.
    pub fn with_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// True for a 2xx status.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Only complete same-origin responses are written to the cache.
    pub fn is_cacheable(&self) -> bool {
        self.status == StatusCode::OK && self.response_type == ResponseType::Basic
    }
}

// == Network Trait ==
/// Outbound network access. Implementations may fail, be slow, or return
/// any status; none of that is retried.
#[async_trait]
pub trait Network: Send + Sync {
    /// Performs the request and buffers the whole response.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse>;
}
