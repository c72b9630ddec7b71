//! Decides which requests the worker intercepts.

use axum::http::Method;

use crate::network::FetchRequest;

// == Intercept Filter ==
/// Pass-through rules applied before the cache policy.
///
/// The realtime endpoint is recognised by substring: a URL is excluded when it
/// contains every configured marker. This can both miss a relocated endpoint
/// and exclude an unrelated URL that happens to carry the markers in its query.
#[derive(Debug, Clone)]
pub struct InterceptFilter {
    realtime_markers: Vec<String>,
}

impl InterceptFilter {
    pub fn new(realtime_markers: Vec<String>) -> Self {
        Self { realtime_markers }
    }

    /// True when the request goes through the cache-first policy.
    pub fn should_intercept(&self, request: &FetchRequest) -> bool {
        request.method == Method::GET
            && request.url.starts_with("http")
            && !self.is_realtime(&request.url)
    }

    /// True when the URL matches every realtime marker.
    pub fn is_realtime(&self, url: &str) -> bool {
        !self.realtime_markers.is_empty()
            && self.realtime_markers.iter().all(|marker| url.contains(marker.as_str()))
    }
}

/// URLs that fall back to the cached root document when offline.
pub fn is_root_document(url: &str) -> bool {
    url.ends_with('/') || url.ends_with("index.html")
}
