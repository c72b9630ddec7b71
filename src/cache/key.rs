//! Request Key Module
//!
//! Identity under which a response is stored in a cache region.

use std::fmt;

use axum::http::Method;

// == Request Key ==
/// Method plus absolute URL. Matching is exact: no query normalisation,
/// no `Vary` handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    /// Request method
    pub method: Method,
    /// Absolute request URL
    pub url: String,
}

impl RequestKey {
    /// Creates a key from a method and URL.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }

    /// Creates a GET key, the only kind the interceptor stores.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_differ_by_method() {
        let get = RequestKey::get("http://app/");
        let post = RequestKey::new(Method::POST, "http://app/");
        assert_ne!(get, post);
    }

    #[test]
    fn test_keys_match_exact_url_only() {
        assert_ne!(RequestKey::get("http://app/a"), RequestKey::get("http://app/a?v=1"));
        assert_eq!(RequestKey::get("http://app/a"), RequestKey::get("http://app/a"));
    }

    #[test]
    fn test_display() {
        assert_eq!(RequestKey::get("http://app/").to_string(), "GET http://app/");
    }
}
