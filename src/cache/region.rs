//! Cache Region Module
//!
//! A single named store of responses keyed by request identity.

use std::collections::HashMap;

use crate::cache::{CacheEntry, RequestKey};
use crate::network::FetchResponse;

// == Cache Region ==
/// One versioned region. No expiry, no eviction, no size bound.
#[derive(Debug, Clone)]
pub struct CacheRegion {
    /// Region name (the worker's version string)
    name: String,
    /// Stored responses
    entries: HashMap<RequestKey, CacheEntry>,
}

impl CacheRegion {
    // == Constructor ==
    /// Creates an empty region.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Put ==
    /// Stores a response, overwriting any previous entry for the same key.
    pub fn put(&mut self, key: RequestKey, response: FetchResponse) {
        self.entries.insert(key, CacheEntry::new(response));
    }

    // == Match ==
    /// Returns a copy of the stored response for an exact key.
    pub fn match_key(&self, key: &RequestKey) -> Option<FetchResponse> {
        self.entries.get(key).map(|entry| entry.response.clone())
    }

    // == Entry ==
    /// Returns the stored entry, including its write time.
    pub fn entry(&self, key: &RequestKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Delete ==
    /// Removes an entry. Returns whether anything was removed.
    pub fn delete(&mut self, key: &RequestKey) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Keys ==
    /// Returns every stored key.
    pub fn keys(&self) -> impl Iterator<Item = &RequestKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
