//! Cache Storage Module
//!
//! The set of named cache regions, shared between the interceptor and its
//! background writers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheRegion, CacheStats, RequestKey};
use crate::network::FetchResponse;

/// Storage shared across concurrent fetch interceptions.
pub type SharedStorage = Arc<RwLock<CacheStorage>>;

// == Cache Storage ==
/// Named regions plus lookup statistics.
#[derive(Debug, Default)]
pub struct CacheStorage {
    regions: HashMap<String, CacheRegion>,
    stats: CacheStats,
}

impl CacheStorage {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage already wrapped for sharing.
    pub fn shared() -> SharedStorage {
        Arc::new(RwLock::new(Self::new()))
    }

    // == Open ==
    /// Returns the named region, creating it if absent.
    pub fn open(&mut self, name: &str) -> &mut CacheRegion {
        self.regions
            .entry(name.to_string())
            .or_insert_with(|| CacheRegion::new(name))
    }

    // == Keys ==
    /// Returns every region name, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut names: Vec<String> = self.regions.keys().cloned().collect();
        names.sort();
        names
    }

    // == Delete ==
    /// Deletes a whole region. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.regions.remove(name).is_some()
    }

    // == Region ==
    pub fn region(&self, name: &str) -> Option<&CacheRegion> {
        self.regions.get(name)
    }

    // == Match ==
    /// Looks a request up in every region and records a hit or miss.
    pub fn match_request(&mut self, key: &RequestKey) -> Option<FetchResponse> {
        let found = self.peek(key);
        if found.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        found
    }

    // == Peek ==
    /// Looks a request up in every region without touching statistics.
    pub fn peek(&self, key: &RequestKey) -> Option<FetchResponse> {
        let mut names: Vec<&String> = self.regions.keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.regions.get(name))
            .find_map(|region| region.match_key(key))
    }

    // == Put ==
    /// Stores one response in the named region, creating it if absent.
    pub fn put(&mut self, name: &str, key: RequestKey, response: FetchResponse) {
        self.open(name).put(key, response);
        self.stats.record_stores(1);
    }

    // == Put All ==
    /// Stores a batch of responses in the named region.
    pub fn put_all(&mut self, name: &str, entries: Vec<(RequestKey, FetchResponse)>) {
        let count = entries.len();
        let region = self.open(name);
        for (key, response) in entries {
            region.put(key, response);
        }
        self.stats.record_stores(count);
    }

    // == Record Fallback ==
    pub fn record_fallback(&mut self) {
        self.stats.record_fallback();
    }

    // == Stats ==
    /// Returns current statistics with region and entry counts filled in.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.regions = self.regions.len();
        stats.total_entries = self.regions.values().map(CacheRegion::len).sum();
        stats
    }
}
