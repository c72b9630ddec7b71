//! Cache Statistics Module
//!
//! Tracks lookups, writes, and offline fallbacks across all regions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a region
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Responses written into a region
    pub stores: u64,
    /// Root document served from cache after a network failure
    pub fallbacks: u64,
    /// Number of regions currently present
    pub regions: usize,
    /// Entries across all regions
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_stores(&mut self, count: usize) {
        self.stores += count as u64;
    }

    pub fn record_fallback(&mut self) {
        self.fallbacks += 1;
    }
}
