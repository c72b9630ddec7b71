//! Cache Entry Module
//!
//! A stored response together with the time it was written.

use chrono::{DateTime, Utc};

use crate::network::FetchResponse;

// == Cache Entry ==
/// A single stored response. Entries never expire; they live until their
/// region is deleted.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response
    pub response: FetchResponse,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Wraps a response stamped with the current time.
    pub fn new(response: FetchResponse) -> Self {
        Self {
            response,
            stored_at: Utc::now(),
        }
    }

    // == Age ==
    /// Milliseconds since the entry was written. Informational only.
    pub fn age_ms(&self) -> i64 {
        (Utc::now() - self.stored_at).num_milliseconds().max(0)
    }
}
