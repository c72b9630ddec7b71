//! Cache Module
//!
//! Versioned cache regions of HTTP responses keyed by request identity.

mod entry;
mod key;
mod region;
mod stats;
mod storage;


// Re-export public types
pub use entry::CacheEntry;
pub use key::RequestKey;
pub use region::CacheRegion;
pub use stats::CacheStats;
pub use storage::{CacheStorage, SharedStorage};
