//! Background Tasks Module
//!
//! Work the interceptor hands off instead of awaiting.
//!
//! # Tasks
//! - Cache write: stores a network response copy after it has been returned

mod cache_write;

pub use cache_write::spawn_cache_write;
