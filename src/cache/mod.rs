//! Cache Module
//!
//! Response cache with a Redis primary and an in-memory fallback, both
//! with per-entry TTL.

mod backend;
mod clock;
mod entry;
pub mod keys;
mod memory;
mod redis_backend;
mod store;


// Re-export public types
pub use backend::CacheBackend;
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;
pub use store::CacheStore;
