//! Cache backend interface shared by the Redis and in-memory stores.

use async_trait::async_trait;

use crate::error::CacheResult;

/// A key-value store with per-entry expiry.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Short label used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl_secs`.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> CacheResult<()>;

    /// Removes `key`, returning whether it was present.
    async fn delete(&self, key: &str) -> CacheResult<bool>;
}
