//! In-process fallback cache.
//!
//! HashMap storage behind an async RwLock, with lazy expiry on read and a
//! bulk sweep for the background task.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheEntry, Clock, SystemClock};
use crate::error::CacheResult;

// == Memory Backend ==
#[derive(Debug)]
pub struct MemoryBackend {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    // == Constructors ==
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    // == Get ==
    /// Returns the value if found and not expired.
    ///
    /// An expired entry is removed on the spot.
    pub async fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now_ms();
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    // == Set ==
    /// Stores a value, overwriting any previous entry and resetting its TTL.
    pub async fn set(&self, key: &str, value: &str, ttl_secs: u64) {
        let entry = CacheEntry::new(value.to_string(), ttl_secs, self.clock.now_ms());
        self.entries.write().await.insert(key.to_string(), entry);
    }

    // == Delete ==
    pub async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    // == Sweep Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// True if `key` is physically stored, ignoring expiry.
    pub async fn contains_raw(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(MemoryBackend::get(self, key).await)
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> CacheResult<()> {
        MemoryBackend::set(self, key, value, ttl_secs).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        Ok(MemoryBackend::delete(self, key).await)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn manual_backend() -> (MemoryBackend, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        (MemoryBackend::with_clock(clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_memory_new() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.len().await, 0);
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_memory_set_and_get() {
        let backend = MemoryBackend::new();

        backend.set("key1", "value1", 60).await;

        assert_eq!(backend.get("key1").await.as_deref(), Some("value1"));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_get_nonexistent() {
        let backend = MemoryBackend::new();
        assert!(backend.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn test_memory_delete() {
        let backend = MemoryBackend::new();

        backend.set("key1", "value1", 60).await;

        assert!(backend.delete("key1").await);
        assert!(!backend.delete("key1").await);
        assert!(backend.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn test_memory_overwrite_resets_ttl() {
        let (backend, clock) = manual_backend();

        backend.set("key1", "value1", 10).await;
        clock.advance_secs(8);
        backend.set("key1", "value2", 10).await;
        clock.advance_secs(8);

        assert_eq!(backend.get("key1").await.as_deref(), Some("value2"));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_expired_get_removes_entry() {
        let (backend, clock) = manual_backend();

        backend.set("key1", "value1", 5).await;
        clock.advance_secs(5);

        assert!(backend.get("key1").await.is_none());
        assert!(!backend.contains_raw("key1").await);
    }

    #[tokio::test]
    async fn test_memory_sweep_expired() {
        let (backend, clock) = manual_backend();

        backend.set("short", "a", 1).await;
        backend.set("long", "b", 600).await;
        clock.advance_secs(2);

        assert_eq!(backend.sweep_expired().await, 1);
        assert_eq!(backend.len().await, 1);
        assert_eq!(backend.get("long").await.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_memory_sweep_nothing_expired() {
        let (backend, _clock) = manual_backend();

        backend.set("key1", "value1", 60).await;

        assert_eq!(backend.sweep_expired().await, 0);
        assert_eq!(backend.len().await, 1);
    }
}
