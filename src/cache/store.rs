//! Cache Store Module
//!
//! Facade over an optional networked primary backend and the in-process
//! fallback. Backend failures are logged and absorbed here; callers never
//! see a cache error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{CacheBackend, MemoryBackend, RedisBackend};

// == Cache Store ==
pub struct CacheStore {
    /// Networked store, tried first when present
    primary: Option<Arc<dyn CacheBackend>>,
    /// Always-available in-process store
    fallback: Arc<MemoryBackend>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("primary", &self.primary.as_ref().map(|p| p.name()))
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl CacheStore {
    // == Constructors ==
    pub fn new(primary: Option<Arc<dyn CacheBackend>>, fallback: Arc<MemoryBackend>) -> Self {
        Self { primary, fallback }
    }

    /// A store with no primary backend.
    pub fn in_memory() -> Self {
        Self::new(None, Arc::new(MemoryBackend::new()))
    }

    /// Probes the Redis server once. If the probe fails the store runs on
    /// the fallback for its whole lifetime.
    pub async fn connect(redis_url: Option<&str>, probe_timeout: Duration) -> Self {
        let Some(url) = redis_url else {
            info!("No primary cache configured, using in-memory cache");
            return Self::in_memory();
        };

        match RedisBackend::connect(url, probe_timeout).await {
            Ok(backend) => Self::new(Some(Arc::new(backend)), Arc::new(MemoryBackend::new())),
            Err(e) => {
                warn!("Redis not available ({}), falling back to in-memory cache", e);
                Self::in_memory()
            }
        }
    }

    // == Get ==
    /// Looks in the primary first, then the fallback.
    pub async fn get(&self, key: &str) -> Option<String> {
        if let Some(primary) = &self.primary {
            match primary.get(key).await {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(e) => warn!(key, "{} GET failed, using fallback: {}", primary.name(), e),
            }
        }

        self.fallback.get(key).await
    }

    // == Set ==
    /// Stores a value. Lands on the fallback when there is no primary or
    /// the primary write fails, so this never fails.
    pub async fn set(&self, key: &str, value: &str, ttl_secs: u64) {
        if let Some(primary) = &self.primary {
            match primary.set(key, value, ttl_secs).await {
                Ok(()) => return,
                Err(e) => warn!(key, "{} SET failed, using fallback: {}", primary.name(), e),
            }
        }

        self.fallback.set(key, value, ttl_secs).await;
    }

    // == Delete ==
    /// Removes the key from both backends. Returns true if either held it.
    pub async fn delete(&self, key: &str) -> bool {
        let mut removed = false;

        if let Some(primary) = &self.primary {
            match primary.delete(key).await {
                Ok(found) => removed = found,
                Err(e) => warn!(key, "{} DEL failed: {}", primary.name(), e),
            }
        }

        self.fallback.delete(key).await || removed
    }

    // == Sweep Expired ==
    /// Prunes expired fallback entries. The primary expires its own.
    pub async fn sweep_expired(&self) -> usize {
        self.fallback.sweep_expired().await
    }

    /// Name of the backend reads go to first.
    pub fn backend_name(&self) -> &'static str {
        self.primary
            .as_ref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn fallback(&self) -> &MemoryBackend {
        &self.fallback
    }
}
