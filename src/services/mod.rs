//! Aggregation Services
//!
//! Each operation is a read-through over the shared `CacheStore`:
//! check cache, on a miss fetch upstream and normalize, then store the
//! result with the operation's TTL. A failed fetch or normalize stores
//! nothing.

mod news;
mod weather;

pub use news::{NewsService, HEADLINES_TTL, SEARCH_TTL};
pub use weather::{WeatherService, CURRENT_TTL, FORECAST_TTL};

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::error::Result;

/// Returns the cached value for `key`, or runs `load` and caches its result
/// for `ttl_secs`.
///
/// A cached value that no longer deserializes is treated as a miss.
pub(crate) async fn read_through<T, F, Fut>(
    cache: &CacheStore,
    key: &str,
    ttl_secs: u64,
    load: F,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(raw) = cache.get(key).await {
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(key, "Cache hit");
                return Ok(value);
            }
            Err(e) => warn!(key, "Discarding unreadable cache entry: {}", e),
        }
    } else {
        debug!(key, "Cache miss");
    }

    let value = load().await?;

    match serde_json::to_string(&value) {
        Ok(raw) => cache.set(key, &raw, ttl_secs).await,
        Err(e) => warn!(key, "Result not cached, serialization failed: {}", e),
    }

    Ok(value)
}
