//! Redis-backed primary cache.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::{debug, info};

use crate::cache::CacheBackend;
use crate::error::{CacheError, CacheResult};

/// Shared Redis cache client.
///
/// Uses a `ConnectionManager`, which re-establishes the connection by itself
/// after a transient failure. Every command is bounded by `op_timeout`.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
    url: String,
    op_timeout: Duration,
}

impl fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisBackend")
            .field("url", &self.url)
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Connects and sends a single `PING`, all within `timeout`. The same
    /// limit then applies to each later command.
    ///
    /// Any failure means the caller should run without a primary backend.
    pub async fn connect(url: &str, timeout: Duration) -> CacheResult<Self> {
        let client = redis::Client::open(url)?;

        let probe = async {
            let mut conn = ConnectionManager::new(client).await?;
            let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, redis::RedisError>((conn, pong))
        };

        let (conn, pong) = bounded(timeout, probe).await?;

        info!("Connected to Redis at {} ({})", url, pong);
        Ok(Self {
            conn,
            url: url.to_string(),
            op_timeout: timeout,
        })
    }
}

/// Runs a Redis call, failing with `CacheError::Timeout` once `limit` passes.
async fn bounded<T, F>(limit: Duration, op: F) -> CacheResult<T>
where
    F: Future<Output = redis::RedisResult<T>>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(CacheError::Timeout(limit)),
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value = bounded(self.op_timeout, conn.get::<_, Option<String>>(key)).await?;
        debug!(key, hit = value.is_some(), "redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        bounded(
            self.op_timeout,
            conn.set_ex::<_, _, ()>(key, value, ttl_secs.max(1)),
        )
        .await?;
        debug!(key, ttl_secs, "redis SETEX");
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = bounded(self.op_timeout, conn.del::<_, i64>(key)).await?;
        Ok(removed > 0)
    }
}
