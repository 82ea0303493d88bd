//! Redis cache backend.
//!
//! Keys are tracked in a Redis set per namespace (`__index:<namespace>`) so
//! namespace invalidation uses `SMEMBERS` + `DEL` instead of a `KEYS` scan.
//! Only the members that were read are removed from the index again, so a key
//! indexed during an invalidation is still caught by the next one.
//!
//! The commands here are not atomic. A crash between `SET` and `SADD` leaves
//! an untracked key that still expires with its TTL; a stale index member just
//! makes a later `DEL` a no-op.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use super::{namespace_of, Cache, CacheError, Result};

/// Maps Redis errors to CacheError.
fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

/// Name of the set holding every key of `namespace`.
fn index_key(namespace: &str) -> String {
    format!("__index:{namespace}")
}

/// Redis cache store using a connection manager.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis at `url` (e.g. `redis://127.0.0.1:6379`).
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        conn.sadd::<_, _, ()>(index_key(namespace_of(key)), key)
            .await
            .map_err(map_redis_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        conn.srem::<_, _, ()>(index_key(namespace_of(key)), key)
            .await
            .map_err(map_redis_error)
    }

    async fn delete_namespace(&self, namespace: &str) -> Result<usize> {
        let mut conn = self.conn.clone();
        let index = index_key(namespace);

        let keys: Vec<String> = conn.smembers(&index).await.map_err(map_redis_error)?;
        self.delete_members(&index, &keys).await
    }
}

impl RedisCache {
    /// Deletes `keys` and drops exactly those members from `index`.
    ///
    /// Members added to the index after `keys` was read stay tracked.
    async fn delete_members(&self, index: &str, keys: &[String]) -> Result<usize> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.clone();
        let removed: usize = conn.del(keys).await.map_err(map_redis_error)?;
        conn.srem::<_, _, ()>(index, keys)
            .await
            .map_err(map_redis_error)?;

        Ok(removed)
    }
}
