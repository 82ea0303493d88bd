//! Cache-Aside Module
//!
//! Read-through helper for cached query results and the namespace
//! invalidation run after writes.

use std::future::Future;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{Cache, CacheError};

// == Get Or Set ==
/// Returns the value cached under `key`, or computes, caches and returns it.
///
/// `compute` runs at most once, and only on a miss. Cache failures and
/// `compute` failures are returned as-is; nothing is cached when `compute`
/// fails.
pub async fn get_or_set<T, E, F, Fut>(
    cache: &dyn Cache,
    key: &str,
    ttl: Option<Duration>,
    compute: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    E: From<CacheError>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(cached) = cache.get(key).await? {
        debug!(key, "Serving from cache");
        return Ok(serde_json::from_str(&cached).map_err(CacheError::from)?);
    }

    debug!(key, "Cache miss, computing fresh value");
    let fresh = compute().await?;

    let payload = serde_json::to_string(&fresh).map_err(CacheError::from)?;
    cache.set(key, &payload, ttl).await?;

    Ok(fresh)
}

// == Invalidate ==
/// Drops every cached entry in `namespace`.
///
/// Returns the number of entries removed; an empty namespace is a no-op.
pub async fn invalidate(cache: &dyn Cache, namespace: &str) -> Result<usize, CacheError> {
    let removed = cache.delete_namespace(namespace).await?;
    if removed > 0 {
        info!(namespace, removed, "Invalidated cached entries");
    }
    Ok(removed)
}
