//! In-memory cache backend.
//!
//! Shares a [`MemoryStore`] behind a tokio `RwLock` so handlers and the
//! expiry sweep can use it concurrently.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Cache, MemoryStore, Result};

/// Process-local cache store.
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes expired entries. Returns how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Number of live or not-yet-swept entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Number of keys currently indexed under `namespace`.
    pub async fn namespace_len(&self, namespace: &str) -> usize {
        self.store.read().await.namespace_len(namespace)
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: expired entries are dropped on access
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.store
            .write()
            .await
            .set(key.to_string(), value.to_string(), ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.delete(key);
        Ok(())
    }

    async fn delete_namespace(&self, namespace: &str) -> Result<usize> {
        Ok(self.store.write().await.delete_namespace(namespace))
    }
}
