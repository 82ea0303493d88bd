use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key-value cache store used for transient query results.
///
/// Backends index every key under its namespace (see
/// [`namespace_of`](super::namespace_of)) so a whole namespace can be dropped
/// without scanning the keyspace.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value by key. Expired or missing keys yield `None`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Sets a value with an optional time-to-live.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Deletes a single key. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes every key in `namespace`, returning how many were removed.
    async fn delete_namespace(&self, namespace: &str) -> Result<usize>;
}
