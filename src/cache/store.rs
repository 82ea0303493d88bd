//! Memory Store Module
//!
//! Synchronous key-value storage with TTL expiration and a per-namespace key
//! index. Wrapped by [`MemoryCache`](super::MemoryCache) for async access.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::cache::{namespace_of, CacheEntry};

// == Memory Store ==
/// Key-value storage with TTL support and namespace tracking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Namespace -> keys currently stored under it
    namespaces: HashMap<String, HashSet<String>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a value, overwriting any previous value and resetting its TTL.
    pub fn set(&mut self, key: String, value: String, ttl: Option<Duration>) {
        self.namespaces
            .entry(namespace_of(&key).to_string())
            .or_default()
            .insert(key.clone());
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Returns the value if present and not expired.
    ///
    /// Expired entries are removed on access.
    pub fn get(&mut self, key: &str) -> Option<String> {
        if self.entries.get(key)?.is_expired() {
            self.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove(key)
    }

    // == Delete Namespace ==
    /// Removes every entry indexed under `namespace`.
    ///
    /// Returns the number of entries removed.
    pub fn delete_namespace(&mut self, namespace: &str) -> usize {
        let Some(keys) = self.namespaces.remove(namespace) else {
            return 0;
        };

        keys.iter()
            .filter(|key| self.entries.remove(key.as_str()).is_some())
            .count()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove(key);
        }

        expired_keys.len()
    }

    // == Namespace Size ==
    /// Number of keys indexed under `namespace`.
    pub fn namespace_len(&self, namespace: &str) -> usize {
        self.namespaces.get(namespace).map_or(0, HashSet::len)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, key: &str) -> bool {
        let namespace = namespace_of(key);
        if let Some(keys) = self.namespaces.get_mut(namespace) {
            keys.remove(key);
            if keys.is_empty() {
                self.namespaces.remove(namespace);
            }
        }
        self.entries.remove(key).is_some()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Option<Duration> = Some(Duration::from_secs(300));

    #[test]
    fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = MemoryStore::new();

        store.set("ns:key1".to_string(), "value1".to_string(), TTL);

        assert_eq!(store.get("ns:key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.namespace_len("ns"), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = MemoryStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_overwrite_keeps_single_index_entry() {
        let mut store = MemoryStore::new();

        store.set("ns:key1".to_string(), "value1".to_string(), TTL);
        store.set("ns:key1".to_string(), "value2".to_string(), TTL);

        assert_eq!(store.get("ns:key1").as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.namespace_len("ns"), 1);
    }

    #[test]
    fn test_store_delete() {
        let mut store = MemoryStore::new();

        store.set("ns:key1".to_string(), "value1".to_string(), TTL);
        assert!(store.delete("ns:key1"));
        assert!(!store.delete("ns:key1"));

        assert!(store.is_empty());
        assert_eq!(store.namespace_len("ns"), 0);
    }

    #[test]
    fn test_store_delete_namespace() {
        let mut store = MemoryStore::new();

        store.set("restaurants:a".to_string(), "1".to_string(), TTL);
        store.set("restaurants:b".to_string(), "2".to_string(), TTL);
        store.set("other:c".to_string(), "3".to_string(), TTL);

        assert_eq!(store.delete_namespace("restaurants"), 2);
        assert!(store.get("restaurants:a").is_none());
        assert!(store.get("restaurants:b").is_none());
        assert_eq!(store.get("other:c").as_deref(), Some("3"));
        assert_eq!(store.namespace_len("restaurants"), 0);
    }

    #[test]
    fn test_store_delete_empty_namespace_is_noop() {
        let mut store = MemoryStore::new();
        store.set("other:c".to_string(), "3".to_string(), TTL);

        assert_eq!(store.delete_namespace("restaurants"), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = MemoryStore::new();

        store.set(
            "ns:key1".to_string(),
            "value1".to_string(),
            Some(Duration::from_secs(1)),
        );
        assert!(store.get("ns:key1").is_some());

        sleep(Duration::from_millis(1100));

        assert!(store.get("ns:key1").is_none());
        assert!(store.is_empty());
        assert_eq!(store.namespace_len("ns"), 0);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = MemoryStore::new();

        store.set(
            "ns:key1".to_string(),
            "value1".to_string(),
            Some(Duration::from_secs(1)),
        );
        store.set(
            "ns:key2".to_string(),
            "value2".to_string(),
            Some(Duration::from_secs(10)),
        );

        sleep(Duration::from_millis(1100));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.namespace_len("ns"), 1);
        assert!(store.get("ns:key2").is_some());
    }
}
