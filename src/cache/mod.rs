//! Cache Module
//!
//! Cache store abstraction, its backends, and the cache-aside helpers built
//! on top of it.
//!
//! # Backends
//! - [`MemoryCache`] (default): in-process store with TTL expiration
//! - `RedisCache` (feature `redis`): shared Redis store

mod aside;
mod entry;
mod error;
mod keys;
mod memory;
mod store;
mod traits;

#[cfg(feature = "redis")]
mod redis_impl;


// Re-export public types
pub use aside::{get_or_set, invalidate};
pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use keys::{list_key, namespace_of, KEY_SEPARATOR, RESTAURANTS_NAMESPACE};
pub use memory::MemoryCache;
pub use store::MemoryStore;
pub use traits::Cache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
