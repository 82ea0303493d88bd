//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Persistent store location (`sqlite://<path>` or a plain file path)
    pub database_url: String,
    /// Cache store host
    pub redis_host: String,
    /// Cache store port
    pub redis_port: u16,
    /// Expiry in seconds for cached listings
    pub default_expiration: u64,
    /// Memory cache expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 5000)
    /// - `DATABASE_URL` - Persistent store location (default: sqlite://restaurants.db)
    /// - `REDIS_HOST` - Cache store host (default: 127.0.0.1)
    /// - `REDIS_PORT` - Cache store port (default: 6379)
    /// - `DEFAULT_EXPIRATION` - Cached listing expiry in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Memory cache sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("PORT", defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_host: env::var("REDIS_HOST").unwrap_or(defaults.redis_host),
            redis_port: env_or("REDIS_PORT", defaults.redis_port),
            default_expiration: env_or("DEFAULT_EXPIRATION", defaults.default_expiration),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// Database file path, with any `sqlite://` scheme removed.
    pub fn database_path(&self) -> &str {
        self.database_url
            .strip_prefix("sqlite://")
            .unwrap_or(&self.database_url)
    }

    /// Connection URL for the Redis cache store.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}", self.redis_host, self.redis_port)
    }

    /// Expiry applied to cached listings.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.default_expiration)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            database_url: "sqlite://restaurants.db".to_string(),
            redis_host: "127.0.0.1".to_string(),
            redis_port: 6379,
            default_expiration: 3600,
            cleanup_interval: 60,
        }
    }
}
