//! Restaurant Cache - restaurant and review REST service
//!
//! Listings are served cache-aside from a key-value cache; every write
//! invalidates the cached listing namespace.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::{RestaurantService, ServiceError};
pub use tasks::spawn_cleanup_task;
