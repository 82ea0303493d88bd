//! Persistent Store Module
//!
//! Repository trait for restaurant and review records and its backends.
//!
//! # Backends
//! - [`InMemoryRepository`] (default): process-local tables
//! - `SqliteRepository` (feature `sqlite`): durable SQLite database

mod error;
mod memory;
mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryRepository;
pub use traits::RestaurantRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
