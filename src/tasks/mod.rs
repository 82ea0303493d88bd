//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired entries out of the memory cache

mod cleanup;

pub use cleanup::spawn_cleanup_task;
