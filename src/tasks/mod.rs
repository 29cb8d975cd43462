//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry: Forgets fingerprints older than the configured lifetime

mod expiry;

pub use expiry::spawn_expiry_task;
