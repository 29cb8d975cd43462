//! Repost Guard - A bounded fingerprint cache for duplicate detection
//!
//! Remembers recently seen content fingerprints in an insertion-ordered cache
//! with FIFO halving eviction and asynchronous lifecycle hooks, and exposes it
//! over a small HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedAsyncCache, CacheHooks, SeenCache};
pub use config::Config;
pub use tasks::spawn_expiry_task;
