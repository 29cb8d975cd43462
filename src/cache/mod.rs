//! Cache Module
//!
//! Bounded, insertion-ordered fingerprint cache with FIFO halving eviction
//! and asynchronous lifecycle hooks.

mod bounded;
mod entry;
mod hooks;
mod order;
mod stats;
mod store;


// Re-export public types
pub use bounded::{BoundedAsyncCache, Fingerprint, Payload};
pub use entry::{current_timestamp_ms, CacheEntry, SeenRecord};
pub use hooks::{CacheEvent, CacheHooks, Hook, HookFuture};
pub use order::FifoOrder;
pub use stats::CacheStats;
pub use store::{CacheStore, InsertOutcome};

/// The cache used by the service: fingerprint string to first sighting.
pub type SeenCache = BoundedAsyncCache<String, SeenRecord>;

// == Public Constants ==
/// Default capacity when none is configured
pub const DEFAULT_MAX_ITEMS: usize = 256;

/// Maximum allowed fingerprint length in bytes
pub const MAX_FINGERPRINT_LENGTH: usize = 512;

/// Maximum allowed label length in bytes
pub const MAX_LABEL_LENGTH: usize = 256;

/// Maximum number of items accepted in one batch insert
pub const MAX_BATCH_SIZE: usize = 1000;
