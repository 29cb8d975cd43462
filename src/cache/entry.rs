//! Cache Entry Module
//!
//! Defines the snapshot pair handed out by the cache and the `SeenRecord`
//! value stored for each fingerprint by the service.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Entry ==
/// An owned `(key, value)` pair copied out of the cache.
///
/// Snapshots never alias cache storage; mutating one has no effect on the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Splits the entry back into a tuple.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for CacheEntry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

// == Seen Record ==
/// Metadata remembered for a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRecord {
    /// First sighting (Unix milliseconds)
    pub first_seen_ms: u64,
    /// Free-form origin of the first sighting (channel, message id, ...)
    pub label: Option<String>,
}

impl SeenRecord {
    // == Constructor ==
    /// Creates a record stamped with the current time.
    pub fn new(label: Option<String>) -> Self {
        Self::at(current_timestamp_ms(), label)
    }

    /// Creates a record with an explicit timestamp.
    pub fn at(first_seen_ms: u64, label: Option<String>) -> Self {
        Self {
            first_seen_ms,
            label,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the first sighting, saturating at zero.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.first_seen_ms)
    }

    // == Is Older Than ==
    /// Checks whether the record has outlived `ttl_secs`.
    ///
    /// Boundary condition: a record whose age equals the TTL exactly is
    /// considered stale.
    pub fn is_older_than(&self, ttl_secs: u64) -> bool {
        self.age_ms() >= ttl_secs.saturating_mul(1000)
    }

    /// First sighting formatted as RFC 3339.
    pub fn first_seen_rfc3339(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.first_seen_ms as i64)
            .unwrap_or_default()
            .to_rfc3339()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
