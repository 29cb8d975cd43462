//! Response DTOs for the fingerprint cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheEntry, CacheStats, SeenRecord};

/// Outcome of recording one sighting (PUT /seen, PUT /seen/batch)
#[derive(Debug, Clone, Serialize)]
pub struct SeenResponse {
    pub fingerprint: String,
    /// True when the fingerprint was already cached
    pub duplicate: bool,
    /// First sighting of the fingerprint (RFC 3339)
    pub first_seen: String,
    /// Label of the first sighting
    pub label: Option<String>,
}

impl SeenResponse {
    /// Builds a response from the record currently stored for the fingerprint.
    pub fn new(fingerprint: impl Into<String>, duplicate: bool, record: &SeenRecord) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            duplicate,
            first_seen: record.first_seen_rfc3339(),
            label: record.label.clone(),
        }
    }
}

/// Response body for batch inserts (PUT /seen/batch)
#[derive(Debug, Clone, Serialize)]
pub struct BatchSeenResponse {
    /// Number of fingerprints newly stored
    pub inserted: usize,
    /// Number of fingerprints that were already present
    pub duplicates: usize,
    /// Per-item outcomes, in request order
    pub results: Vec<SeenResponse>,
}

impl BatchSeenResponse {
    pub fn new(results: Vec<SeenResponse>) -> Self {
        let duplicates = results.iter().filter(|r| r.duplicate).count();
        Self {
            inserted: results.len() - duplicates,
            duplicates,
            results,
        }
    }
}

/// Response body for lookups (GET /seen/:fingerprint)
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub fingerprint: String,
    pub seen: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LookupResponse {
    pub fn new(fingerprint: impl Into<String>, record: Option<&SeenRecord>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            seen: record.is_some(),
            first_seen: record.map(SeenRecord::first_seen_rfc3339),
            label: record.and_then(|r| r.label.clone()),
        }
    }
}

/// Response body for removals (DELETE /seen/:fingerprint)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub fingerprint: String,
    /// False when the fingerprint was not cached; removal is still a success
    pub removed: bool,
}

impl RemoveResponse {
    pub fn new(fingerprint: impl Into<String>, removed: bool) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            removed,
        }
    }
}

/// One row of the entries listing
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub fingerprint: String,
    pub first_seen: String,
    pub label: Option<String>,
}

impl From<CacheEntry<String, SeenRecord>> for EntryView {
    fn from(entry: CacheEntry<String, SeenRecord>) -> Self {
        Self {
            first_seen: entry.value.first_seen_rfc3339(),
            label: entry.value.label,
            fingerprint: entry.key,
        }
    }
}

/// Response body for the inspection endpoint (GET /entries)
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub max_items: usize,
    pub size: usize,
    /// Oldest first
    pub entries: Vec<EntryView>,
}

impl EntriesResponse {
    pub fn new(max_items: usize, entries: Vec<CacheEntry<String, SeenRecord>>) -> Self {
        Self {
            max_items,
            size: entries.len(),
            entries: entries.into_iter().map(EntryView::from).collect(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub inserts: u64,
    pub rejections: u64,
    pub evictions: u64,
    pub sweeps: u64,
    pub removals: u64,
    pub hook_failures: u64,
    pub total_entries: usize,
    /// rejections / (inserts + rejections)
    pub duplicate_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            duplicate_rate: stats.duplicate_rate(),
            inserts: stats.inserts,
            rejections: stats.rejections,
            evictions: stats.evictions,
            sweeps: stats.sweeps,
            removals: stats.removals,
            hook_failures: stats.hook_failures,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
