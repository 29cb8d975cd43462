//! Cache Statistics Module
//!
//! Tracks insert outcomes, eviction sweeps and hook failures.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing cache activity since construction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Successful insertions of new keys
    pub inserts: u64,
    /// Insertions rejected because the key was already present
    pub rejections: u64,
    /// Entries removed by capacity sweeps
    pub evictions: u64,
    /// Number of capacity sweeps performed
    pub sweeps: u64,
    /// Entries removed explicitly (remove or purge)
    pub removals: u64,
    /// Hook invocations that returned an error or panicked
    pub hook_failures: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Duplicate Rate ==
    /// Share of insert attempts that hit an existing key.
    ///
    /// Returns rejections / (inserts + rejections), or 0.0 with no attempts.
    pub fn duplicate_rate(&self) -> f64 {
        let total = self.inserts + self.rejections;
        if total == 0 {
            0.0
        } else {
            self.rejections as f64 / total as f64
        }
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Record Sweep ==
    /// Records one sweep that evicted `evicted` entries.
    pub fn record_sweep(&mut self, evicted: usize) {
        self.sweeps += 1;
        self.evictions += evicted as u64;
    }

    pub fn record_removals(&mut self, count: usize) {
        self.removals += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
