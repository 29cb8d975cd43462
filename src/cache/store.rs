//! Cache Store Module
//!
//! Synchronous core of the bounded cache: HashMap storage plus FIFO order
//! tracking, with halving eviction once capacity is reached.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, FifoOrder};
use crate::error::{CacheError, Result};

// == Insert Outcome ==
/// Result of a single insert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<K, V> {
    /// The key was new and is now stored. `evicted` lists entries removed by
    /// the sweep this insert triggered, oldest first (usually empty).
    Inserted { evicted: Vec<CacheEntry<K, V>> },
    /// The key was already present; storage is untouched.
    Rejected,
}

impl<K, V> InsertOutcome<K, V> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, InsertOutcome::Rejected)
    }

    /// Entries evicted as a side effect of this insert.
    pub fn evicted(&self) -> &[CacheEntry<K, V>] {
        match self {
            InsertOutcome::Inserted { evicted } => evicted,
            InsertOutcome::Rejected => &[],
        }
    }
}

// == Cache Store ==
/// Insertion-ordered storage with a hard capacity.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Arrival order tracker
    order: FifoOrder<K>,
    /// Activity counters
    stats: CacheStats,
    /// Size at which a sweep is triggered
    max_items: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new store that sweeps once it holds `max_items` entries.
    ///
    /// # Errors
    /// `CacheError::InvalidConfig` if `max_items` is zero.
    pub fn new(max_items: usize) -> Result<Self> {
        if max_items == 0 {
            return Err(CacheError::InvalidConfig(
                "max_items must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::new(),
            order: FifoOrder::new(),
            stats: CacheStats::new(),
            max_items,
        })
    }

    // == Insert ==
    /// Stores `(key, value)` unless the key is already present.
    ///
    /// A duplicate key leaves the stored value untouched and yields
    /// `InsertOutcome::Rejected`. A new key is appended to the order; if the
    /// size then reaches `max_items` the oldest half is evicted.
    pub fn insert(&mut self, key: K, value: V) -> InsertOutcome<K, V> {
        if self.entries.contains_key(&key) {
            self.stats.record_rejection();
            return InsertOutcome::Rejected;
        }

        self.entries.insert(key.clone(), value);
        self.order.push(key);
        self.stats.record_insert();

        let evicted = if self.entries.len() >= self.max_items {
            self.sweep()
        } else {
            Vec::new()
        };

        self.stats.set_total_entries(self.entries.len());
        InsertOutcome::Inserted { evicted }
    }

    // == Sweep ==
    /// Evicts the oldest `floor(len / 2)` entries, oldest first.
    fn sweep(&mut self) -> Vec<CacheEntry<K, V>> {
        let count = self.entries.len() / 2;
        let mut evicted = Vec::with_capacity(count);

        for _ in 0..count {
            let Some(key) = self.order.pop_oldest() else {
                break;
            };
            if let Some(value) = self.entries.remove(&key) {
                evicted.push(CacheEntry::new(key, value));
            }
        }

        self.stats.record_sweep(evicted.len());
        debug!(
            "Capacity sweep evicted {} entries, {} remain",
            evicted.len(),
            self.entries.len()
        );
        evicted
    }

    // == Contains ==
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Get ==
    /// Returns a copy of the stored value. Never reorders entries.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    // == Remove ==
    /// Removes an entry by key. Absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.order.remove(key);
            self.stats.record_removals(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Purge ==
    /// Removes every entry matching `predicate`, keeping the order of the rest.
    ///
    /// Returns the number of entries removed.
    pub fn purge<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, value| !predicate(key, value));
        let removed = before - self.entries.len();

        if removed > 0 {
            let entries = &self.entries;
            self.order.retain(|key| entries.contains_key(key));
            self.stats.record_removals(removed);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Entries ==
    /// Returns an owned snapshot of all entries, oldest first.
    pub fn entries(&self) -> Vec<CacheEntry<K, V>> {
        self.order
            .iter()
            .filter_map(|key| {
                self.entries
                    .get(key)
                    .map(|value| CacheEntry::new(key.clone(), value.clone()))
            })
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
