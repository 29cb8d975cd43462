//! Bounded Async Cache Module
//!
//! Thread-safe handle over `CacheStore` that fires lifecycle hooks as
//! background tasks after each mutation.

use std::fmt;
use std::fmt::Write as _;
use std::hash::Hash;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::hooks::Notifier;
use crate::cache::{CacheEntry, CacheEvent, CacheHooks, CacheStats, CacheStore, InsertOutcome};
use crate::error::Result;

/// Bounds required of cache keys.
pub trait Fingerprint: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> Fingerprint for T where T: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {}

/// Bounds required of cache values.
pub trait Payload: Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> Payload for T where T: Clone + fmt::Debug + Send + Sync + 'static {}

struct Shared<K, V> {
    store: Mutex<CacheStore<K, V>>,
    hooks: CacheHooks<K, V>,
    notifier: Notifier,
}

// == Bounded Async Cache ==
/// Insertion-ordered cache with a hard capacity and async lifecycle hooks.
///
/// Cloning yields another handle to the same cache. Mutations run
/// synchronously under a mutex; hooks run afterwards as independent tokio
/// tasks and may still be pending when the mutating call returns. Use
/// [`drain_notifications`](Self::drain_notifications) to wait for them.
pub struct BoundedAsyncCache<K, V> {
    shared: Arc<Shared<K, V>>,
}

impl<K, V> Clone for BoundedAsyncCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K: Fingerprint, V: Payload> BoundedAsyncCache<K, V> {
    // == Constructors ==
    /// Creates a cache without hooks.
    pub fn new(max_items: usize) -> Result<Self> {
        Self::with_hooks(max_items, CacheHooks::default())
    }

    /// Creates a cache that sweeps at `max_items` entries and fires `hooks`.
    ///
    /// # Errors
    /// `CacheError::InvalidConfig` if `max_items` is zero.
    pub fn with_hooks(max_items: usize, hooks: CacheHooks<K, V>) -> Result<Self> {
        let store = CacheStore::new(max_items)?;
        Ok(Self {
            shared: Arc::new(Shared {
                store: Mutex::new(store),
                hooks,
                notifier: Notifier::new(),
            }),
        })
    }

    // == Insert One ==
    /// Attempts to store `(key, value)`.
    ///
    /// A new key fires `on_add_pass`, followed by `on_remove` for every entry
    /// evicted by the sweep it may trigger. An existing key leaves storage
    /// untouched and fires `on_add_fail` with the attempted pair.
    pub fn insert_one(&self, key: K, value: V) -> InsertOutcome<K, V> {
        let outcome = self.shared.store.lock().insert(key.clone(), value.clone());

        match &outcome {
            InsertOutcome::Inserted { evicted } => {
                self.notify(CacheEvent::AddPass, key, value);
                for entry in evicted {
                    self.notify(CacheEvent::Remove, entry.key.clone(), entry.value.clone());
                }
            }
            InsertOutcome::Rejected => {
                debug!("Insert rejected for existing key {:?}", key);
                self.notify(CacheEvent::AddFail, key, value);
            }
        }

        outcome
    }

    // == Insert Many ==
    /// Inserts each pair in iteration order, exactly as repeated
    /// [`insert_one`](Self::insert_one) calls would. Not transactional.
    pub fn insert_many<I>(&self, pairs: I) -> Vec<InsertOutcome<K, V>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| self.insert_one(key, value))
            .collect()
    }

    // == Contains ==
    pub fn contains(&self, key: &K) -> bool {
        self.shared.store.lock().contains(key)
    }

    // == Get ==
    /// Returns a copy of the value stored for `key`.
    pub fn get(&self, key: &K) -> Option<V> {
        self.shared.store.lock().get(key)
    }

    // == Remove ==
    /// Removes `key` if present. Idempotent, and fires no hooks.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shared.store.lock().remove(key)
    }

    // == Purge ==
    /// Removes every entry matching `predicate` in one locked pass.
    ///
    /// Returns the number of entries removed. Fires no hooks.
    pub fn purge<F>(&self, predicate: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.shared.store.lock().purge(predicate)
    }

    // == Size ==
    pub fn size(&self) -> usize {
        self.shared.store.lock().len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.store.lock().is_empty()
    }

    pub fn max_items(&self) -> usize {
        self.shared.store.lock().max_items()
    }

    // == Entries ==
    /// Snapshot of current contents, oldest first.
    pub fn entries(&self) -> Vec<CacheEntry<K, V>> {
        self.shared.store.lock().entries()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.shared.store.lock().stats();
        stats.hook_failures = self.shared.notifier.failures();
        stats
    }

    // == Dump ==
    /// Human-readable listing of the cache for operators.
    pub fn dump(&self) -> String {
        let (entries, max_items) = {
            let store = self.shared.store.lock();
            (store.entries(), store.max_items())
        };

        let mut out = format!(
            "BoundedAsyncCache {}/{} entries (oldest first)",
            entries.len(),
            max_items
        );
        for (index, entry) in entries.iter().enumerate() {
            let _ = write!(out, "\n  {:>4}. {:?} => {:?}", index + 1, entry.key, entry.value);
        }
        out
    }

    // == Notifications ==
    /// Waits for every dispatched hook to finish.
    pub async fn drain_notifications(&self) {
        self.shared.notifier.drain().await;
    }

    /// Dispatched hook tasks that have not been reaped yet.
    pub fn pending_notifications(&self) -> usize {
        self.shared.notifier.pending()
    }

    fn notify(&self, event: CacheEvent, key: K, value: V) {
        let Some(hook) = self.shared.hooks.get(event).cloned() else {
            return;
        };

        let weak: Weak<Shared<K, V>> = Arc::downgrade(&self.shared);
        let failures = self.shared.notifier.failure_counter();

        self.shared.notifier.dispatch(event, async move {
            let Some(shared) = weak.upgrade() else {
                debug!("Cache dropped before {} notification for {:?}", event, key);
                return;
            };
            let cache = BoundedAsyncCache { shared };
            let context = format!("{:?} => {:?}", key, value);

            // The hook runs in its own task so a panic is caught by the runtime
            match tokio::spawn(async move { hook(cache, key, value).await }).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    warn!("{} hook failed for {}: {:#}", event, context, err);
                }
                Err(err) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    warn!("{} hook aborted for {}: {}", event, context, err);
                }
            }
        });
    }
}

impl<K: Fingerprint, V: Payload> fmt::Debug for BoundedAsyncCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.shared.store.lock();
        f.debug_struct("BoundedAsyncCache")
            .field("size", &store.len())
            .field("max_items", &store.max_items())
            .field("hooks", &self.shared.hooks)
            .finish()
    }
}
