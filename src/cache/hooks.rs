//! Lifecycle Hooks Module
//!
//! Named callback slots fired on insert success, insert rejection and
//! eviction, plus the dispatcher that runs them as background tasks.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::warn;

use crate::cache::BoundedAsyncCache;

/// Boxed future returned by every hook.
pub type HookFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// A hook receives the cache it belongs to and the affected pair.
pub type Hook<K, V> = Arc<dyn Fn(BoundedAsyncCache<K, V>, K, V) -> HookFuture + Send + Sync>;

// == Cache Event ==
/// The lifecycle events a hook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEvent {
    /// A new key was stored
    AddPass,
    /// An insert hit an existing key and was dropped
    AddFail,
    /// An entry was evicted by a capacity sweep
    Remove,
}

impl fmt::Display for CacheEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheEvent::AddPass => "add_pass",
            CacheEvent::AddFail => "add_fail",
            CacheEvent::Remove => "remove",
        };
        f.write_str(name)
    }
}

// == Cache Hooks ==
/// The three optional hook slots of a cache.
///
/// ```ignore
/// let hooks = CacheHooks::new()
///     .on_add_fail(|_cache, key: String, _value: u64| async move {
///         tracing::info!("duplicate: {}", key);
///         Ok(())
///     });
/// ```
pub struct CacheHooks<K, V> {
    on_add_pass: Option<Hook<K, V>>,
    on_add_fail: Option<Hook<K, V>>,
    on_remove: Option<Hook<K, V>>,
}

impl<K, V> CacheHooks<K, V> {
    pub fn new() -> Self {
        Self {
            on_add_pass: None,
            on_add_fail: None,
            on_remove: None,
        }
    }

    /// Returns the hook registered for `event`, if any.
    pub fn get(&self, event: CacheEvent) -> Option<&Hook<K, V>> {
        match event {
            CacheEvent::AddPass => self.on_add_pass.as_ref(),
            CacheEvent::AddFail => self.on_add_fail.as_ref(),
            CacheEvent::Remove => self.on_remove.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.on_add_pass.is_none() && self.on_add_fail.is_none() && self.on_remove.is_none()
    }
}

impl<K: 'static, V: 'static> CacheHooks<K, V> {
    /// Fired after a new key is stored.
    pub fn on_add_pass<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(BoundedAsyncCache<K, V>, K, V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_add_pass = Some(boxed(hook));
        self
    }

    /// Fired with the attempted pair when an insert hits an existing key.
    pub fn on_add_fail<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(BoundedAsyncCache<K, V>, K, V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_add_fail = Some(boxed(hook));
        self
    }

    /// Fired once per entry removed by a capacity sweep.
    pub fn on_remove<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(BoundedAsyncCache<K, V>, K, V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_remove = Some(boxed(hook));
        self
    }
}

fn boxed<K, V, F, Fut>(hook: F) -> Hook<K, V>
where
    K: 'static,
    V: 'static,
    F: Fn(BoundedAsyncCache<K, V>, K, V) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(
        move |cache: BoundedAsyncCache<K, V>, key: K, value: V| -> HookFuture {
            Box::pin(hook(cache, key, value))
        },
    )
}

impl<K, V> Default for CacheHooks<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for CacheHooks<K, V> {
    fn clone(&self) -> Self {
        Self {
            on_add_pass: self.on_add_pass.clone(),
            on_add_fail: self.on_add_fail.clone(),
            on_remove: self.on_remove.clone(),
        }
    }
}

impl<K, V> fmt::Debug for CacheHooks<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheHooks")
            .field("on_add_pass", &self.on_add_pass.is_some())
            .field("on_add_fail", &self.on_add_fail.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .finish()
    }
}

// == Notifier ==
/// Owns the background tasks spawned for hook invocations.
///
/// Tasks live in a `JoinSet`, so dropping the notifier aborts any
/// notification that has not started yet.
#[derive(Debug, Default)]
pub(crate) struct Notifier {
    tasks: Mutex<JoinSet<()>>,
    failures: Arc<AtomicU64>,
}

impl Notifier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // == Dispatch ==
    /// Schedules `task` on the current tokio runtime.
    ///
    /// Outside a runtime the notification is dropped and a warning is logged;
    /// the cache mutation that produced it has already completed.
    pub(crate) fn dispatch<F>(&self, event: CacheEvent, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime available, dropping {} notification", event);
            return;
        };

        let mut tasks = self.tasks.lock();
        // Reap finished notifications so the set does not grow unbounded
        while tasks.try_join_next().is_some() {}
        tasks.spawn_on(task, &handle);
    }

    // == Drain ==
    /// Waits until every dispatched notification has finished, including
    /// notifications dispatched by hooks while draining.
    pub(crate) async fn drain(&self) {
        loop {
            let mut pending = std::mem::take(&mut *self.tasks.lock());
            if pending.is_empty() {
                return;
            }
            while let Some(result) = pending.join_next().await {
                if let Err(err) = result {
                    if err.is_panic() {
                        warn!("Notification task panicked: {}", err);
                    }
                }
            }
        }
    }

    /// Dispatched notifications not yet reaped.
    pub(crate) fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Shared counter bumped by tasks whose hook failed.
    pub(crate) fn failure_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.failures)
    }

    pub(crate) fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}
