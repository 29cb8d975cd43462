//! Fingerprint Expiry Task
//!
//! The cache itself has no notion of time. This task gives the service
//! age-based expiry by periodically purging records whose first sighting is
//! older than the configured lifetime.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SeenCache;

/// Spawns a background task that periodically forgets stale fingerprints.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Removal goes through `purge`, so no eviction hooks fire.
///
/// # Arguments
/// * `cache` - handle to the shared fingerprint cache
/// * `ttl_secs` - age in seconds after which a fingerprint is forgotten
/// * `interval_secs` - interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = SeenCache::new(256)?;
/// let expiry_handle = spawn_expiry_task(cache.clone(), 86_400, 60);
/// // Later, during shutdown:
/// expiry_handle.abort();
/// ```
pub fn spawn_expiry_task(cache: SeenCache, ttl_secs: u64, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry task: ttl={}s, interval={}s",
            ttl_secs, interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge(|_, record| record.is_older_than(ttl_secs));

            if removed > 0 {
                info!("Expiry: forgot {} stale fingerprints", removed);
            } else {
                debug!("Expiry: no stale fingerprints found");
            }
        }
    })
}
