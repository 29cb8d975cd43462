//! API Handlers
//!
//! HTTP request handlers for each fingerprint cache endpoint.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheHooks, SeenCache, SeenRecord};
use crate::error::{CacheError, Result};
use crate::models::{
    BatchSeenRequest, BatchSeenResponse, EntriesResponse, HealthResponse, LookupResponse,
    RemoveResponse, SeenRequest, SeenResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache handle is internally synchronized, so cloning the state is cheap
/// and needs no outer lock.
#[derive(Clone)]
pub struct AppState {
    pub cache: SeenCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: SeenCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration and lifecycle hooks.
    pub fn from_config(
        config: &crate::config::Config,
        hooks: CacheHooks<String, SeenRecord>,
    ) -> Result<Self> {
        let cache = SeenCache::with_hooks(config.max_items, hooks)?;
        Ok(Self::new(cache))
    }
}

/// Records one sighting and reports whether it was a repost.
fn record_sighting(
    cache: &SeenCache,
    fingerprint: String,
    attempted: SeenRecord,
    duplicate: bool,
) -> SeenResponse {
    if duplicate {
        // Report the original sighting; fall back to the attempt if it was
        // evicted in the meantime
        let stored = cache.get(&fingerprint).unwrap_or(attempted);
        SeenResponse::new(fingerprint, true, &stored)
    } else {
        SeenResponse::new(fingerprint, false, &attempted)
    }
}

/// Handler for PUT /seen
///
/// Inserts the fingerprint; `duplicate` is true if it was already cached.
pub async fn seen_handler(
    State(state): State<AppState>,
    Json(req): Json<SeenRequest>,
) -> Result<Json<SeenResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let record = SeenRecord::new(req.label);
    let outcome = state
        .cache
        .insert_one(req.fingerprint.clone(), record.clone());

    Ok(Json(record_sighting(
        &state.cache,
        req.fingerprint,
        record,
        outcome.is_rejected(),
    )))
}

/// Handler for PUT /seen/batch
///
/// Inserts every item in order. Each item succeeds or is rejected on its own.
pub async fn batch_seen_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchSeenRequest>,
) -> Result<Json<BatchSeenResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let pairs: Vec<(String, SeenRecord)> = req
        .items
        .into_iter()
        .map(|item| (item.fingerprint, SeenRecord::new(item.label)))
        .collect();
    let outcomes = state.cache.insert_many(pairs.clone());

    let results = pairs
        .into_iter()
        .zip(outcomes)
        .map(|((fingerprint, record), outcome)| {
            record_sighting(&state.cache, fingerprint, record, outcome.is_rejected())
        })
        .collect();

    Ok(Json(BatchSeenResponse::new(results)))
}

/// Handler for GET /seen/:fingerprint
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(fingerprint): Path<String>,
) -> Json<LookupResponse> {
    let record = state.cache.get(&fingerprint);
    Json(LookupResponse::new(fingerprint, record.as_ref()))
}

/// Handler for DELETE /seen/:fingerprint
///
/// Always succeeds; `removed` tells whether the fingerprint was cached.
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(fingerprint): Path<String>,
) -> Json<RemoveResponse> {
    let removed = state.cache.remove(&fingerprint).is_some();
    Json(RemoveResponse::new(fingerprint, removed))
}

/// Handler for GET /entries
///
/// Lists the cache contents oldest first for operator inspection.
pub async fn entries_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    Json(EntriesResponse::new(
        state.cache.max_items(),
        state.cache.entries(),
    ))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
