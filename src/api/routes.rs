//! API Routes
//!
//! Configures the Axum router with all fingerprint cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    batch_seen_handler, entries_handler, health_handler, lookup_handler, remove_handler,
    seen_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /seen` - Record a fingerprint, reporting duplicates
/// - `PUT /seen/batch` - Record several fingerprints in order
/// - `GET /seen/:fingerprint` - Check whether a fingerprint is cached
/// - `DELETE /seen/:fingerprint` - Forget a fingerprint
/// - `GET /entries` - List cached fingerprints, oldest first
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/seen", put(seen_handler))
        .route("/seen/batch", put(batch_seen_handler))
        .route(
            "/seen/:fingerprint",
            get(lookup_handler).delete(remove_handler),
        )
        .route("/entries", get(entries_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
