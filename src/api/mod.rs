//! API Module
//!
//! HTTP handlers and routing for the fingerprint cache.
//!
//! # Endpoints
//! - `PUT /seen` - Record a fingerprint
//! - `PUT /seen/batch` - Record several fingerprints
//! - `GET /seen/:fingerprint` - Look up a fingerprint
//! - `DELETE /seen/:fingerprint` - Forget a fingerprint
//! - `GET /entries` - Inspect cache contents
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
