//! Request and Response models for the fingerprint cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BatchSeenRequest, SeenRequest};
pub use responses::{
    BatchSeenResponse, EntriesResponse, EntryView, HealthResponse, LookupResponse,
    RemoveResponse, SeenResponse, StatsResponse,
};
