//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_MAX_ITEMS;
use crate::error::{CacheError, Result};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entry count at which the cache sweeps its oldest half
    pub max_items: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Age in seconds after which a fingerprint is forgotten (0 = never)
    pub seen_ttl: u64,
    /// Interval in seconds between expiry sweeps
    pub expiry_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ITEMS` - Cache capacity (default: 256)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SEEN_TTL` - Fingerprint lifetime in seconds, 0 disables (default: 86400)
    /// - `EXPIRY_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_items: env_or("MAX_ITEMS", defaults.max_items),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            seen_ttl: env_or("SEEN_TTL", defaults.seen_ttl),
            expiry_interval: env_or("EXPIRY_INTERVAL", defaults.expiry_interval),
        }
    }

    /// Checks that the configuration can actually run.
    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 {
            return Err(CacheError::InvalidConfig(
                "MAX_ITEMS must be at least 1".to_string(),
            ));
        }
        if self.expiry_enabled() && self.expiry_interval == 0 {
            return Err(CacheError::InvalidConfig(
                "EXPIRY_INTERVAL must be at least 1 when SEEN_TTL is set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn expiry_enabled(&self) -> bool {
        self.seen_ttl > 0
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            server_port: 3000,
            seen_ttl: 86_400,
            expiry_interval: 60,
        }
    }
}
