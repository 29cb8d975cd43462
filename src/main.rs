//! Repost Guard - A bounded fingerprint cache for duplicate detection
//!
//! Serves the fingerprint cache over HTTP with logging lifecycle hooks and
//! optional age-based expiry.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repost_guard::api::create_router;
use repost_guard::cache::{CacheHooks, SeenRecord};
use repost_guard::{spawn_expiry_task, AppState, Config};

/// Main entry point for the Repost Guard server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the fingerprint cache with logging hooks
/// 4. Start background expiry task (if enabled)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repost_guard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Repost Guard");

    let config = Config::from_env();
    config.validate()?;
    info!(
        "Configuration loaded: max_items={}, seen_ttl={}s, port={}, expiry_interval={}s",
        config.max_items, config.seen_ttl, config.server_port, config.expiry_interval
    );

    let state = AppState::from_config(&config, logging_hooks())?;
    info!("Fingerprint cache initialized");

    let expiry_handle = if config.expiry_enabled() {
        let handle = spawn_expiry_task(
            state.cache.clone(),
            config.seen_ttl,
            config.expiry_interval,
        );
        info!("Background expiry task started");
        Some(handle)
    } else {
        info!("Fingerprint expiry disabled");
        None
    };

    let cache = state.cache.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(expiry_handle))
        .await
        .context("server error")?;

    // Let in-flight hook notifications finish before exiting
    cache.drain_notifications().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Hooks that report cache activity through tracing.
fn logging_hooks() -> CacheHooks<String, SeenRecord> {
    CacheHooks::<String, SeenRecord>::new()
        .on_add_pass(|_cache, fingerprint, _record| async move {
            debug!("New fingerprint: {}", fingerprint);
            Ok(())
        })
        .on_add_fail(|cache, fingerprint, record: SeenRecord| async move {
            let original = cache.get(&fingerprint);
            info!(
                "Repost detected: {} (label={:?}, first seen {})",
                fingerprint,
                record.label,
                original
                    .map(|r| r.first_seen_rfc3339())
                    .unwrap_or_else(|| "unknown".to_string())
            );
            Ok(())
        })
        .on_remove(|_cache, fingerprint, record: SeenRecord| async move {
            debug!(
                "Evicted fingerprint: {} (age {}ms)",
                fingerprint,
                record.age_ms()
            );
            Ok(())
        })
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the expiry task and allows graceful shutdown.
async fn shutdown_signal(expiry_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = expiry_handle {
        handle.abort();
        warn!("Expiry task aborted");
    }
}
