//! ApiPulse Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Loaded from the first of `~/.config/apipulse/config.toml`,
//! `/etc/apipulse/config.toml`, `./config.toml`, with environment overrides:
//! - `APIPULSE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `APIPULSE_PORT`: Port to listen on (default: 8090)
//! - `APIPULSE_RETENTION_MINUTES`: Sample retention window (default: 1440)
//! - `APIPULSE_MAX_SAMPLES`: Per-endpoint sample cap (default: 10000)
//! - `APIPULSE_LOG_LEVEL` / `APIPULSE_LOG_FORMAT`: Logging overrides
//! - `RUST_LOG`: Log filter (default: info)

use apipulse::api::{serve, ApiConfig, AppState};
use apipulse::config::Config;
use apipulse::telemetry::{StoreConfig, TelemetryStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so logging settings apply
    let config = Config::load_default();

    init_tracing(&config);

    tracing::info!("Starting ApiPulse server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Retention: {} minutes, {} samples per endpoint",
        config.telemetry.retention_minutes,
        config.telemetry.max_samples_per_endpoint
    );

    // Initialize telemetry store
    let store_config = StoreConfig {
        max_samples_per_endpoint: config.telemetry.max_samples_per_endpoint,
        retention_minutes: config.telemetry.retention_minutes,
        stale_after_secs: config.telemetry.stale_after_secs,
    };
    let store = Arc::new(TelemetryStore::new(store_config));

    // Assemble API state
    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        request_timeout_ms: config.api.request_timeout_secs * 1000,
        ..Default::default()
    };
    let state = AppState::new(Arc::clone(&store), api_config.clone());

    // Run server
    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("ApiPulse server stopped");
    Ok(())
}

/// Initialize tracing from the logging config
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "apipulse={},tower_http=debug",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
