//! # ApiPulse
//!
//! API monitoring backend - a full-stack Rust application that collects
//! request telemetry from instrumented services and serves live statistics
//! to the dashboard.
//!
//! ## Features
//!
//! - **In-memory retention**: bounded per-endpoint sample buffers, no disk
//! - **Monitoring stats**: error rates, health states, latency percentiles
//! - **Real-time**: WebSocket streaming of request events to dashboards
//! - **REST API**: ingest and stats endpoints built with Axum
//!
//! ## Modules
//!
//! - [`telemetry`]: Sample model, retention store, and statistics
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Real-time streaming hub
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apipulse::telemetry::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize the store
//!     let store = TelemetryStore::new(StoreConfig::default());
//!
//!     // Record observed requests
//!     store
//!         .record(RequestSample::new("/api/users", "GET", 200, 12.5).source("gateway"))
//!         .await;
//!
//!     // Read stats for the last hour
//!     let range = TimeRange::last_minutes(60);
//!     let stats = store.endpoint_stats("/api/users", range).await;
//!
//!     println!("Stats: {:?}", stats);
//! }
//! ```

pub mod api;
pub mod config;
pub mod telemetry;
pub mod websocket;

// Re-export top-level types for convenience
pub use telemetry::{
    EndpointStats, HealthState, LatencySummary, RequestSample, SeriesBucket, StoreConfig,
    StoreStats, TelemetryStore, TimeRange,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{
    websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage, WsEvent,
};

pub use config::{
    ApiConfig as ConfigApiConfig, Config, ConfigError, LoggingConfig, TelemetryConfig,
};
