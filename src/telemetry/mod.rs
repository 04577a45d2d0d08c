//! Telemetry layer
//!
//! Request-sample model, the in-memory retention store, and the statistics
//! that power the dashboard views.

pub mod stats;
pub mod store;
pub mod types;

pub use stats::{bucketed_series, error_rate, latency_summary, percentile, status_breakdown, LatencySummary, SeriesBucket};
pub use store::{StoreConfig, StoreStats, TelemetryStore};
pub use types::{EndpointStats, HealthState, RequestSample, TimeRange};
