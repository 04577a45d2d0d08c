//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::telemetry::{EndpointStats, LatencySummary, RequestSample, SeriesBucket, TimeRange};

// ============================================
// INGEST DTOs
// ============================================

/// Single request sample ingest request
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Endpoint path template
    pub endpoint: String,
    /// HTTP method
    pub method: String,
    /// HTTP status code of the response
    pub status: u16,
    /// Request duration in milliseconds
    pub duration_ms: f64,
    /// Optional timestamp (ms since epoch), defaults to now
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Optional reporting source (service name)
    #[serde(default)]
    pub source: Option<String>,
}

/// Single sample ingest response
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// Status: "ok"
    pub status: String,
    /// Timestamp of the ingested sample
    pub timestamp: i64,
}

/// Batch ingest request
#[derive(Debug, Deserialize)]
pub struct BatchIngestRequest {
    /// Array of samples to ingest
    pub samples: Vec<IngestRequest>,
}

/// Batch ingest response
#[derive(Debug, Serialize)]
pub struct BatchIngestResponse {
    /// Status: "ok" or "partial"
    pub status: String,
    /// Number of samples accepted
    pub accepted: usize,
    /// Number of samples rejected
    pub rejected: usize,
    /// Errors for rejected samples
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchError>,
}

/// Error for a single sample in batch ingest
#[derive(Debug, Serialize)]
pub struct BatchError {
    /// Index of the failed sample
    pub index: usize,
    /// Error message
    pub error: String,
}

// ============================================
// STATS DTOs
// ============================================

/// Common query parameters for stats endpoints
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Window size in minutes, defaults to the configured window
    #[serde(default)]
    pub minutes: Option<i64>,
    /// Number of series buckets
    #[serde(default)]
    pub buckets: Option<usize>,
    /// Restrict to a single endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Maximum number of events to return
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Dashboard overview response
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    /// Window the stats cover
    pub range: TimeRange,
    /// Total requests in the window
    pub total_requests: usize,
    /// Requests with status >= 400
    pub error_count: usize,
    /// error_count / total_requests
    pub error_rate: f64,
    /// Latency summary, absent when there is no traffic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<LatencySummary>,
    /// Per-endpoint rows, sorted by endpoint
    pub endpoints: Vec<EndpointStats>,
}

/// Monitored endpoint list response
#[derive(Debug, Serialize)]
pub struct EndpointListResponse {
    /// Window the stats cover
    pub range: TimeRange,
    /// Per-endpoint stats with health state, sorted by endpoint
    pub endpoints: Vec<EndpointStats>,
}

/// Single endpoint detail response
#[derive(Debug, Serialize)]
pub struct EndpointDetailResponse {
    /// Window the stats cover
    pub range: TimeRange,
    /// Aggregate stats for the endpoint
    pub stats: EndpointStats,
    /// Latency summary, absent when there is no traffic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<LatencySummary>,
    /// Bucketed request series
    pub series: Vec<SeriesBucket>,
}

/// Latency stats response
#[derive(Debug, Serialize)]
pub struct LatencyResponse {
    /// Window the stats cover
    pub range: TimeRange,
    /// Endpoint filter, if one was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Latency summary, absent when there is no traffic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<LatencySummary>,
    /// Bucketed latency series
    pub series: Vec<SeriesBucket>,
}

/// Count of requests for one status code
#[derive(Debug, Serialize)]
pub struct StatusCount {
    /// HTTP status code
    pub status: u16,
    /// Number of requests
    pub count: usize,
}

/// Error tracking response
#[derive(Debug, Serialize)]
pub struct ErrorsResponse {
    /// Window the stats cover
    pub range: TimeRange,
    /// Total error responses in the window
    pub total_errors: usize,
    /// Error rate across all traffic in the window
    pub error_rate: f64,
    /// Counts grouped by status code, ascending
    pub breakdown: Vec<StatusCount>,
    /// Most recent error samples, newest first
    pub recent: Vec<RequestSample>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
    /// Samples retained across all endpoints
    pub total_samples: usize,
    /// Number of known endpoints
    pub endpoint_count: usize,
    /// Active WebSocket connections
    pub ws_connections: usize,
}
