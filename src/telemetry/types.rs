//! Core data types for the ApiPulse telemetry layer
//!
//! This module defines the fundamental types used throughout the backend:
//! - `RequestSample`: a single observed HTTP request
//! - `EndpointStats`: per-endpoint aggregate for monitoring views
//! - `HealthState`: derived endpoint health classification
//! - `TimeRange`: a time interval for stats queries

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single observed HTTP request against a monitored API
///
/// One sample per request, reported by instrumented services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestSample {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Path template of the endpoint (e.g. "/api/users/:id")
    pub endpoint: String,
    /// HTTP method
    pub method: String,
    /// HTTP status code of the response
    pub status: u16,
    /// Request duration in milliseconds
    pub duration_ms: f64,
    /// Optional reporting source (service name)
    #[serde(default)]
    pub source: Option<String>,
}

impl RequestSample {
    /// Create a new sample with the current timestamp
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>, status: u16, duration_ms: f64) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis(),
            endpoint: endpoint.into(),
            method: method.into(),
            status,
            duration_ms,
            source: None,
        }
    }

    /// Builder method: set timestamp
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder method: set the reporting source
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether the response was an error (4xx or 5xx)
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Whether the response was a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/// Health classification of a monitored endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Error rate below the degraded threshold and recently seen
    Healthy,
    /// Elevated error rate
    Degraded,
    /// Majority of requests failing, or no traffic past the stale threshold
    Down,
}

impl HealthState {
    /// Error rate at which an endpoint counts as degraded
    pub const DEGRADED_THRESHOLD: f64 = 0.05;
    /// Error rate at which an endpoint counts as down
    pub const DOWN_THRESHOLD: f64 = 0.5;

    /// Classify from an error rate and staleness flag
    pub fn classify(error_rate: f64, stale: bool) -> Self {
        if stale || error_rate >= Self::DOWN_THRESHOLD {
            HealthState::Down
        } else if error_rate >= Self::DEGRADED_THRESHOLD {
            HealthState::Degraded
        } else {
            HealthState::Healthy
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Healthy => write!(f, "healthy"),
            HealthState::Degraded => write!(f, "degraded"),
            HealthState::Down => write!(f, "down"),
        }
    }
}

/// Aggregate statistics for a single endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EndpointStats {
    /// Path template of the endpoint
    pub endpoint: String,
    /// Total requests in the window
    pub request_count: usize,
    /// Requests with status >= 400
    pub error_count: usize,
    /// error_count / request_count (0.0 when empty)
    pub error_rate: f64,
    /// Minimum latency in ms
    pub min_latency_ms: f64,
    /// Average latency in ms
    pub avg_latency_ms: f64,
    /// Maximum latency in ms
    pub max_latency_ms: f64,
    /// Timestamp of the most recent sample
    pub last_seen: i64,
    /// Derived health classification
    pub health: HealthState,
}

/// A half-open time interval `[start, end)` in milliseconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    /// Create a range from explicit bounds
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// The last N minutes, ending now
    pub fn last_minutes(minutes: i64) -> Self {
        let end = Utc::now().timestamp_millis();
        Self {
            start: end - minutes * 60 * 1000,
            end,
        }
    }

    /// The last N hours, ending now
    pub fn last_hours(hours: i64) -> Self {
        Self::last_minutes(hours * 60)
    }

    /// Whether a timestamp falls inside the range
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp < self.end
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_builder() {
        let sample = RequestSample::new("/api/users", "GET", 200, 12.5)
            .timestamp(1_700_000_000_000)
            .source("gateway");

        assert_eq!(sample.endpoint, "/api/users");
        assert_eq!(sample.timestamp, 1_700_000_000_000);
        assert_eq!(sample.source.as_deref(), Some("gateway"));
        assert!(!sample.is_error());
    }

    #[test]
    fn test_sample_error_classification() {
        assert!(RequestSample::new("/a", "GET", 404, 1.0).is_error());
        assert!(RequestSample::new("/a", "GET", 503, 1.0).is_server_error());
        assert!(!RequestSample::new("/a", "GET", 301, 1.0).is_error());
    }

    #[test]
    fn test_health_classification() {
        assert_eq!(HealthState::classify(0.0, false), HealthState::Healthy);
        assert_eq!(HealthState::classify(0.05, false), HealthState::Degraded);
        assert_eq!(HealthState::classify(0.5, false), HealthState::Down);
        assert_eq!(HealthState::classify(0.0, true), HealthState::Down);
    }

    #[test]
    fn test_time_range_contains() {
        let range = TimeRange::new(1000, 2000);
        assert!(range.contains(1000));
        assert!(range.contains(1999));
        assert!(!range.contains(2000));
        assert!(!range.contains(999));
    }

    #[test]
    fn test_time_range_last_minutes() {
        let range = TimeRange::last_minutes(10);
        assert_eq!(range.duration_ms(), 10 * 60 * 1000);
    }
}
