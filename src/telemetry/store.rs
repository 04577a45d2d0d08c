//! In-memory telemetry store
//!
//! Holds a bounded window of request samples per endpoint. The dashboard is
//! a live view, not an archive: samples age out by retention time and each
//! endpoint's buffer is capped, with eviction on insert.

use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

use super::stats;
use super::types::{EndpointStats, HealthState, RequestSample, TimeRange};

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum samples retained per endpoint
    pub max_samples_per_endpoint: usize,
    /// Samples older than this are evicted
    pub retention_minutes: i64,
    /// An endpoint with no samples for this long counts as down
    pub stale_after_secs: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_samples_per_endpoint: 10_000,
            retention_minutes: 24 * 60,
            stale_after_secs: 300,
        }
    }
}

/// Store-level counters for health reporting
#[derive(Debug, Clone, serde::Serialize, PartialEq)]
pub struct StoreStats {
    /// Samples currently retained across all endpoints
    pub total_samples: usize,
    /// Number of known endpoints
    pub endpoint_count: usize,
}

/// Thread-safe in-memory store of request samples, keyed by endpoint
pub struct TelemetryStore {
    /// Endpoint -> samples ordered by insertion (newest last)
    samples: RwLock<HashMap<String, VecDeque<RequestSample>>>,
    config: StoreConfig,
}

impl TelemetryStore {
    /// Create a new store
    pub fn new(config: StoreConfig) -> Self {
        Self {
            samples: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Record a sample, evicting expired and overflow samples for the endpoint
    pub async fn record(&self, sample: RequestSample) {
        let retention_ms = self.config.retention_minutes * 60 * 1000;
        let cutoff = sample.timestamp - retention_ms;

        let mut map = self.samples.write().await;
        let buffer = map.entry(sample.endpoint.clone()).or_default();
        buffer.push_back(sample);

        while let Some(front) = buffer.front() {
            if front.timestamp < cutoff || buffer.len() > self.config.max_samples_per_endpoint {
                buffer.pop_front();
            } else {
                break;
            }
        }
    }

    /// Snapshot of one endpoint's samples inside a range
    ///
    /// Returns `None` when the endpoint is unknown.
    pub async fn samples(&self, endpoint: &str, range: TimeRange) -> Option<Vec<RequestSample>> {
        let map = self.samples.read().await;
        let buffer = map.get(endpoint)?;
        Some(
            buffer
                .iter()
                .filter(|s| range.contains(s.timestamp))
                .cloned()
                .collect(),
        )
    }

    /// Snapshot of all samples inside a range, across endpoints
    pub async fn all_samples(&self, range: TimeRange) -> Vec<RequestSample> {
        let map = self.samples.read().await;
        let mut out: Vec<RequestSample> = map
            .values()
            .flat_map(|buffer| buffer.iter().filter(|s| range.contains(s.timestamp)).cloned())
            .collect();
        out.sort_by_key(|s| s.timestamp);
        out
    }

    /// Known endpoint names, sorted
    pub async fn endpoints(&self) -> Vec<String> {
        let map = self.samples.read().await;
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        names
    }

    /// Aggregate stats for one endpoint over a range
    ///
    /// Returns `None` when the endpoint is unknown. Known endpoints with no
    /// samples in the range report zero counts and a `Down` health state.
    pub async fn endpoint_stats(&self, endpoint: &str, range: TimeRange) -> Option<EndpointStats> {
        let samples = self.samples(endpoint, range).await?;
        Some(self.aggregate(endpoint, &samples, range))
    }

    /// Aggregate stats for every known endpoint over a range, sorted by name
    pub async fn all_endpoint_stats(&self, range: TimeRange) -> Vec<EndpointStats> {
        let map = self.samples.read().await;
        let mut out: Vec<EndpointStats> = map
            .iter()
            .map(|(endpoint, buffer)| {
                let samples: Vec<RequestSample> = buffer
                    .iter()
                    .filter(|s| range.contains(s.timestamp))
                    .cloned()
                    .collect();
                self.aggregate(endpoint, &samples, range)
            })
            .collect();
        out.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
        out
    }

    /// Store-level counters
    pub async fn stats(&self) -> StoreStats {
        let map = self.samples.read().await;
        StoreStats {
            total_samples: map.values().map(|b| b.len()).sum(),
            endpoint_count: map.len(),
        }
    }

    fn aggregate(&self, endpoint: &str, samples: &[RequestSample], range: TimeRange) -> EndpointStats {
        let request_count = samples.len();
        let error_count = samples.iter().filter(|s| s.is_error()).count();
        let error_rate = stats::error_rate(samples);
        let last_seen = samples.iter().map(|s| s.timestamp).max().unwrap_or(0);

        let stale = last_seen < range.end - self.config.stale_after_secs * 1000;

        let (min, avg, max) = if request_count > 0 {
            let sum: f64 = samples.iter().map(|s| s.duration_ms).sum();
            let min = samples.iter().map(|s| s.duration_ms).fold(f64::INFINITY, f64::min);
            let max = samples.iter().map(|s| s.duration_ms).fold(f64::NEG_INFINITY, f64::max);
            (min, sum / request_count as f64, max)
        } else {
            (0.0, 0.0, 0.0)
        };

        EndpointStats {
            endpoint: endpoint.to_string(),
            request_count,
            error_count,
            error_rate,
            min_latency_ms: min,
            avg_latency_ms: avg,
            max_latency_ms: max,
            last_seen,
            health: HealthState::classify(error_rate, stale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(endpoint: &str, status: u16, duration_ms: f64) -> RequestSample {
        RequestSample::new(endpoint, "GET", status, duration_ms)
    }

    #[tokio::test]
    async fn test_record_and_read_back() {
        let store = TelemetryStore::new(StoreConfig::default());
        store.record(sample("/api/users", 200, 12.0)).await;
        store.record(sample("/api/users", 200, 15.0)).await;
        store.record(sample("/api/orders", 500, 80.0)).await;

        let range = TimeRange::last_minutes(5);
        let users = store.samples("/api/users", range).await.unwrap();
        assert_eq!(users.len(), 2);

        assert_eq!(store.endpoints().await, vec!["/api/orders", "/api/users"]);
        assert!(store.samples("/api/unknown", range).await.is_none());
    }

    #[tokio::test]
    async fn test_capacity_eviction() {
        let config = StoreConfig {
            max_samples_per_endpoint: 3,
            ..Default::default()
        };
        let store = TelemetryStore::new(config);

        for i in 0..5 {
            store.record(sample("/api/users", 200, i as f64)).await;
        }

        let range = TimeRange::last_minutes(5);
        let samples = store.samples("/api/users", range).await.unwrap();
        assert_eq!(samples.len(), 3);
        // Oldest samples evicted first
        assert_eq!(samples[0].duration_ms, 2.0);
    }

    #[tokio::test]
    async fn test_retention_eviction() {
        let config = StoreConfig {
            retention_minutes: 10,
            ..Default::default()
        };
        let store = TelemetryStore::new(config);
        let now = Utc::now().timestamp_millis();

        store
            .record(sample("/api/users", 200, 1.0).timestamp(now - 20 * 60 * 1000))
            .await;
        store.record(sample("/api/users", 200, 2.0).timestamp(now)).await;

        let all = store.all_samples(TimeRange::new(0, now + 1)).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].duration_ms, 2.0);
    }

    #[tokio::test]
    async fn test_endpoint_stats() {
        let store = TelemetryStore::new(StoreConfig::default());
        store.record(sample("/api/users", 200, 10.0)).await;
        store.record(sample("/api/users", 200, 20.0)).await;
        store.record(sample("/api/users", 500, 30.0)).await;
        store.record(sample("/api/users", 503, 40.0)).await;

        let stats = store
            .endpoint_stats("/api/users", TimeRange::last_minutes(5))
            .await
            .unwrap();

        assert_eq!(stats.request_count, 4);
        assert_eq!(stats.error_count, 2);
        assert_eq!(stats.error_rate, 0.5);
        assert_eq!(stats.min_latency_ms, 10.0);
        assert_eq!(stats.max_latency_ms, 40.0);
        assert_eq!(stats.avg_latency_ms, 25.0);
        assert_eq!(stats.health, HealthState::Down);
    }

    #[tokio::test]
    async fn test_stale_endpoint_reports_down() {
        let config = StoreConfig {
            stale_after_secs: 60,
            ..Default::default()
        };
        let store = TelemetryStore::new(config);
        let now = Utc::now().timestamp_millis();

        store
            .record(sample("/api/users", 200, 5.0).timestamp(now - 5 * 60 * 1000))
            .await;

        let stats = store
            .endpoint_stats("/api/users", TimeRange::last_minutes(30))
            .await
            .unwrap();
        assert_eq!(stats.health, HealthState::Down);
    }

    #[tokio::test]
    async fn test_store_stats() {
        let store = TelemetryStore::new(StoreConfig::default());
        store.record(sample("/a", 200, 1.0)).await;
        store.record(sample("/b", 200, 1.0)).await;
        store.record(sample("/b", 200, 1.0)).await;

        let stats = store.stats().await;
        assert_eq!(stats.total_samples, 3);
        assert_eq!(stats.endpoint_count, 2);
    }
}
