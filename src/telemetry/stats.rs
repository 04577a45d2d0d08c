//! Statistics over request samples
//!
//! Pure functions that turn sample slices into the numbers the dashboard
//! views display: percentiles, error rates, status breakdowns, and
//! fixed-width time-bucketed series.

use serde::Serialize;
use std::collections::BTreeMap;

use super::types::{RequestSample, TimeRange};

/// Latency summary over a set of samples
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatencySummary {
    pub count: usize,
    pub min_ms: f64,
    pub avg_ms: f64,
    pub max_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

/// One bucket of a time-bucketed series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesBucket {
    /// Start of the bucket (ms since epoch)
    pub timestamp: i64,
    /// Requests in this bucket
    pub count: usize,
    /// Requests with status >= 400
    pub error_count: usize,
    /// Average latency in ms, 0.0 for empty buckets
    pub avg_latency_ms: f64,
}

/// Nearest-rank percentile on a sorted slice of durations
///
/// `q` is in `[0.0, 1.0]`. Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let rank = ((q * sorted.len() as f64).ceil() as usize).max(1);
    Some(sorted[rank - 1])
}

/// Compute the latency summary for a set of samples
///
/// Returns `None` when there are no samples, never NaN.
pub fn latency_summary(samples: &[RequestSample]) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }

    let mut durations: Vec<f64> = samples.iter().map(|s| s.duration_ms).collect();
    durations.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let sum: f64 = durations.iter().sum();
    let count = durations.len();

    Some(LatencySummary {
        count,
        min_ms: durations[0],
        avg_ms: sum / count as f64,
        max_ms: durations[count - 1],
        p50_ms: percentile(&durations, 0.50).unwrap_or(0.0),
        p90_ms: percentile(&durations, 0.90).unwrap_or(0.0),
        p95_ms: percentile(&durations, 0.95).unwrap_or(0.0),
        p99_ms: percentile(&durations, 0.99).unwrap_or(0.0),
    })
}

/// Fraction of samples with status >= 400, 0.0 when empty
pub fn error_rate(samples: &[RequestSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let errors = samples.iter().filter(|s| s.is_error()).count();
    errors as f64 / samples.len() as f64
}

/// Split a range into `buckets` fixed-width buckets and aggregate samples
///
/// Empty buckets are emitted with zero counts so charts get a contiguous
/// time axis. Samples outside the range are ignored.
pub fn bucketed_series(samples: &[RequestSample], range: TimeRange, buckets: usize) -> Vec<SeriesBucket> {
    let buckets = buckets.max(1);
    let width = (range.duration_ms() / buckets as i64).max(1);

    let mut counts = vec![0usize; buckets];
    let mut errors = vec![0usize; buckets];
    let mut latency_sums = vec![0f64; buckets];

    for sample in samples {
        if !range.contains(sample.timestamp) {
            continue;
        }
        let index = (((sample.timestamp - range.start) / width) as usize).min(buckets - 1);
        counts[index] += 1;
        latency_sums[index] += sample.duration_ms;
        if sample.is_error() {
            errors[index] += 1;
        }
    }

    (0..buckets)
        .map(|i| SeriesBucket {
            timestamp: range.start + i as i64 * width,
            count: counts[i],
            error_count: errors[i],
            avg_latency_ms: if counts[i] > 0 {
                latency_sums[i] / counts[i] as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Request counts grouped by status code, sorted by code
pub fn status_breakdown(samples: &[RequestSample]) -> BTreeMap<u16, usize> {
    let mut breakdown = BTreeMap::new();
    for sample in samples {
        *breakdown.entry(sample.status).or_insert(0) += 1;
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: i64, status: u16, duration_ms: f64) -> RequestSample {
        RequestSample::new("/api/test", "GET", status, duration_ms).timestamp(timestamp)
    }

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 0.5), None);
    }

    #[test]
    fn test_percentile_single() {
        assert_eq!(percentile(&[42.0], 0.5), Some(42.0));
        assert_eq!(percentile(&[42.0], 0.99), Some(42.0));
    }

    #[test]
    fn test_percentile_nearest_rank() {
        let sorted: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        assert_eq!(percentile(&sorted, 0.50), Some(50.0));
        assert_eq!(percentile(&sorted, 0.95), Some(95.0));
        assert_eq!(percentile(&sorted, 0.99), Some(99.0));
        assert_eq!(percentile(&sorted, 1.0), Some(100.0));
    }

    #[test]
    fn test_latency_summary() {
        let samples: Vec<_> = (1..=10).map(|i| sample(i, 200, i as f64 * 10.0)).collect();
        let summary = latency_summary(&samples).unwrap();

        assert_eq!(summary.count, 10);
        assert_eq!(summary.min_ms, 10.0);
        assert_eq!(summary.max_ms, 100.0);
        assert_eq!(summary.avg_ms, 55.0);
        assert_eq!(summary.p50_ms, 50.0);
    }

    #[test]
    fn test_latency_summary_empty() {
        assert_eq!(latency_summary(&[]), None);
    }

    #[test]
    fn test_error_rate() {
        let samples = vec![
            sample(1, 200, 1.0),
            sample(2, 200, 1.0),
            sample(3, 500, 1.0),
            sample(4, 404, 1.0),
        ];
        assert_eq!(error_rate(&samples), 0.5);
        assert_eq!(error_rate(&[]), 0.0);
    }

    #[test]
    fn test_bucketed_series_fills_empty_buckets() {
        let range = TimeRange::new(0, 1000);
        let samples = vec![sample(50, 200, 10.0), sample(950, 500, 30.0)];

        let series = bucketed_series(&samples, range, 10);
        assert_eq!(series.len(), 10);
        assert_eq!(series[0].count, 1);
        assert_eq!(series[0].avg_latency_ms, 10.0);
        assert_eq!(series[9].count, 1);
        assert_eq!(series[9].error_count, 1);
        // Middle buckets are present but empty
        assert_eq!(series[5].count, 0);
        assert_eq!(series[5].avg_latency_ms, 0.0);
    }

    #[test]
    fn test_bucketed_series_ignores_out_of_range() {
        let range = TimeRange::new(1000, 2000);
        let samples = vec![sample(500, 200, 10.0), sample(1500, 200, 10.0)];

        let series = bucketed_series(&samples, range, 4);
        let total: usize = series.iter().map(|b| b.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_status_breakdown() {
        let samples = vec![
            sample(1, 200, 1.0),
            sample(2, 200, 1.0),
            sample(3, 404, 1.0),
        ];
        let breakdown = status_breakdown(&samples);
        assert_eq!(breakdown.get(&200), Some(&2));
        assert_eq!(breakdown.get(&404), Some(&1));
        assert_eq!(breakdown.get(&500), None);
    }
}
