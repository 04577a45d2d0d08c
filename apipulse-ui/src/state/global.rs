//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

/// Stats window choices offered across the dashboard (minutes, label)
pub const WINDOWS: [(i64, &str); 4] = [
    (30, "30 daqiqa"),
    (60, "1 soat"),
    (360, "6 soat"),
    (1440, "24 soat"),
];

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Overview stats from the API
    pub overview: RwSignal<Option<Overview>>,
    /// Monitored endpoints with health state
    pub endpoints: RwSignal<Vec<EndpointRow>>,
    /// Most recent requests pushed over WebSocket, newest first
    pub live_feed: RwSignal<Vec<LiveRequest>>,
    /// Current stats window in minutes
    pub window_minutes: RwSignal<i64>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// Timestamp of the last update from the server
    pub last_update: RwSignal<Option<i64>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Overview stats from the API
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct Overview {
    pub total_requests: usize,
    pub error_count: usize,
    pub error_rate: f64,
    #[serde(default)]
    pub latency: Option<LatencySummary>,
    pub endpoints: Vec<EndpointRow>,
}

/// Latency summary from the API
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
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

/// One monitored endpoint row
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct EndpointRow {
    pub endpoint: String,
    pub request_count: usize,
    pub error_count: usize,
    pub error_rate: f64,
    pub min_latency_ms: f64,
    pub avg_latency_ms: f64,
    pub max_latency_ms: f64,
    pub last_seen: i64,
    pub health: String,
}

/// One bucket of a chart series
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct SeriesBucket {
    pub timestamp: i64,
    pub count: usize,
    pub error_count: usize,
    pub avg_latency_ms: f64,
}

/// A request event received over WebSocket
#[derive(Clone, Debug, PartialEq)]
pub struct LiveRequest {
    pub endpoint: String,
    pub method: String,
    pub status: u16,
    pub duration_ms: f64,
    pub timestamp: i64,
}

/// How many live requests to keep in the feed
const LIVE_FEED_CAPACITY: usize = 50;

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        overview: create_rw_signal(None),
        endpoints: create_rw_signal(Vec::new()),
        live_feed: create_rw_signal(Vec::new()),
        window_minutes: create_rw_signal(60),
        ws_connected: create_rw_signal(false),
        last_update: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Push a live request to the front of the feed, dropping the oldest
    pub fn push_live_request(&self, request: LiveRequest) {
        self.live_feed.update(|feed| {
            feed.insert(0, request);
            feed.truncate(LIVE_FEED_CAPACITY);
        });
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

/// Format a duration in milliseconds for display
pub fn format_ms(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else {
        format!("{:.0} ms", ms)
    }
}

/// Format a 0..1 rate as a percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Format a timestamp as time-of-day
pub fn format_time(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ms() {
        assert_eq!(format_ms(12.4), "12 ms");
        assert_eq!(format_ms(999.0), "999 ms");
        assert_eq!(format_ms(1500.0), "1.50 s");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0.0%");
        assert_eq!(format_rate(0.125), "12.5%");
        assert_eq!(format_rate(1.0), "100.0%");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00:00");
    }
}
