//! HTTP API Client
//!
//! Functions for communicating with the ApiPulse REST API.

use gloo_net::http::Request;

use crate::state::global::{EndpointRow, LatencySummary, Overview, SeriesBucket};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8090/api/v1";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("apipulse_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("apipulse_api_url", url);
        }
    }
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct EndpointListResponse {
    pub endpoints: Vec<EndpointRow>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LatencyResponse {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub summary: Option<LatencySummary>,
    pub series: Vec<SeriesBucket>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ErrorsResponse {
    pub total_errors: usize,
    pub error_rate: f64,
    pub breakdown: Vec<StatusCount>,
    pub recent: Vec<ErrorEvent>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct StatusCount {
    pub status: u16,
    pub count: usize,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ErrorEvent {
    pub timestamp: i64,
    pub endpoint: String,
    pub method: String,
    pub status: u16,
    pub duration_ms: f64,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub total_samples: usize,
    pub endpoint_count: usize,
    pub ws_connections: usize,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

/// Extract the server error message from a failed response
async fn error_message(response: gloo_net::http::Response) -> String {
    match response.json::<ApiErrorResponse>().await {
        Ok(body) => body.error.message,
        Err(_) => "Unknown error".to_string(),
    }
}

// ============ API Functions ============

/// Fetch the dashboard overview
pub async fn fetch_overview(minutes: i64) -> Result<Overview, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/stats/overview?minutes={}", api_base, minutes))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch monitored endpoints with health state
pub async fn fetch_endpoints(minutes: i64) -> Result<Vec<EndpointRow>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/endpoints?minutes={}", api_base, minutes))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: EndpointListResponse = response.json().await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.endpoints)
}

/// Fetch latency summary and series, optionally for a single endpoint
pub async fn fetch_latency(
    minutes: i64,
    buckets: usize,
    endpoint: Option<&str>,
) -> Result<LatencyResponse, String> {
    let api_base = get_api_base();

    let mut url = format!("{}/latency?minutes={}&buckets={}", api_base, minutes, buckets);
    if let Some(endpoint) = endpoint {
        url.push_str(&format!("&endpoint={}", endpoint));
    }

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch error tracking stats
pub async fn fetch_errors(minutes: i64, limit: usize) -> Result<ErrorsResponse, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/errors?minutes={}&limit={}", api_base, minutes, limit))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Check API health
pub async fn check_health() -> Result<HealthResponse, String> {
    let api_base = get_api_base();
    let health_url = api_base.replace("/api/v1", "/health");

    let response = Request::get(&health_url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err("API is not healthy".to_string());
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}
