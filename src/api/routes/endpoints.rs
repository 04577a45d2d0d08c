//! Endpoint Routes
//!
//! Monitored endpoint list and per-endpoint detail.
//!
//! - GET /api/v1/endpoints
//! - GET /api/v1/endpoints/*endpoint

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{EndpointDetailResponse, EndpointListResponse, StatsQuery};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::telemetry::{bucketed_series, latency_summary};

use super::resolve_window;

/// Default bucket count for detail series
const DEFAULT_BUCKETS: usize = 30;

/// GET /api/v1/endpoints
///
/// List all monitored endpoints with health state.
pub async fn list_endpoints(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<EndpointListResponse>> {
    let range = resolve_window(&state, &query);
    let endpoints = state.store.all_endpoint_stats(range).await;

    Ok(Json(EndpointListResponse { range, endpoints }))
}

/// GET /api/v1/endpoints/*endpoint
///
/// Detail for one monitored endpoint. The wildcard capture carries the
/// endpoint path; the leading slash the router strips is restored before
/// lookup. Unknown endpoints return 404.
pub async fn get_endpoint(
    State(state): State<Arc<AppState>>,
    Path(endpoint): Path<String>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<EndpointDetailResponse>> {
    let endpoint = normalize_endpoint(&endpoint);
    let range = resolve_window(&state, &query);

    let stats = state
        .store
        .endpoint_stats(&endpoint, range)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Endpoint '{}' not found", endpoint)))?;

    let samples = state
        .store
        .samples(&endpoint, range)
        .await
        .unwrap_or_default();

    let buckets = query.buckets.unwrap_or(DEFAULT_BUCKETS).clamp(1, 500);

    Ok(Json(EndpointDetailResponse {
        range,
        stats,
        latency: latency_summary(&samples),
        series: bucketed_series(&samples, range, buckets),
    }))
}

/// Restore the leading slash stripped by the wildcard capture
fn normalize_endpoint(raw: &str) -> String {
    if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{}", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("api/users"), "/api/users");
        assert_eq!(normalize_endpoint("/api/users"), "/api/users");
    }
}
