//! Latency Routes
//!
//! Response-time stats for the latency view.
//!
//! - GET /api/v1/latency

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{LatencyResponse, StatsQuery};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::telemetry::{bucketed_series, latency_summary};

use super::resolve_window;

/// Default bucket count for the latency series
const DEFAULT_BUCKETS: usize = 60;

/// GET /api/v1/latency
///
/// Latency summary (p50/p90/p95/p99) plus a bucketed series, optionally
/// filtered to a single endpoint.
pub async fn get_latency(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<LatencyResponse>> {
    let range = resolve_window(&state, &query);
    let buckets = query.buckets.unwrap_or(DEFAULT_BUCKETS).clamp(1, 500);

    let samples = match &query.endpoint {
        Some(endpoint) => state
            .store
            .samples(endpoint, range)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Endpoint '{}' not found", endpoint)))?,
        None => state.store.all_samples(range).await,
    };

    Ok(Json(LatencyResponse {
        range,
        endpoint: query.endpoint.clone(),
        summary: latency_summary(&samples),
        series: bucketed_series(&samples, range, buckets),
    }))
}
