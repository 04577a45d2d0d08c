//! Overview Route
//!
//! Aggregate stats for the dashboard landing view.
//!
//! - GET /api/v1/stats/overview

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{OverviewResponse, StatsQuery};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::telemetry::{error_rate, latency_summary};

use super::resolve_window;

/// GET /api/v1/stats/overview
///
/// Totals, error rate, latency summary, and per-endpoint rows for the
/// requested window.
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<OverviewResponse>> {
    let range = resolve_window(&state, &query);

    let samples = state.store.all_samples(range).await;
    let endpoints = state.store.all_endpoint_stats(range).await;

    let error_count = samples.iter().filter(|s| s.is_error()).count();

    Ok(Json(OverviewResponse {
        range,
        total_requests: samples.len(),
        error_count,
        error_rate: error_rate(&samples),
        latency: latency_summary(&samples),
        endpoints,
    }))
}
