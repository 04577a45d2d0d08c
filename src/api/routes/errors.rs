//! Error Tracking Routes
//!
//! Recent error events and status-code breakdown for the error view.
//!
//! - GET /api/v1/errors

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ErrorsResponse, StatsQuery, StatusCount};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::telemetry::{error_rate, status_breakdown};

use super::resolve_window;

/// Default number of recent error events returned
const DEFAULT_LIMIT: usize = 50;

/// GET /api/v1/errors
///
/// Error responses (status >= 400) in the window: totals, a per-status
/// breakdown, and the most recent events, newest first.
pub async fn get_errors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<ErrorsResponse>> {
    let range = resolve_window(&state, &query);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 1000);

    let samples = state.store.all_samples(range).await;
    let rate = error_rate(&samples);

    let mut errors: Vec<_> = samples.into_iter().filter(|s| s.is_error()).collect();
    let total_errors = errors.len();

    let breakdown: Vec<StatusCount> = status_breakdown(&errors)
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();

    // Newest first for the event feed
    errors.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    errors.truncate(limit);

    Ok(Json(ErrorsResponse {
        range,
        total_errors,
        error_rate: rate,
        breakdown,
        recent: errors,
    }))
}
