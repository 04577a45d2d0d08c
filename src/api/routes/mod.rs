//! API Route Handlers
//!
//! One module per resource, following the URL structure.

pub mod endpoints;
pub mod errors;
pub mod health;
pub mod ingest;
pub mod latency;
pub mod overview;

use crate::api::dto::StatsQuery;
use crate::api::state::AppState;
use crate::telemetry::TimeRange;

/// Resolve the stats window from query parameters
///
/// Falls back to the configured default window and clamps to at least
/// one minute.
pub(crate) fn resolve_window(state: &AppState, query: &StatsQuery) -> TimeRange {
    let minutes = query
        .minutes
        .unwrap_or(state.config.default_window_minutes)
        .max(1);
    TimeRange::last_minutes(minutes)
}
