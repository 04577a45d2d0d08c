//! Ingest Routes
//!
//! Endpoints for ingesting request telemetry from instrumented services.
//!
//! - POST /api/v1/ingest - Single sample
//! - POST /api/v1/ingest/batch - Batch of samples

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{
    BatchError, BatchIngestRequest, BatchIngestResponse, IngestRequest, IngestResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::telemetry::RequestSample;
use crate::websocket::WsEvent;

/// POST /api/v1/ingest
///
/// Ingest a single request sample.
pub async fn ingest_single(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IngestRequest>,
) -> ApiResult<(StatusCode, Json<IngestResponse>)> {
    // Validate request
    validate_ingest_request(&req)?;

    let timestamp = req.timestamp.unwrap_or_else(|| Utc::now().timestamp_millis());
    let sample = build_sample(&req, timestamp);

    // Publish to WebSocket subscribers, then record
    let event = WsEvent::request(&sample);
    state.store.record(sample).await;
    state.ws_hub.publish(event);

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            status: "ok".to_string(),
            timestamp,
        }),
    ))
}

/// POST /api/v1/ingest/batch
///
/// Ingest multiple request samples in a single request.
pub async fn ingest_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchIngestRequest>,
) -> ApiResult<(StatusCode, Json<BatchIngestResponse>)> {
    // Validate batch size
    if req.samples.is_empty() {
        return Err(ApiError::Validation("Empty batch".to_string()));
    }

    if req.samples.len() > state.config.max_batch_size {
        return Err(ApiError::Validation(format!(
            "Batch size exceeds maximum of {} samples",
            state.config.max_batch_size
        )));
    }

    let mut accepted = 0;
    let mut errors = Vec::new();

    for (index, sample_req) in req.samples.into_iter().enumerate() {
        match process_single_sample(&state, sample_req).await {
            Ok(_) => accepted += 1,
            Err(e) => {
                errors.push(BatchError {
                    index,
                    error: e.to_string(),
                });
            }
        }
    }

    let status = if errors.is_empty() {
        StatusCode::CREATED
    } else if accepted > 0 {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::BAD_REQUEST
    };

    let status_str = if errors.is_empty() { "ok" } else { "partial" };

    Ok((
        status,
        Json(BatchIngestResponse {
            status: status_str.to_string(),
            accepted,
            rejected: errors.len(),
            errors,
        }),
    ))
}

/// Validate an ingest request
fn validate_ingest_request(req: &IngestRequest) -> ApiResult<()> {
    if req.endpoint.is_empty() {
        return Err(ApiError::Validation("Endpoint cannot be empty".to_string()));
    }

    if !req.endpoint.starts_with('/') {
        return Err(ApiError::Validation(
            "Endpoint must start with '/'".to_string(),
        ));
    }

    if req.endpoint.len() > 200 {
        return Err(ApiError::Validation(
            "Endpoint exceeds maximum length of 200 characters".to_string(),
        ));
    }

    if req.method.is_empty() || req.method.len() > 16 {
        return Err(ApiError::Validation(
            "Method must be between 1 and 16 characters".to_string(),
        ));
    }

    if !(100..=599).contains(&req.status) {
        return Err(ApiError::Validation(
            "Status must be a valid HTTP status code (100-599)".to_string(),
        ));
    }

    if !req.duration_ms.is_finite() || req.duration_ms < 0.0 {
        return Err(ApiError::Validation(
            "Duration must be a finite non-negative number".to_string(),
        ));
    }

    // Validate timestamp if provided (not too far in the past or future)
    if let Some(ts) = req.timestamp {
        let now = Utc::now().timestamp_millis();
        let one_day_ms = 24 * 60 * 60 * 1000_i64;

        if ts < now - 30 * one_day_ms {
            return Err(ApiError::Validation(
                "Timestamp is more than 30 days in the past".to_string(),
            ));
        }

        if ts > now + one_day_ms {
            return Err(ApiError::Validation(
                "Timestamp is more than 1 day in the future".to_string(),
            ));
        }
    }

    if let Some(source) = &req.source {
        if source.len() > 100 {
            return Err(ApiError::Validation(
                "Source exceeds maximum length of 100 characters".to_string(),
            ));
        }
    }

    Ok(())
}

/// Build a sample from a validated request
fn build_sample(req: &IngestRequest, timestamp: i64) -> RequestSample {
    let mut sample = RequestSample::new(
        req.endpoint.clone(),
        req.method.to_uppercase(),
        req.status,
        req.duration_ms,
    )
    .timestamp(timestamp);

    if let Some(source) = &req.source {
        sample = sample.source(source.clone());
    }

    sample
}

/// Process a single sample from batch
async fn process_single_sample(state: &AppState, req: IngestRequest) -> ApiResult<()> {
    validate_ingest_request(&req)?;

    let timestamp = req.timestamp.unwrap_or_else(|| Utc::now().timestamp_millis());
    let sample = build_sample(&req, timestamp);

    let event = WsEvent::request(&sample);
    state.store.record(sample).await;
    state.ws_hub.publish(event);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> IngestRequest {
        IngestRequest {
            endpoint: "/api/users".to_string(),
            method: "GET".to_string(),
            status: 200,
            duration_ms: 12.5,
            timestamp: None,
            source: None,
        }
    }

    #[test]
    fn test_validate_ingest_request_valid() {
        assert!(validate_ingest_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_validate_ingest_request_empty_endpoint() {
        let req = IngestRequest {
            endpoint: "".to_string(),
            ..valid_request()
        };
        assert!(validate_ingest_request(&req).is_err());
    }

    #[test]
    fn test_validate_ingest_request_relative_endpoint() {
        let req = IngestRequest {
            endpoint: "api/users".to_string(),
            ..valid_request()
        };
        assert!(validate_ingest_request(&req).is_err());
    }

    #[test]
    fn test_validate_ingest_request_invalid_status() {
        let req = IngestRequest {
            status: 99,
            ..valid_request()
        };
        assert!(validate_ingest_request(&req).is_err());

        let req = IngestRequest {
            status: 600,
            ..valid_request()
        };
        assert!(validate_ingest_request(&req).is_err());
    }

    #[test]
    fn test_validate_ingest_request_invalid_duration() {
        let req = IngestRequest {
            duration_ms: f64::INFINITY,
            ..valid_request()
        };
        assert!(validate_ingest_request(&req).is_err());

        let req = IngestRequest {
            duration_ms: -1.0,
            ..valid_request()
        };
        assert!(validate_ingest_request(&req).is_err());
    }

    #[test]
    fn test_build_sample_uppercases_method() {
        let req = IngestRequest {
            method: "get".to_string(),
            ..valid_request()
        };
        let sample = build_sample(&req, 1_700_000_000_000);
        assert_eq!(sample.method, "GET");
        assert_eq!(sample.timestamp, 1_700_000_000_000);
    }
}
