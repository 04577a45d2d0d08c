//! ApiPulse REST API
//!
//! HTTP API layer for ApiPulse, built with Axum.
//!
//! # Endpoints
//!
//! ## Ingest
//! - `POST /api/v1/ingest` - Single request sample
//! - `POST /api/v1/ingest/batch` - Batch of samples
//!
//! ## Stats
//! - `GET /api/v1/stats/overview` - Dashboard overview
//! - `GET /api/v1/endpoints` - Monitored endpoints with health state
//! - `GET /api/v1/endpoints/*endpoint` - Single endpoint detail
//! - `GET /api/v1/latency` - Latency summary and series
//! - `GET /api/v1/errors` - Recent errors and status breakdown
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Real-time streaming connection
//!
//! # Example
//!
//! ```rust,ignore
//! use apipulse::api::{serve, ApiConfig, AppState};
//! use apipulse::telemetry::{StoreConfig, TelemetryStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(TelemetryStore::new(StoreConfig::default()));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_size;

    let api_routes = Router::new()
        // Ingest routes
        .route("/ingest", post(routes::ingest::ingest_single))
        .route("/ingest/batch", post(routes::ingest::ingest_batch))
        // Stats routes
        .route("/stats/overview", get(routes::overview::get_overview))
        .route("/endpoints", get(routes::endpoints::list_endpoints))
        .route("/endpoints/*endpoint", get(routes::endpoints::get_endpoint))
        .route("/latency", get(routes::latency::get_latency))
        .route("/errors", get(routes::errors::get_errors))
        .layer(DefaultBodyLimit::max(body_limit))
        // WebSocket route
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("ApiPulse API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("ApiPulse API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{StoreConfig, TelemetryStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(TelemetryStore::new(StoreConfig::default()));
        let api_config = ApiConfig::default();

        let state = AppState::new(store, api_config);
        build_router(state)
    }

    async fn ingest(app: &Router, body: &str) -> StatusCode {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/ingest")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ingest_single() {
        let app = create_test_app();

        let status = ingest(
            &app,
            r#"{"endpoint": "/api/users", "method": "GET", "status": 200, "duration_ms": 12.5}"#,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_ingest_invalid_json() {
        let app = create_test_app();

        let status = ingest(&app, "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ingest_invalid_status_code() {
        let app = create_test_app();

        let status = ingest(
            &app,
            r#"{"endpoint": "/api/users", "method": "GET", "status": 999, "duration_ms": 1.0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ingest_batch_partial() {
        let app = create_test_app();

        let body = r#"{"samples": [
            {"endpoint": "/api/users", "method": "GET", "status": 200, "duration_ms": 10.0},
            {"endpoint": "", "method": "GET", "status": 200, "duration_ms": 10.0}
        ]}"#;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/ingest/batch")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::MULTI_STATUS);
    }

    #[tokio::test]
    async fn test_overview_after_ingest() {
        let app = create_test_app();

        let status = ingest(
            &app,
            r#"{"endpoint": "/api/users", "method": "GET", "status": 500, "duration_ms": 42.0}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/stats/overview")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["total_requests"], 1);
        assert_eq!(json["error_count"], 1);
    }

    #[tokio::test]
    async fn test_list_endpoints_empty() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/endpoints")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_unknown_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/endpoints/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_endpoint_detail() {
        let app = create_test_app();

        ingest(
            &app,
            r#"{"endpoint": "/api/users", "method": "GET", "status": 200, "duration_ms": 10.0}"#,
        )
        .await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/endpoints/api/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_latency_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/latency?minutes=30&buckets=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_errors_endpoint() {
        let app = create_test_app();

        ingest(
            &app,
            r#"{"endpoint": "/api/users", "method": "GET", "status": 503, "duration_ms": 5.0}"#,
        )
        .await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/errors")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["total_errors"], 1);
    }
}
