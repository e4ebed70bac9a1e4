//! Health check HTTP route handlers
//!
//! Provides endpoints for checking the health of the API and its backend:
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/ready` - Readiness check (pings the REST backend)
//! - `GET /health/live` - Kubernetes-style liveness probe

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use bookshelf_backend_client::BackendClient;
use serde::Serialize;

/// Status of an individual dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// Result of a single dependency check
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    pub name: &'static str,
    pub status: ServiceStatus,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Readiness response body
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    /// Healthy only if every dependency is healthy
    pub status: ServiceStatus,
    pub services: Vec<ServiceHealth>,
}

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    /// Client for the REST backend
    pub client: BackendClient,
}

impl HealthState {
    /// Create new health state around a backend client
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Simple health check - always returns OK if the server is running
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness probe
///
/// Does not touch the backend; that's what readiness is for.
async fn liveness_probe() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe
///
/// # Response
/// - 200 OK if the backend root answers
/// - 503 Service Unavailable otherwise
async fn readiness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    let started = Instant::now();
    let result = state.client.ping().await;
    let response_time_ms = started.elapsed().as_millis() as u64;

    let backend = match result {
        Ok(()) => ServiceHealth {
            name: "backend",
            status: ServiceStatus::Healthy,
            response_time_ms,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Backend readiness check failed");
            ServiceHealth {
                name: "backend",
                status: ServiceStatus::Unhealthy,
                response_time_ms,
                error: Some(e.to_string()),
            }
        }
    };

    let status = backend.status;
    let status_code = match status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(ReadinessResponse {
            status,
            services: vec![backend],
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health() {
        let response = simple_health().await;
        assert_eq!(response, "OK");
    }

    #[tokio::test]
    async fn test_liveness_probe() {
        let response = liveness_probe().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
