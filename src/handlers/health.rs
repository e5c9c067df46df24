use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::health_check::{DetailedHealthStatus, HealthCheckStatus};
use crate::services::HealthChecker;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Basic health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health of MongoDB and the broker management API
#[utoipa::path(
    get,
    path = "/api/v1/health/detailed",
    tag = "health",
    responses(
        (status = 200, description = "All dependencies reachable, possibly degraded", body = DetailedHealthStatus),
        (status = 503, description = "A dependency is unhealthy", body = DetailedHealthStatus)
    )
)]
pub async fn detailed_health_check(
    State(health_checker): State<HealthChecker>,
) -> (StatusCode, Json<DetailedHealthStatus>) {
    let status = health_checker.perform_health_check().await;

    let code = match status.status {
        HealthCheckStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthCheckStatus::Healthy | HealthCheckStatus::Degraded => StatusCode::OK,
    };

    (code, Json(status))
}
