use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Detailed health status of the dashboard and its data sources
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetailedHealthStatus {
    pub status: HealthCheckStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
    pub dependencies: Vec<DependencyHealth>,
}

/// Dependency health information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DependencyHealth {
    pub name: String,
    pub status: HealthCheckStatus,
    pub response_time_ms: Option<u64>,
    pub last_check: DateTime<Utc>,
    pub error_message: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthCheckStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthCheckStatus {
    /// Overall status: healthy only if everything is, unhealthy if anything is
    pub fn combine<'a>(statuses: impl IntoIterator<Item = &'a HealthCheckStatus>) -> Self {
        let mut overall = HealthCheckStatus::Healthy;
        for status in statuses {
            match status {
                HealthCheckStatus::Unhealthy => return HealthCheckStatus::Unhealthy,
                HealthCheckStatus::Degraded => overall = HealthCheckStatus::Degraded,
                HealthCheckStatus::Healthy => {}
            }
        }
        overall
    }
}
