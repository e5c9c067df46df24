//! Application state shared across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Panel snapshots and refresh operations
    pub dashboard_service: services::DashboardService,
    /// WebSocket service for live panel updates
    pub websocket_service: services::WebSocketService,
    /// Health check service
    pub health_checker: services::HealthChecker,
    /// Prometheus recorder handle rendered at `/metrics`
    pub metrics: PrometheusHandle,
}

impl axum::extract::FromRef<AppState> for services::DashboardService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.dashboard_service.clone()
    }
}

impl axum::extract::FromRef<AppState> for services::WebSocketService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.websocket_service.clone()
    }
}

impl axum::extract::FromRef<AppState> for services::HealthChecker {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.health_checker.clone()
    }
}

impl axum::extract::FromRef<AppState> for PrometheusHandle {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.metrics.clone()
    }
}
