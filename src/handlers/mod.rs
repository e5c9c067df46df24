pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod websocket;

use axum::{routing::get, Router};

use crate::app_state::AppState;

/// Build v1 dashboard routes
pub fn v1_dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::get_dashboard)) // GET /api/v1/dashboard
        .route("/collections", get(dashboard::get_collections))
        .route("/daily-transactions", get(dashboard::get_daily_transactions))
        .route("/queues", get(dashboard::get_queues))
        .route("/queue-history", get(dashboard::get_queue_history))
        .route("/queue-totals", get(dashboard::get_queue_totals))
}

/// Build v1 health routes
pub fn v1_health_routes() -> Router<AppState> {
    Router::new().route("/detailed", get(health::detailed_health_check)) // GET /api/v1/health/detailed
}
