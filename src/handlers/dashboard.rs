use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::{ChartFigure, DashboardSnapshot, QueueTable, TotalsSummary};
use crate::services::DashboardService;

/// Every panel's latest rendering
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Current dashboard panels", body = DashboardSnapshot)
    )
)]
pub async fn get_dashboard(State(dashboard): State<DashboardService>) -> Json<DashboardSnapshot> {
    Json(dashboard.snapshot().await)
}

/// Document count per collection
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/collections",
    tag = "dashboard",
    responses(
        (status = 200, description = "Collections bar chart", body = ChartFigure),
        (status = 404, description = "No census has run yet"),
        (status = 500, description = "The last census query failed"),
        (status = 503, description = "The database was unreachable for the last census")
    )
)]
pub async fn get_collections(
    State(dashboard): State<DashboardService>,
) -> Result<Json<ChartFigure>, ApiError> {
    dashboard
        .collections_panel()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Collections panel"))
}

/// Documents created per day, computed at startup
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/daily-transactions",
    tag = "dashboard",
    responses(
        (status = 200, description = "Daily transactions bar chart", body = ChartFigure)
    )
)]
pub async fn get_daily_transactions(
    State(dashboard): State<DashboardService>,
) -> Json<ChartFigure> {
    Json(dashboard.snapshot().await.daily_transactions)
}

/// Broker queue table
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/queues",
    tag = "dashboard",
    responses(
        (status = 200, description = "Queue table or unavailable message", body = QueueTable),
        (status = 404, description = "No queue refresh has completed yet")
    )
)]
pub async fn get_queues(
    State(dashboard): State<DashboardService>,
) -> Result<Json<QueueTable>, ApiError> {
    dashboard
        .snapshot()
        .await
        .queues
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Queues panel"))
}

/// Queued messages over the retained history window
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/queue-history",
    tag = "dashboard",
    responses(
        (status = 200, description = "Queue history line chart", body = ChartFigure)
    )
)]
pub async fn get_queue_history(State(dashboard): State<DashboardService>) -> Json<ChartFigure> {
    Json(dashboard.snapshot().await.queue_history)
}

/// Broker-wide queue totals
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/queue-totals",
    tag = "dashboard",
    responses(
        (status = 200, description = "Queue totals summary", body = TotalsSummary),
        (status = 404, description = "No history tick has completed yet")
    )
)]
pub async fn get_queue_totals(
    State(dashboard): State<DashboardService>,
) -> Result<Json<TotalsSummary>, ApiError> {
    dashboard
        .snapshot()
        .await
        .queue_totals
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Queue totals panel"))
}
