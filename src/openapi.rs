use utoipa::OpenApi;

use crate::handlers;
use crate::models::{
    Axis, ChartFigure, ChartLayout, ChartTitle, CollectionCount, DailyCount, DashboardSnapshot,
    Marker, MarkerLine, Panel, QueueRow, QueueTable, TotalsEntry, TotalsSummary, Trace, TraceKind,
};
use crate::services::health_check::{DependencyHealth, DetailedHealthStatus, HealthCheckStatus};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Activity Dashboard API",
        description = "Database and message broker activity panels"
    ),
    paths(
        // Health
        handlers::health::health_check,
        handlers::health::detailed_health_check,

        // Dashboard panels
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_collections,
        handlers::dashboard::get_daily_transactions,
        handlers::dashboard::get_queues,
        handlers::dashboard::get_queue_history,
        handlers::dashboard::get_queue_totals,

        // Live feed and metrics
        handlers::websocket::websocket_handler,
        handlers::metrics::get_prometheus_metrics,
    ),
    components(schemas(
        handlers::health::HealthResponse,
        DetailedHealthStatus,
        DependencyHealth,
        HealthCheckStatus,
        DashboardSnapshot,
        Panel,
        ChartFigure,
        ChartLayout,
        ChartTitle,
        Axis,
        Trace,
        TraceKind,
        Marker,
        MarkerLine,
        QueueTable,
        QueueRow,
        TotalsSummary,
        TotalsEntry,
        CollectionCount,
        DailyCount,
    )),
    tags(
        (name = "health", description = "Service and dependency health"),
        (name = "dashboard", description = "Rendered dashboard panels"),
        (name = "websocket", description = "Live panel updates"),
        (name = "metrics", description = "Prometheus metrics")
    )
)]
pub struct ApiDoc;
