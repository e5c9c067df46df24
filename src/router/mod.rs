//! Router configuration

use axum::{middleware, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::constants::api::VERSION;
use crate::handlers::{
    self, health::health_check, metrics::get_prometheus_metrics, websocket::websocket_handler,
};
use crate::middleware::{metrics_middleware, request_logger_middleware};
use crate::openapi::ApiDoc;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    // Health check and metrics (always at root)
    let root = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(get_prometheus_metrics))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );

    // WebSocket endpoint
    let ws = Router::new().route("/ws", get(websocket_handler));

    let v1_api = Router::new()
        .nest("/dashboard", handlers::v1_dashboard_routes()) // GET /api/v1/dashboard/...
        .nest("/health", handlers::v1_health_routes()); // GET /api/v1/health/detailed

    let request_timeout = app_state.config.broker.timeout() * 2;

    root.merge(ws)
        .nest(&format!("/api/{}", VERSION), v1_api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logger_middleware))
                .layer(middleware::from_fn(metrics_middleware))
                .layer(TimeoutLayer::with_status_code(
                    axum::http::StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
