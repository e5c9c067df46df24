use axum::{
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};

use crate::services::{DashboardService, WebSocketService};

/// Live feed of panel updates, starting with every panel produced so far
#[utoipa::path(
    get,
    path = "/ws",
    tag = "websocket",
    responses(
        (status = 101, description = "WebSocket connection upgraded")
    )
)]
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(websocket_service): State<WebSocketService>,
    State(dashboard): State<DashboardService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let initial = dashboard.snapshot().await.panels();
        websocket_service.register_client(socket, initial).await;
    })
}
