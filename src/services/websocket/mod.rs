pub mod types;

use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub use types::*;

use crate::middleware::metrics::track_websocket_connection;
use crate::models::Panel;

/// Fan-out of panel updates to connected browsers
#[derive(Clone, Debug, Default)]
pub struct WebSocketService {
    clients: Arc<RwLock<FxHashMap<Uuid, mpsc::UnboundedSender<DashboardEvent>>>>,
}

impl WebSocketService {
    pub fn new() -> Self {
        info!("🔌 Initializing WebSocket service for live dashboard updates");
        Self::default()
    }

    /// Register a new WebSocket client.
    ///
    /// `initial` panels are sent right after the welcome message so a new
    /// browser does not wait for the next tick of every panel.
    pub async fn register_client(&self, socket: WebSocket, initial: Vec<Panel>) -> Uuid {
        let client_id = Uuid::new_v4();
        let (mut sender, mut receiver) = socket.split();
        let mut rx = self.subscribe(client_id).await;

        info!(
            "✅ WebSocket client connected: {} ({} connected)",
            client_id,
            self.client_count().await
        );
        track_websocket_connection(true);

        // Forward dashboard events to this client
        let clients = self.clients.clone();
        tokio::spawn(async move {
            let welcome = serde_json::json!({
                "type": "connected",
                "client_id": client_id.to_string(),
                "message": "Connected to activity dashboard feed"
            });

            if let Ok(json) = serde_json::to_string(&welcome) {
                let _ = sender.send(Message::Text(json.into())).await;
            }

            let mut open = true;
            for panel in initial {
                if !send_event(&mut sender, client_id, &DashboardEvent::panel_updated(panel)).await {
                    open = false;
                    break;
                }
            }

            while open {
                match rx.recv().await {
                    Some(event) => open = send_event(&mut sender, client_id, &event).await,
                    None => break,
                }
            }

            clients.write().await.remove(&client_id);
            track_websocket_connection(false);
            info!("❌ WebSocket client disconnected: {}", client_id);
        });

        // Drain incoming frames; a close frame ends the forwarder via channel drop
        let clients = self.clients.clone();
        tokio::spawn(async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Close(_) => break,
                    Message::Text(text) => debug!("Ignoring client message: {}", text.as_str()),
                    _ => {}
                }
            }
            clients.write().await.remove(&client_id);
        });

        client_id
    }

    /// Add a subscriber and return its event receiver
    pub async fn subscribe(&self, client_id: Uuid) -> mpsc::UnboundedReceiver<DashboardEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.clients.write().await.insert(client_id, tx);
        rx
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Broadcast an event to all connected clients
    pub async fn broadcast(&self, event: DashboardEvent) {
        let clients = self.clients.read().await;
        if clients.is_empty() {
            return;
        }

        debug!("📢 Broadcasting event to {} clients", clients.len());

        for (client_id, tx) in clients.iter() {
            if let Err(e) = tx.send(event.clone()) {
                warn!("Failed to send event to client {}: {}", client_id, e);
            }
        }
    }
}

/// Serialize and send one event; `false` once the socket is gone
async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    client_id: Uuid,
    event: &DashboardEvent,
) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => match sender.send(Message::Text(json.into())).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send message to client {}: {}", client_id, e);
                false
            }
        },
        Err(e) => {
            error!("Failed to serialize event: {}", e);
            true
        }
    }
}
