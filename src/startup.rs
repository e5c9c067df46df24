//! Application startup and initialization logic

use std::sync::Arc;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use crate::app_state::AppState;
use crate::config::Config;
use crate::database::{self, DocumentStore};
use crate::services;

/// Connect to MongoDB and the broker, aggregate daily transactions and build
/// the AppState.
///
/// Fails before anything is served if the database is unreachable or a
/// document lacks its creation timestamp.
pub async fn initialize_app(config: &Config) -> Result<AppState> {
    info!("🚀 Starting activity dashboard ({})", config.environment);

    let metrics = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;
    info!("✅ Prometheus metrics initialized");

    let mongo = database::setup_database(&config.mongodb).await?;
    info!(
        "✅ MongoDB connection established (database: {})",
        mongo.database_name()
    );
    let store: Arc<dyn DocumentStore> = Arc::new(mongo);

    let broker = services::RabbitMqClient::new(&config.broker)
        .context("Failed to build broker HTTP client")?;
    info!("✅ Broker client initialized ({})", broker.base_url());

    build_state(config.clone(), store, broker, metrics).await
}

/// Assemble the services over already connected data sources
pub async fn build_state(
    config: Config,
    store: Arc<dyn DocumentStore>,
    broker: services::RabbitMqClient,
    metrics: PrometheusHandle,
) -> Result<AppState> {
    let websocket_service = services::WebSocketService::new();

    let dashboard_service = services::DashboardService::initialize(
        store.clone(),
        broker.clone(),
        websocket_service.clone(),
        config.refresh.history_capacity,
    )
    .await
    .context("Failed to aggregate daily transactions")?;
    info!("✅ Dashboard service initialized");

    let health_checker =
        services::HealthChecker::new(store, broker, config.environment.clone());
    info!("✅ Health checker initialized");

    Ok(AppState {
        config,
        dashboard_service,
        websocket_service,
        health_checker,
        metrics,
    })
}
