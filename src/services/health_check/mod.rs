use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

pub mod types;
pub use types::{DependencyHealth, DetailedHealthStatus, HealthCheckStatus};

use crate::database::DocumentStore;
use crate::services::broker::{BrokerError, RabbitMqClient};

/// Health checker service
#[derive(Clone)]
pub struct HealthChecker {
    start_time: Arc<Instant>,
    store: Arc<dyn DocumentStore>,
    broker: RabbitMqClient,
    environment: String,
}

impl HealthChecker {
    pub fn new(store: Arc<dyn DocumentStore>, broker: RabbitMqClient, environment: String) -> Self {
        Self {
            start_time: Arc::new(Instant::now()),
            store,
            broker,
            environment,
        }
    }

    /// Get uptime in seconds
    pub fn get_uptime(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check database health
    async fn check_database(&self) -> DependencyHealth {
        let start = Instant::now();

        match self.store.ping().await {
            Ok(()) => DependencyHealth {
                name: "MongoDB".to_string(),
                status: HealthCheckStatus::Healthy,
                response_time_ms: Some(start.elapsed().as_millis() as u64),
                last_check: Utc::now(),
                error_message: None,
                details: Some("Database ping successful".to_string()),
            },
            Err(e) => DependencyHealth {
                name: "MongoDB".to_string(),
                status: HealthCheckStatus::Unhealthy,
                response_time_ms: Some(start.elapsed().as_millis() as u64),
                last_check: Utc::now(),
                error_message: Some(e.to_string()),
                details: None,
            },
        }
    }

    /// Check the broker management API.
    ///
    /// A non-200 answer means the broker is up but the dashboard cannot read
    /// it (bad credentials, missing plugin), which is reported as degraded.
    async fn check_broker(&self) -> DependencyHealth {
        let start = Instant::now();
        let result = self.broker.overview().await;
        let response_time_ms = Some(start.elapsed().as_millis() as u64);

        match result {
            Ok(_) => DependencyHealth {
                name: "RabbitMQ Management API".to_string(),
                status: HealthCheckStatus::Healthy,
                response_time_ms,
                last_check: Utc::now(),
                error_message: None,
                details: Some("Overview endpoint responding".to_string()),
            },
            Err(e) => {
                let status = match e {
                    BrokerError::Status { .. } | BrokerError::Decode { .. } => {
                        HealthCheckStatus::Degraded
                    }
                    BrokerError::Timeout { .. } | BrokerError::Transport { .. } => {
                        HealthCheckStatus::Unhealthy
                    }
                };
                DependencyHealth {
                    name: "RabbitMQ Management API".to_string(),
                    status,
                    response_time_ms,
                    last_check: Utc::now(),
                    error_message: Some(e.to_string()),
                    details: None,
                }
            }
        }
    }

    /// Perform full health check
    pub async fn perform_health_check(&self) -> DetailedHealthStatus {
        let (db_health, broker_health) = tokio::join!(self.check_database(), self.check_broker());
        let dependencies = vec![db_health, broker_health];

        DetailedHealthStatus {
            status: HealthCheckStatus::combine(dependencies.iter().map(|d| &d.status)),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: self.environment.clone(),
            uptime_seconds: self.get_uptime(),
            dependencies,
        }
    }
}
