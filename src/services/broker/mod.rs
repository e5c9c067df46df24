//! RabbitMQ management API client.
//!
//! Both endpoints share one policy: HTTP 200 with a parseable body is data,
//! anything else (other status, transport error, timeout, bad JSON) is
//! "unavailable". Callers decide what unavailable means for their panel.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::BrokerConfig;
use crate::constants::broker::{OVERVIEW_PATH, QUEUES_PATH};
use crate::middleware::metrics::track_broker_request;
use crate::models::QueueInfo;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Management API client with basic auth and a per-request timeout
#[derive(Clone)]
pub struct RabbitMqClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl RabbitMqClient {
    pub fn new(config: &BrokerConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `api/queues`
    pub async fn list_queues(&self) -> Result<Vec<QueueInfo>, BrokerError> {
        self.get_json(QUEUES_PATH).await
    }

    /// GET `api/overview`, kept as raw JSON since only `queue_totals` is read
    pub async fn overview(&self) -> Result<serde_json::Value, BrokerError> {
        self.get_json(OVERVIEW_PATH).await
    }

    /// Queue listing, or an empty list when the broker is unavailable
    pub async fn fetch_queue_snapshot(&self) -> Vec<QueueInfo> {
        match self.list_queues().await {
            Ok(queues) => queues,
            Err(e) => {
                warn!(error = %e, "Queue listing unavailable");
                Vec::new()
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BrokerError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let start = Instant::now();

        let result = self.request(&url, endpoint).await;

        track_broker_request(endpoint, result.is_ok(), start.elapsed());
        if result.is_ok() {
            debug!(
                endpoint = %endpoint,
                duration_ms = %start.elapsed().as_millis(),
                "Broker request succeeded"
            );
        }
        result
    }

    async fn request<T: DeserializeOwned>(&self, url: &str, endpoint: &str) -> Result<T, BrokerError> {
        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BrokerError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                BrokerError::Timeout {
                    endpoint: endpoint.to_string(),
                }
            } else {
                BrokerError::Decode {
                    endpoint: endpoint.to_string(),
                    source: e,
                }
            }
        })
    }
}

fn transport_error(endpoint: &str, e: reqwest::Error) -> BrokerError {
    if e.is_timeout() {
        BrokerError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        BrokerError::Transport {
            endpoint: endpoint.to_string(),
            source: e,
        }
    }
}
