use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BROKER_TIMEOUT_MS, DEFAULT_HISTORY_CAPACITY, DEFAULT_PORT, DEFAULT_REFRESH_INTERVAL_MS,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub mongodb: MongoConfig,
    pub broker: BrokerConfig,
    pub refresh: RefreshConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

/// RabbitMQ management API connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Base URL of the management API, always ending with `/`
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout_ms: u64,
}

// Keeps the password out of logs.
impl std::fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl BrokerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Tick period of the queue table and queue history panels
    pub interval_ms: u64,
    /// Tick period of the collection census panel
    pub collections_interval_ms: u64,
    /// Maximum number of samples kept in the queue history
    pub history_capacity: usize,
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn collections_interval(&self) -> Duration {
        Duration::from_millis(self.collections_interval_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |key: &str| {
            get(key).ok_or_else(|| anyhow!("{} environment variable is required", key))
        };

        let interval_ms = parse_or(&get, "REFRESH_INTERVAL_MS", DEFAULT_REFRESH_INTERVAL_MS)?;
        let collections_interval_ms = parse_or(&get, "COLLECTIONS_REFRESH_INTERVAL_MS", interval_ms)?;
        let history_capacity = parse_or(&get, "HISTORY_CAPACITY", DEFAULT_HISTORY_CAPACITY)?;
        let broker_timeout_ms = parse_or(&get, "BROKER_TIMEOUT_MS", DEFAULT_BROKER_TIMEOUT_MS)?;

        if interval_ms == 0 || collections_interval_ms == 0 {
            return Err(anyhow!("refresh intervals must be greater than zero"));
        }
        if history_capacity == 0 {
            return Err(anyhow!("HISTORY_CAPACITY must be at least 1"));
        }
        // A zero reqwest timeout fails every request before it is sent
        if broker_timeout_ms == 0 {
            return Err(anyhow!("BROKER_TIMEOUT_MS must be greater than zero"));
        }

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(anyhow!(
                    "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                    other
                ))
            }
        };

        let mut base_url = required("RABBITMQ_URL")?;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Config {
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            log_format,
            mongodb: MongoConfig {
                uri: required("MONGODB_URI")?,
                database: required("MONGODB_DBNAME")?,
            },
            broker: BrokerConfig {
                base_url,
                username: required("RABBITMQ_AUTH_USERNAME")?,
                password: required("RABBITMQ_AUTH_PASSWORD")?,
                timeout_ms: broker_timeout_ms,
            },
            refresh: RefreshConfig {
                interval_ms,
                collections_interval_ms,
                history_capacity,
            },
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}
