// Data sources, panel renderers and the refresh machinery

pub mod broker;
pub mod census;
pub mod daily_transactions;
pub mod dashboard;
pub mod health_check;
pub mod history;
pub mod queues;
pub mod refresh_scheduler;
pub mod websocket;

pub use broker::{BrokerError, RabbitMqClient};
pub use dashboard::DashboardService;
pub use health_check::HealthChecker;
pub use history::{HistoryBuffer, HistorySampler, MissingMetricPolicy, Sample};
pub use refresh_scheduler::RefreshScheduler;
pub use websocket::{DashboardEvent, WebSocketService};
