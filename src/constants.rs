//! Application constants and default values.
//!
//! Chart titles and colours live here so the panel renderers and their
//! tests agree on them.

/// Default HTTP port (the port the dashboard has always been served on)
pub const DEFAULT_PORT: u16 = 8050;

/// Default tick period for every refreshing panel
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;

/// Default number of samples kept in the queue history
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default per-request timeout for the broker management API
pub const DEFAULT_BROKER_TIMEOUT_MS: u64 = 5000;

/// Document field holding the creation timestamp
pub const CREATED_AT_FIELD: &str = "createdAt";

/// API version prefix
pub mod api {
    pub const VERSION: &str = "v1";
}

/// Broker management API endpoints, relative to the configured base URL
pub mod broker {
    pub const QUEUES_PATH: &str = "api/queues";
    pub const OVERVIEW_PATH: &str = "api/overview";
}

/// Panel titles, labels and styling
pub mod charts {
    pub const COLLECTIONS_TITLE: &str = "Collections Activity";
    pub const DAILY_TRANSACTIONS_TITLE: &str = "Transactions per day";
    pub const TRANSACTIONS_AXIS: &str = "Transactions";

    pub const QUEUE_HISTORY_TITLE: &str = "Queue Status";
    pub const QUEUE_HISTORY_SERIES: &str = "Queued messages";
    pub const QUEUE_HISTORY_AXIS: &str = "Queued Messages";
    pub const QUEUE_HISTORY_TEMPLATE: &str = "plotly_dark";

    /// Headroom applied above the largest sample on the history y-axis
    pub const HISTORY_HEADROOM: f64 = 1.5;

    pub const DAILY_BAR_COLOR: &str = "rgb(74, 205, 141)";
    pub const DAILY_BAR_LINE_COLOR: &str = "rgb(7, 20, 14)";
    pub const PLOT_BACKGROUND: &str = "white";

    pub const QUEUE_NAME_COLUMN: &str = "Queue name";
    pub const QUEUE_MESSAGES_COLUMN: &str = "Queued messages";
    pub const QUEUES_UNAVAILABLE: &str = "Queue information is unavailable.";
    pub const TOTALS_UNAVAILABLE: &str = "Overview information is unavailable.";
}
