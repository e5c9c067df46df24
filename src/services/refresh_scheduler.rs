//! Background refresh loops
//!
//! One loop per refreshing panel: collection counts, the queue table, and
//! the history sampler (which also refreshes the totals panel).

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::config::RefreshConfig;
use crate::services::dashboard::DashboardService;

#[derive(Clone)]
pub struct RefreshScheduler {
    dashboard: DashboardService,
    config: RefreshConfig,
}

impl RefreshScheduler {
    pub fn new(dashboard: DashboardService, config: RefreshConfig) -> Self {
        Self { dashboard, config }
    }

    /// Spawn every refresh loop. Each stops once `shutdown` flips to `true`.
    pub fn start(&self, shutdown: watch::Receiver<bool>) -> Vec<JoinHandle<()>> {
        info!(
            "Starting refresh loops (panels every {}ms, collections every {}ms)",
            self.config.interval_ms, self.config.collections_interval_ms
        );

        let census = self.dashboard.clone();
        let queues = self.dashboard.clone();
        let history = self.dashboard.clone();

        vec![
            spawn_loop(
                "collections",
                self.config.collections_interval(),
                shutdown.clone(),
                move || {
                    let dashboard = census.clone();
                    async move {
                        if let Err(e) = dashboard.refresh_collections().await {
                            error!("Collection census failed: {}", e);
                        }
                    }
                },
            ),
            spawn_loop("queues", self.config.interval(), shutdown.clone(), move || {
                let dashboard = queues.clone();
                async move {
                    dashboard.refresh_queues().await;
                }
            }),
            spawn_loop("queue_history", self.config.interval(), shutdown, move || {
                let dashboard = history.clone();
                async move {
                    dashboard.sample_tick(Utc::now()).await;
                }
            }),
        ]
    }
}

/// Run `tick` on every period until shutdown.
///
/// The first tick fires immediately. A tick that overruns the period delays
/// the next one instead of bursting to catch up.
pub fn spawn_loop<F, Fut>(
    name: &'static str,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut tick: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => tick().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Refresh loop '{}' stopped", name);
    })
}
