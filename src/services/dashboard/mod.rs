//! Owns the rendered panels and the history sampler.
//!
//! Every refresh renders its panel, stores it in the snapshot served over
//! HTTP and pushes it to live subscribers.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::database::{DocumentStore, StoreError, StoreResult};
use crate::middleware::metrics::{track_census, track_history_sample};
use crate::models::{ChartFigure, DashboardSnapshot, Panel, QueueTable, TotalsSummary};
use crate::services::broker::RabbitMqClient;
use crate::services::census::{fetch_collection_counts, render_collections_chart};
use crate::services::daily_transactions::{build_daily_counts, render_daily_chart};
use crate::services::history::{HistorySampler, MissingMetricPolicy};
use crate::services::queues::{render_queue_table, render_queue_totals};
use crate::services::websocket::{DashboardEvent, WebSocketService};

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn DocumentStore>,
    broker: RabbitMqClient,
    sampler: Arc<RwLock<HistorySampler>>,
    snapshot: Arc<RwLock<DashboardSnapshot>>,
    /// Failure of the most recent census, cleared by the next success
    census_error: Arc<RwLock<Option<StoreError>>>,
    websocket_service: WebSocketService,
}

impl DashboardService {
    /// Build the service and its startup-only daily transactions chart.
    ///
    /// A database failure here is returned to the caller and aborts startup.
    pub async fn initialize(
        store: Arc<dyn DocumentStore>,
        broker: RabbitMqClient,
        websocket_service: WebSocketService,
        history_capacity: usize,
    ) -> StoreResult<Self> {
        let daily_counts = build_daily_counts(store.as_ref()).await?;
        info!("✅ Aggregated daily transactions over {} days", daily_counts.len());

        let sampler = HistorySampler::new(history_capacity, MissingMetricPolicy::default());
        let snapshot = DashboardSnapshot::new(render_daily_chart(&daily_counts), sampler.chart());

        Ok(Self {
            store,
            broker,
            sampler: Arc::new(RwLock::new(sampler)),
            snapshot: Arc::new(RwLock::new(snapshot)),
            census_error: Arc::new(RwLock::new(None)),
            websocket_service,
        })
    }

    /// Re-count every collection and publish the bar chart
    pub async fn refresh_collections(&self) -> StoreResult<()> {
        let counts = match fetch_collection_counts(self.store.as_ref()).await {
            Ok(counts) => counts,
            Err(e) => {
                track_census(false);
                *self.census_error.write().await = Some(e.clone());
                return Err(e);
            }
        };
        track_census(true);
        *self.census_error.write().await = None;
        debug!("Counted {} collections", counts.len());

        self.publish(Panel::Collections(render_collections_chart(&counts)))
            .await;
        Ok(())
    }

    /// Fetch the queue listing and publish the table
    pub async fn refresh_queues(&self) -> QueueTable {
        let queues = self.broker.fetch_queue_snapshot().await;
        let table = render_queue_table(&queues);

        self.publish(Panel::Queues(table.clone())).await;
        table
    }

    /// One history tick.
    ///
    /// Fetches the overview once and feeds both the totals panel and the
    /// sampler. When the overview is unavailable the buffer is left as is and
    /// the previous history chart stays in place.
    pub async fn sample_tick(&self, now: DateTime<Utc>) -> TotalsSummary {
        let overview = match self.broker.overview().await {
            Ok(overview) => Some(overview),
            Err(e) => {
                warn!("Skipping history sample: {}", e);
                None
            }
        };

        let totals = render_queue_totals(overview.as_ref());
        self.publish(Panel::QueueTotals(totals.clone())).await;

        // Append and render under one lock so concurrent ticks cannot interleave
        let (chart, len) = {
            let mut sampler = self.sampler.write().await;
            let chart = sampler.record(now, overview.as_ref());
            (chart, sampler.buffer().len())
        };

        track_history_sample(chart.is_none(), len);

        if let Some(chart) = chart {
            self.publish(Panel::QueueHistory(chart)).await;
        }

        totals
    }

    /// Latest collections chart.
    ///
    /// A chart from an earlier successful census is served even if the last
    /// census failed. Without any chart the last failure is returned, and
    /// `None` means no census has run yet.
    pub async fn collections_panel(&self) -> StoreResult<Option<ChartFigure>> {
        if let Some(chart) = self.snapshot.read().await.collections.clone() {
            return Ok(Some(chart));
        }
        match self.census_error.read().await.as_ref() {
            Some(e) => Err(e.clone()),
            None => Ok(None),
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn history_len(&self) -> usize {
        self.sampler.read().await.buffer().len()
    }

    async fn publish(&self, panel: Panel) {
        self.snapshot.write().await.apply(panel.clone());
        self.websocket_service
            .broadcast(DashboardEvent::panel_updated(panel))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrokerConfig;
    use crate::constants::charts::QUEUES_UNAVAILABLE;
    use crate::database::{InMemoryStore, StoredDocument};

    fn unreachable_broker() -> RabbitMqClient {
        RabbitMqClient::new(&BrokerConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            username: "guest".to_string(),
            password: "guest".to_string(),
            timeout_ms: 200,
        })
        .unwrap()
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_fails_on_missing_timestamp() {
        let store = InMemoryStore::new()
            .with_collection("orders", vec![StoredDocument::without_timestamp("a")]);

        let result = DashboardService::initialize(
            Arc::new(store),
            unreachable_broker(),
            WebSocketService::new(),
            100,
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_refresh_collections_publishes_panel() {
        let store = InMemoryStore::new()
            .with_collection("users", vec![StoredDocument::created_at("u1", ts(0))])
            .with_collection("orders", vec![]);
        let websocket = WebSocketService::new();
        let mut rx = websocket.subscribe(uuid::Uuid::new_v4()).await;

        let service =
            DashboardService::initialize(Arc::new(store), unreachable_broker(), websocket, 100)
                .await
                .unwrap();
        service.refresh_collections().await.unwrap();

        let snapshot = service.snapshot().await;
        let chart = snapshot.collections.expect("collections panel rendered");
        assert_eq!(chart.data[0].y.iter().sum::<f64>(), 1.0);

        match rx.recv().await {
            Some(DashboardEvent::PanelUpdated { panel, .. }) => assert_eq!(panel.name(), "collections"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_collections_propagates_store_failure() {
        let store = InMemoryStore::new();
        let store = Arc::new(store);
        let service = DashboardService::initialize(
            store.clone(),
            unreachable_broker(),
            WebSocketService::new(),
            100,
        )
        .await
        .unwrap();

        store.set_unavailable(true);

        assert!(service.refresh_collections().await.is_err());
        assert!(service.snapshot().await.collections.is_none());
    }

    #[tokio::test]
    async fn test_collections_panel_reports_census_failure() {
        let store = Arc::new(
            InMemoryStore::new()
                .with_collection("users", vec![StoredDocument::created_at("u1", ts(0))]),
        );
        let service = DashboardService::initialize(
            store.clone(),
            unreachable_broker(),
            WebSocketService::new(),
            100,
        )
        .await
        .unwrap();

        assert!(service.collections_panel().await.unwrap().is_none());

        store.set_unavailable(true);
        service.refresh_collections().await.unwrap_err();
        assert!(matches!(
            service.collections_panel().await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_unavailable(false);
        service.refresh_collections().await.unwrap();
        assert!(service.collections_panel().await.unwrap().is_some());

        // an earlier chart outlives a later failure
        store.set_unavailable(true);
        service.refresh_collections().await.unwrap_err();
        assert!(service.collections_panel().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_refresh_queues_unreachable_broker_unavailable() {
        let websocket = WebSocketService::new();
        let mut rx = websocket.subscribe(uuid::Uuid::new_v4()).await;
        let service = DashboardService::initialize(
            Arc::new(InMemoryStore::new()),
            unreachable_broker(),
            websocket,
            100,
        )
        .await
        .unwrap();

        let table = service.refresh_queues().await;

        let expected = QueueTable::Unavailable {
            message: QUEUES_UNAVAILABLE.to_string(),
        };
        assert_eq!(table, expected);
        assert_eq!(service.snapshot().await.queues, Some(expected));
        match rx.recv().await {
            Some(DashboardEvent::PanelUpdated { panel, .. }) => assert_eq!(panel.name(), "queues"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_broker_skips_sample() {
        let service = DashboardService::initialize(
            Arc::new(InMemoryStore::new()),
            unreachable_broker(),
            WebSocketService::new(),
            100,
        )
        .await
        .unwrap();
        let placeholder = service.snapshot().await.queue_history;

        let totals = service.sample_tick(Utc::now()).await;

        assert!(matches!(totals, TotalsSummary::Unavailable { .. }));
        assert_eq!(service.history_len().await, 0);
        assert_eq!(service.snapshot().await.queue_history, placeholder);
    }
}
