// Dashboard refresh integration test
// Runs refresh cycles over an in-memory document store and a mock broker

use activity_dashboard::config::BrokerConfig;
use activity_dashboard::database::{DocumentStore, InMemoryStore, StoredDocument};
use activity_dashboard::models::{QueueRow, QueueTable, TotalsSummary};
use activity_dashboard::services::{DashboardService, RabbitMqClient, WebSocketService};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn broker_for(server: &MockServer) -> RabbitMqClient {
    RabbitMqClient::new(&BrokerConfig {
        base_url: format!("{}/", server.uri()),
        username: "guest".to_string(),
        password: "guest".to_string(),
        timeout_ms: 1_000,
    })
    .unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn seeded_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_collection(
            "orders",
            vec![
                StoredDocument::created_at("o1", at(2024, 1, 1, 9)),
                StoredDocument::created_at("o2", at(2024, 1, 2, 17)),
            ],
        )
        .with_collection(
            "payments",
            vec![StoredDocument::created_at("p1", at(2024, 1, 1, 23))],
        )
}

async fn dashboard_with(store: impl DocumentStore + 'static, server: &MockServer) -> DashboardService {
    DashboardService::initialize(
        Arc::new(store),
        broker_for(server),
        WebSocketService::new(),
        100,
    )
    .await
    .unwrap()
}

async fn mount_overview(server: &MockServer, messages: u64) {
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queue_totals": {"messages": messages}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_daily_transactions_built_at_startup() {
    let server = MockServer::start().await;
    let dashboard = dashboard_with(seeded_store(), &server).await;

    let chart = dashboard.snapshot().await.daily_transactions;

    assert_eq!(chart.data[0].x, vec!["2024-01-01", "2024-01-02"]);
    assert_eq!(chart.data[0].y, vec![2.0, 1.0]);
}

#[tokio::test]
async fn test_history_follows_overview_ticks() {
    let server = MockServer::start().await;
    let dashboard = dashboard_with(InMemoryStore::new(), &server).await;
    let start = at(2024, 1, 1, 0);

    for (i, messages) in [5, 12, 3].into_iter().enumerate() {
        mount_overview(&server, messages).await;
        dashboard.sample_tick(start + Duration::seconds(i as i64)).await;
    }

    let chart = dashboard.snapshot().await.queue_history;
    assert_eq!(chart.data[0].y, vec![5.0, 12.0, 3.0]);
    assert_eq!(chart.layout.yaxis.range, Some(vec![0.0, 18.0]));
}

#[tokio::test]
async fn test_failed_overview_leaves_history_unchanged() {
    let server = MockServer::start().await;
    let dashboard = dashboard_with(InMemoryStore::new(), &server).await;

    mount_overview(&server, 7).await;
    dashboard.sample_tick(at(2024, 1, 1, 0)).await;
    let before = dashboard.snapshot().await.queue_history;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let totals = dashboard.sample_tick(at(2024, 1, 1, 1)).await;

    assert!(matches!(totals, TotalsSummary::Unavailable { .. }));
    assert_eq!(dashboard.history_len().await, 1);
    assert_eq!(dashboard.snapshot().await.queue_history, before);
}

#[tokio::test]
async fn test_history_window_is_bounded() {
    let server = MockServer::start().await;
    let dashboard = DashboardService::initialize(
        Arc::new(InMemoryStore::new()),
        broker_for(&server),
        WebSocketService::new(),
        3,
    )
    .await
    .unwrap();
    mount_overview(&server, 1).await;

    for i in 0..5 {
        dashboard.sample_tick(at(2024, 1, 1, i)).await;
    }

    assert_eq!(dashboard.history_len().await, 3);
    let chart = dashboard.snapshot().await.queue_history;
    assert_eq!(chart.data[0].x.len(), 3);
    assert!(chart.data[0].x[0].starts_with("2024-01-01T02:00:00"));
}

#[tokio::test]
async fn test_queue_table_from_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "q1", "messages": 4},
            {"name": "q2", "messages": 0}
        ])))
        .mount(&server)
        .await;
    let dashboard = dashboard_with(InMemoryStore::new(), &server).await;

    let table = dashboard.refresh_queues().await;

    match table {
        QueueTable::Available { rows, .. } => assert_eq!(
            rows,
            vec![
                QueueRow { name: "q1".to_string(), messages: 4 },
                QueueRow { name: "q2".to_string(), messages: 0 },
            ]
        ),
        other => panic!("expected a table, got {:?}", other),
    }
    assert!(dashboard.snapshot().await.queues.is_some());
}

#[tokio::test]
async fn test_collection_counts_follow_inserts() {
    let server = MockServer::start().await;
    let store = Arc::new(seeded_store());
    let dashboard = DashboardService::initialize(
        store.clone(),
        broker_for(&server),
        WebSocketService::new(),
        100,
    )
    .await
    .unwrap();

    dashboard.refresh_collections().await.unwrap();
    let first = dashboard.snapshot().await.collections.unwrap();
    assert_eq!(first.data[0].x, vec!["orders", "payments"]);
    assert_eq!(first.data[0].y, vec![2.0, 1.0]);

    store
        .insert("payments", StoredDocument::created_at("p2", at(2024, 1, 3, 8)))
        .await;
    dashboard.refresh_collections().await.unwrap();

    let second = dashboard.snapshot().await.collections.unwrap();
    assert_eq!(second.data[0].y, vec![2.0, 2.0]);
}
