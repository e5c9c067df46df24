// Router integration test
// Sends requests through the full axum router without binding a socket

use activity_dashboard::config::{
    BrokerConfig, Config, LogFormat, MongoConfig, RefreshConfig,
};
use activity_dashboard::database::{InMemoryStore, StoredDocument};
use activity_dashboard::router::build_router;
use activity_dashboard::services::RabbitMqClient;
use activity_dashboard::startup::build_state;
use activity_dashboard::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> Config {
    Config {
        environment: "test".to_string(),
        port: 0,
        log_format: LogFormat::Pretty,
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "activity".to_string(),
        },
        broker: BrokerConfig {
            base_url: format!("{}/", server.uri()),
            username: "guest".to_string(),
            password: "guest".to_string(),
            timeout_ms: 1_000,
        },
        refresh: RefreshConfig {
            interval_ms: 1_000,
            collections_interval_ms: 1_000,
            history_capacity: 100,
        },
    }
}

fn test_store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new().with_collection(
        "orders",
        vec![StoredDocument::created_at(
            "o1",
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        )],
    ))
}

async fn state_with_store(server: &MockServer, store: Arc<InMemoryStore>) -> AppState {
    let config = test_config(server);
    let broker = RabbitMqClient::new(&config.broker).unwrap();
    let metrics = PrometheusBuilder::new().build_recorder().handle();

    build_state(config, store, broker, metrics).await.unwrap()
}

async fn test_state(server: &MockServer) -> AppState {
    state_with_store(server, test_store()).await
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_liveness() {
    let server = MockServer::start().await;
    let (status, body) = get(test_state(&server).await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_dashboard_before_first_tick() {
    let server = MockServer::start().await;
    let (status, body) = get(test_state(&server).await, "/api/v1/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["collections"].is_null());
    assert!(body["queues"].is_null());
    assert_eq!(body["daily_transactions"]["data"][0]["x"], json!(["2024-01-01"]));
    assert_eq!(body["queue_history"]["data"][0]["x"], json!([]));
}

#[tokio::test]
async fn test_unproduced_panel_is_not_found() {
    let server = MockServer::start().await;
    let (status, body) = get(test_state(&server).await, "/api/v1/dashboard/collections").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RES_4001");
}

#[tokio::test]
async fn test_panel_served_after_refresh() {
    let server = MockServer::start().await;
    let state = test_state(&server).await;
    state.dashboard_service.refresh_collections().await.unwrap();

    let (status, body) = get(state, "/api/v1/dashboard/collections").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["type"], "bar");
    assert_eq!(body["data"][0]["x"], json!(["orders"]));
    assert_eq!(body["layout"]["title"]["text"], "Collections Activity");
}

#[tokio::test]
async fn test_failed_census_reports_database_error() {
    let server = MockServer::start().await;
    let store = test_store();
    let state = state_with_store(&server, store.clone()).await;

    store.set_unavailable(true);
    assert!(state.dashboard_service.refresh_collections().await.is_err());

    let (status, body) = get(state, "/api/v1/dashboard/collections").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "DB_7001");
    assert_eq!(body["error"]["code_number"], 7001);
}

#[tokio::test]
async fn test_detailed_health_reports_degraded_broker() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (status, body) = get(test_state(&server).await, "/api/v1/health/detailed").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["dependencies"][0]["status"], "healthy");
    assert_eq!(body["dependencies"][1]["status"], "degraded");
}

#[tokio::test]
async fn test_metrics_endpoint_is_text() {
    let server = MockServer::start().await;
    let response = build_router(test_state(&server).await)
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let server = MockServer::start().await;
    let (status, body) = get(test_state(&server).await, "/api/docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/dashboard/queue-totals"].is_object());
}
