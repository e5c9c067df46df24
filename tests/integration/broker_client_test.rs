// Broker client integration test
// Drives the management API client against a mock RabbitMQ management server

use activity_dashboard::config::BrokerConfig;
use activity_dashboard::services::{BrokerError, RabbitMqClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout_ms: u64) -> RabbitMqClient {
    RabbitMqClient::new(&BrokerConfig {
        base_url: format!("{}/", server.uri()),
        username: "monitor".to_string(),
        password: "s3cret-pass".to_string(),
        timeout_ms,
    })
    .unwrap()
}

#[tokio::test]
async fn test_queue_listing_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queues"))
        .and(basic_auth("monitor", "s3cret-pass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "q1", "messages": 4, "vhost": "/"},
            {"name": "q2", "messages": 0, "vhost": "/"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let queues = client_for(&server, 1_000).fetch_queue_snapshot().await;

    let names: Vec<&str> = queues.iter().map(|q| q.name.as_str()).collect();
    assert_eq!(names, vec!["q1", "q2"]);
    assert_eq!(queues[0].messages, 4);
    assert_eq!(queues[1].messages, 0);
}

#[tokio::test]
async fn test_unauthorized_listing_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queues"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server, 1_000);

    assert!(client.fetch_queue_snapshot().await.is_empty());
    assert!(matches!(
        client.list_queues().await,
        Err(BrokerError::Status { status: 401, .. })
    ));
}

#[tokio::test]
async fn test_non_json_body_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queues"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 1_000);

    assert!(matches!(
        client.list_queues().await,
        Err(BrokerError::Decode { .. })
    ));
    assert!(client.fetch_queue_snapshot().await.is_empty());
}

#[tokio::test]
async fn test_slow_broker_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"queue_totals": {"messages": 1}}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let result = client_for(&server, 50).overview().await;

    assert!(matches!(result, Err(BrokerError::Timeout { .. })));
}

#[tokio::test]
async fn test_overview_returns_raw_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cluster_name": "rabbit@node",
            "queue_totals": {"messages": 42, "messages_ready": 40, "messages_unacknowledged": 2}
        })))
        .mount(&server)
        .await;

    let overview = client_for(&server, 1_000).overview().await.unwrap();

    assert_eq!(overview["queue_totals"]["messages"], 42);
}

#[tokio::test]
async fn test_slow_queue_listing_reads_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queues"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "q1", "messages": 4}]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 50);

    assert!(matches!(
        client.list_queues().await,
        Err(BrokerError::Timeout { .. })
    ));
    assert!(client.fetch_queue_snapshot().await.is_empty());
}
