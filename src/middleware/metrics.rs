use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, gauge, histogram};
use std::time::{Duration, Instant};

/// Metrics middleware that tracks request metrics
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone()).increment(1);
    gauge!("http_requests_in_flight", "path" => path.clone()).increment(1.0);

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let duration = start.elapsed();

    gauge!("http_requests_in_flight", "path" => path.clone()).decrement(1.0);

    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .record(duration.as_secs_f64());

    counter!(
        "http_responses_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    if response.status().is_server_error() {
        counter!(
            "http_errors_total",
            "method" => method,
            "path" => path,
            "status" => status
        )
        .increment(1);
    }

    response
}

/// Track a call to the broker management API
pub fn track_broker_request(endpoint: &str, success: bool, duration: Duration) {
    histogram!(
        "broker_request_duration_seconds",
        "endpoint" => endpoint.to_string(),
        "success" => success.to_string()
    )
    .record(duration.as_secs_f64());

    counter!(
        "broker_requests_total",
        "endpoint" => endpoint.to_string(),
        "success" => success.to_string()
    )
    .increment(1);
}

/// Track one history tick and the resulting buffer length
pub fn track_history_sample(skipped: bool, buffer_len: usize) {
    let result = if skipped { "skipped" } else { "recorded" };
    counter!("history_samples_total", "result" => result).increment(1);
    gauge!("history_buffer_len").set(buffer_len as f64);
}

/// Track a collection census run
pub fn track_census(success: bool) {
    counter!("collection_census_total", "success" => success.to_string()).increment(1);
}

/// Track WebSocket connections
pub fn track_websocket_connection(connected: bool) {
    if connected {
        gauge!("websocket_connections_active").increment(1.0);
    } else {
        gauge!("websocket_connections_active").decrement(1.0);
    }
}
