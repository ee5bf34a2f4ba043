//! Integration tests for the API Server
//!
//! Tests health checks, metrics and the market state endpoints.


use serde_json::Value;
use std::sync::Arc;

use test_utils::{market, DownProvider, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "bullbear-backend");
}

#[tokio::test]
async fn health_stays_up_when_providers_are_down() {
    let app = TestApiServer::with_provider(Arc::new(DownProvider)).await;
    let response = app.server.get("/api/health").await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn state_endpoint_returns_bull_offensive() {
    let app = TestApiServer::with_values(market(50_000.0, 45_000.0, 40_000.0, 2e9, 1e8)).await;
    let response = app.server.get("/api/state").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["state"], "牛市进攻");
    assert_eq!(body["trend"], "趋势多");
    assert_eq!(body["funding"], "资金进攻");
    assert_eq!(body["risk_level"], "HIGH");
    assert_eq!(body["confidence"], 1.0);
    assert_eq!(body["metadata"]["stablecoin_ratio"], 5.0);
}

#[tokio::test]
async fn state_endpoint_returns_bear_defensive() {
    let app = TestApiServer::with_values(market(40_000.0, 45_000.0, 50_000.0, 2e9, 2e8)).await;
    let body: Value = app.server.get("/api/state").await.json();

    assert_eq!(body["ok"], true);
    assert_eq!(body["state"], "熊市消化");
    assert_eq!(body["risk_level"], "LOW");
    assert_eq!(body["metadata"]["stablecoin_ratio"], 10.0);
}

#[tokio::test]
async fn state_endpoint_rejects_zero_total_market_cap() {
    let app = TestApiServer::with_values(market(50_000.0, 45_000.0, 40_000.0, 0.0, 1e8)).await;
    let response = app.server.get("/api/state").await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("total market cap"));
    assert!(body.get("state").is_none());
}

#[tokio::test]
async fn state_endpoint_rejects_zero_ma50() {
    let app = TestApiServer::with_values(market(50_000.0, 0.0, 40_000.0, 2e9, 1e8)).await;
    let response = app.server.get("/api/state").await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("MA50"));
}

#[tokio::test]
async fn state_endpoint_reports_unavailable_metrics() {
    let app = TestApiServer::with_provider(Arc::new(DownProvider)).await;
    let response = app.server.get("/api/state").await;
    assert_eq!(response.status_code(), 502);

    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("BTC_PRICE"));
    assert!(body.get("state").is_none());
}

#[tokio::test]
async fn data_endpoint_lists_metrics_with_providers() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/data").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.len(), 5);
    for name in ["BTC_PRICE", "MA50", "MA200", "TOTAL_MARKET_CAP", "STABLECOIN_MARKET_CAP"] {
        assert_eq!(data[name]["provider"], "mock", "provider for {name}");
        assert!(data[name]["value"].as_f64().is_some());
    }
    assert_eq!(data["BTC_PRICE"]["value"], 95_000.0);
}

#[tokio::test]
async fn data_endpoint_reports_unavailable_metrics() {
    let app = TestApiServer::with_provider(Arc::new(DownProvider)).await;
    let response = app.server.get("/api/data").await;
    assert_eq!(response.status_code(), 502);

    let body: Value = response.json();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn repeated_state_requests_are_identical() {
    let values = market(61_234.5, 58_765.25, 51_000.125, 2.4e12, 1.7e11);
    let app = TestApiServer::with_values(values).await;

    let first: Value = app.server.get("/api/state").await.json();
    let second: Value = app.server.get("/api/state").await.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/health").await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total{route=\"/api/health\",status=\"200\"} 1"));
    assert!(body.contains("http_request_duration_seconds_bucket{route=\"/api/health\""));
    assert!(body.contains("http_requests_in_flight"));
}

#[tokio::test]
async fn metrics_track_evaluation_outcomes() {
    let app = TestApiServer::with_values(market(50_000.0, 45_000.0, 40_000.0, 2e9, 1e8)).await;
    let _ = app.server.get("/api/state").await;
    let _ = app.server.get("/api/state").await;

    let body = app.server.get("/metrics").await.text();
    assert!(
        body.contains("state_evaluations_total{state=\"BULL_OFFENSIVE\"} 2"),
        "metrics output: {body}"
    );

    let down = TestApiServer::with_provider(Arc::new(DownProvider)).await;
    let _ = down.server.get("/api/state").await;
    let body = down.server.get("/metrics").await.text();
    assert!(body.contains("state_evaluation_failures_total{reason=\"metric_unavailable\"} 1"));
}
