//! HTTP surface integration tests
//!
//! Exercises the router with a locally-built session; endpoints that would
//! dispatch AWS calls are covered by their validation and local paths only.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use axum_test::TestServer;
use bedrock_gateway::auth::{AuthMethod, Session};
use bedrock_gateway::config::{ModelCatalog, Settings};
use bedrock_gateway::create_router;
use serde_json::{json, Value};

fn test_settings() -> Settings {
    Settings {
        server: bedrock_gateway::config::settings::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        },
        aws: bedrock_gateway::config::settings::AwsConfig {
            region: "us-east-1".to_string(),
        },
        request: bedrock_gateway::config::settings::RequestConfig { timeout: 30 },
        logging: bedrock_gateway::config::settings::LoggingConfig {
            level: "info".to_string(),
            format: "text".to_string(),
        },
    }
}

fn test_session() -> Session {
    let config = SdkConfig::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .build();

    Session::new(config, "us-east-1", AuthMethod::AwsCli)
}

fn test_server() -> TestServer {
    let router = create_router(test_settings(), ModelCatalog::default(), test_session());
    TestServer::new(router).expect("failed to start test server")
}

#[tokio::test]
async fn test_root_liveness() {
    let server = test_server();
    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "bedrock-gateway");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_chat_rejects_empty_messages() {
    let server = test_server();
    let response = server
        .post("/v1/chat/completions")
        .json(&json!({
            "model": "claude-sonnet-4.5",
            "messages": []
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("Message list"));
}

#[tokio::test]
async fn test_chat_rejects_empty_model() {
    let server = test_server();
    let response = server
        .post("/v1/chat/completions")
        .json(&json!({
            "model": "",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_chat_rejects_out_of_range_temperature() {
    let server = test_server();
    let response = server
        .post("/v1/chat/completions")
        .json(&json!({
            "model": "claude-sonnet-4.5",
            "messages": [{"role": "user", "content": "hi"}],
            "temperature": 3.5
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("temperature"));
}

#[tokio::test]
async fn test_chat_rejects_unknown_role() {
    let server = test_server();
    let response = server
        .post("/v1/chat/completions")
        .json(&json!({
            "model": "claude-sonnet-4.5",
            "messages": [{"role": "tool", "content": "hi"}]
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_usage_report_starts_empty() {
    let server = test_server();
    let response = server.get("/v1/usage").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["usage"]["request_count"], 0);
    assert_eq!(body["usage"]["period_days"], 30);
    assert_eq!(body["cost"]["total_cost"], 0.0);
}

#[tokio::test]
async fn test_usage_report_rejects_negative_window() {
    let server = test_server();
    let response = server
        .get("/v1/usage")
        .add_query_param("days", -1)
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_usage_report_honors_window_parameter() {
    let server = test_server();
    let response = server.get("/v1/usage").add_query_param("days", 7).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["usage"]["period_days"], 7);
    assert_eq!(body["cost"]["period_days"], 7);
}
