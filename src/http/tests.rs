//! Tests for the HTTP transport

use super::*;
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::types::BackoffType;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH: &str = "/rest/api/2/search";

fn client_with_retries(server: &MockServer, retries: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(50),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

async fn get(client: &HttpClient, request: RequestConfig) -> Result<Value> {
    client.get_json(SEARCH, &request).await
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = HttpClientConfig::default();

    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.backoff_type, BackoffType::Exponential);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert_eq!(
        config.default_headers.get("Accept").map(String::as_str),
        Some("application/json")
    );
    assert!(config.user_agent.starts_with("issue-pager/"));
}

#[test]
fn test_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://jira.example.com")
        .timeout(Duration::from_secs(5))
        .max_retries(1)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(2),
        )
        .header("X-Atlassian-Token", "no-check")
        .no_rate_limit()
        .build();

    assert_eq!(config.base_url.as_deref(), Some("https://jira.example.com"));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 1);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.max_backoff, Duration::from_secs(2));
    assert!(config.rate_limit.is_none());
    assert_eq!(
        config.default_headers.get("X-Atlassian-Token").map(String::as_str),
        Some("no-check")
    );
}

#[test]
fn test_request_config_builder() {
    let request = RequestConfig::new()
        .query("jql", "project = ABC")
        .query("jql", "project = XYZ")
        .header("X-Request-Id", "abc123")
        .retries(2);

    assert_eq!(request.query.len(), 1);
    assert_eq!(request.query.get("jql").map(String::as_str), Some("project = XYZ"));
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.max_retries, Some(2));
}

#[test_case(BackoffType::Constant, &[100, 100, 100, 100]; "constant")]
#[test_case(BackoffType::Linear, &[100, 200, 300, 400]; "linear")]
#[test_case(BackoffType::Exponential, &[100, 200, 400, 500]; "exponential capped")]
fn test_calculate_backoff(backoff_type: BackoffType, expected_ms: &[u64]) {
    let config = HttpClientConfig::builder()
        .backoff(
            backoff_type,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let delays: Vec<u64> = (0..4)
        .map(|attempt| client.calculate_backoff(attempt).as_millis() as u64)
        .collect();
    assert_eq!(delays, expected_ms);
}

#[test]
fn test_backoff_saturates() {
    let client = HttpClient::new().unwrap();
    assert_eq!(client.calculate_backoff(u32::MAX), client.config().max_backoff);
}

#[test]
fn test_debug_hides_internals() {
    let client = HttpClient::new().unwrap();
    let rendered = format!("{client:?}");

    assert!(rendered.contains("has_rate_limiter: true"));
    assert!(rendered.contains("has_authenticator: false"));
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_get_json_sends_query_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(query_param("jql", "project = ABC"))
        .and(query_param("startAt", "10"))
        .and(header("Accept", "application/json"))
        .and(header("X-Request-Id", "req-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [], "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_retries(&server, 0);
    let body = get(
        &client,
        RequestConfig::new()
            .query("jql", "project = ABC")
            .query("startAt", "10")
            .header("X-Request-Id", "req-1"),
    )
    .await
    .unwrap();

    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_absolute_url_ignores_base() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/3/search/jql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isLast": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url("https://unused.invalid")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let body: Value = client
        .get_json(
            &format!("{}/rest/api/3/search/jql", server.uri()),
            &RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(body["isLast"], true);
}

#[tokio::test]
async fn test_bearer_credentials_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(header("Authorization", "Bearer pat-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    let client = HttpClient::with_auth(
        config,
        AuthConfig::Bearer {
            token: "pat-1".to_string(),
        },
    )
    .unwrap();

    assert!(client.has_authenticator());
    get(&client, RequestConfig::new()).await.unwrap();
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_retries(&server, 3);
    let err = get(&client, RequestConfig::new()).await.unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_client_error_keeps_body_and_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"errorMessages":["Error in the JQL Query"]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_retries(&server, 3);
    let err = get(&client, RequestConfig::new()).await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Error in the JQL Query"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_retries(&server, 3);
    let body = get(&client, RequestConfig::new()).await.unwrap();

    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_retries_run_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_with_retries(&server, 2);
    let err = get(&client, RequestConfig::new()).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_per_request_retry_override() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_retries(&server, 5);
    let err = get(&client, RequestConfig::new().retries(0))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_rate_limit_honours_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isLast": true})))
        .mount(&server)
        .await;

    let client = client_with_retries(&server, 1);
    let started = std::time::Instant::now();
    let body = get(&client, RequestConfig::new()).await.unwrap();

    assert_eq!(body["isLast"], true);
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_rate_limit_without_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_retries(&server, 0);
    let err = get(&client, RequestConfig::new()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 7
        }
    ));
}
