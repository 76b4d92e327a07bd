//! Tests for the HTTP transport module

use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(uri: &str, retries: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(uri)
        .max_retries(retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(20),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("batch-pager/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://batch.eu-west-1.amazonaws.com")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .rate_limit(RateLimiterConfig::per_second(4))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://batch.eu-west-1.amazonaws.com".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(4, 4)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .header("X-Request-Id", "abc123")
        .json(json!({"jobQueue": "q"}))
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.body, Some(json!({"jobQueue": "q"})));
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[test]
fn test_calculate_backoff() {
    let exponential = HttpClient::with_config(
        HttpClientConfig::builder()
            .backoff(
                BackoffType::Exponential,
                Duration::from_millis(100),
                Duration::from_millis(500),
            )
            .build(),
    )
    .unwrap();
    assert_eq!(exponential.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(exponential.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(exponential.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(exponential.calculate_backoff(3), Duration::from_millis(500));

    let linear = HttpClient::with_config(
        HttpClientConfig::builder()
            .backoff(
                BackoffType::Linear,
                Duration::from_millis(100),
                Duration::from_secs(1),
            )
            .build(),
    )
    .unwrap();
    assert_eq!(linear.calculate_backoff(2), Duration::from_millis(300));

    let constant = HttpClient::with_config(
        HttpClientConfig::builder()
            .backoff(
                BackoffType::Constant,
                Duration::from_millis(50),
                Duration::from_secs(1),
            )
            .build(),
    )
    .unwrap();
    assert_eq!(constant.calculate_backoff(7), Duration::from_millis(50));
}

#[test]
fn test_calculate_backoff_saturates_on_overflow() {
    for backoff_type in [BackoffType::Linear, BackoffType::Exponential] {
        let client = HttpClient::with_config(
            HttpClientConfig::builder()
                .backoff(
                    backoff_type,
                    Duration::from_secs(u64::MAX / 2),
                    Duration::from_secs(30),
                )
                .build(),
        )
        .unwrap();
        assert_eq!(client.calculate_backoff(10), Duration::from_secs(30));
        assert_eq!(client.calculate_backoff(u32::MAX), Duration::from_secs(30));
    }
}

#[tokio::test]
async fn test_retry_after_is_capped_by_max_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "86400"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobSummaryList": []})))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 1);
    let body = tokio::time::timeout(
        Duration::from_secs(5),
        client.post_json("ListJobs", "/v1/listjobs", json!({}), RequestConfig::new()),
    )
    .await
    .expect("Retry-After should not outlast max_backoff")
    .unwrap();

    assert_eq!(body, json!({"jobSummaryList": []}));
}

#[tokio::test]
async fn test_post_json_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"jobQueue": "high-priority"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobSummaryList": [],
        })))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 0);
    let body = client
        .post_json(
            "ListJobs",
            "/v1/listjobs",
            json!({"jobQueue": "high-priority"}),
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"jobSummaryList": []}));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/describejobqueues"))
        .and(header("X-Trace", "on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobQueues": []})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Trace", "on")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let body = client
        .post_json(
            "DescribeJobQueues",
            "/v1/describejobqueues",
            json!({}),
            RequestConfig::new(),
        )
        .await
        .unwrap();
    assert_eq!(body["jobQueues"], json!([]));
}

#[tokio::test]
async fn test_post_json_retries_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 3);
    let body = client
        .post_json("ListJobs", "/v1/listjobs", json!({}), RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_post_json_throttling_exhausts_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "__type": "TooManyRequestsException",
            "message": "Rate exceeded",
        })))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 2);
    let err = client
        .post_json("ListJobs", "/v1/listjobs", json!({}), RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::Remote { status, code, .. } => {
            assert_eq!(status, 429);
            assert_eq!(code, "TooManyRequestsException");
        }
        other => panic!("Expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_json_client_error_from_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/describejobdefinitions"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header(
                    "x-amzn-ErrorType",
                    "ClientException:http://internal.amazon.com/coral/com.amazonaws.batch/",
                )
                .set_body_json(json!({"message": "maxResults must be <= 100"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 3);
    let err = client
        .post_json(
            "DescribeJobDefinitions",
            "/v1/describejobdefinitions",
            json!({"maxResults": 500}),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.service_code(), Some("ClientException"));
    assert_eq!(
        err.to_string(),
        "DescribeJobDefinitions failed (400 ClientException): maxResults must be <= 100"
    );
}

#[tokio::test]
async fn test_post_json_plain_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/listjobs"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 0);
    let err = client
        .post_json("ListJobs", "/v1/listjobs", json!({}), RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, ref body } if body == "not here"));
}

#[test]
fn test_decode_service_error_body_type_with_namespace() {
    let body = r#"{"__type":"com.amazonaws.batch#ServerException","Message":"boom"}"#;
    let err = decode_service_error("ListJobs", 500, None, body);
    match err {
        Error::Remote {
            operation,
            status,
            code,
            message,
        } => {
            assert_eq!(operation, "ListJobs");
            assert_eq!(status, 500);
            assert_eq!(code, "ServerException");
            assert_eq!(message, "boom");
        }
        other => panic!("Expected Remote error, got {other:?}"),
    }
}

#[test]
fn test_decode_service_error_without_code() {
    let err = decode_service_error("ListJobs", 502, None, "<html>bad gateway</html>");
    assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
}
