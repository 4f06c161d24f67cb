//! Integration tests for the completion worker client
//!
//! A one-shot HTTP responder on a local port stands in for the worker so the
//! real reqwest path (status handling, body parsing) is exercised.

mod common;

use std::time::Duration;

use common::{closed_url, serve_once, serve_once_after};
use routinechat::config::WorkerConfig;
use routinechat::llm::{CompletionClient, CompletionRequest, Message, RequestError, WorkerClient};

// =============================================================================
// Helpers
// =============================================================================

fn client_for(url: &str) -> WorkerClient {
    client_with_timeout(url, 5_000)
}

fn client_with_timeout(url: &str, timeout_ms: u64) -> WorkerClient {
    WorkerClient::from_config(&WorkerConfig {
        url: url.to_string(),
        model: "gpt-4o".to_string(),
        timeout_ms: Some(timeout_ms),
    })
    .expect("Failed to build client")
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-4o".to_string(),
        messages: vec![Message::system("You are a product advisor."), Message::user("Dry skin?")],
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_successful_reply() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"choices": [{"message": {"role": "assistant", "content": "Try Aloe Gel.\nThen SPF."}}]}"#,
    )
    .await;

    let response = client_for(&url).complete(request()).await.expect("request failed");
    assert_eq!(response.content, "Try Aloe Gel.\nThen SPF.");

    let raw = server.await.expect("server panicked");
    assert!(raw.starts_with("POST / HTTP/1.1"));
    assert!(!raw.to_ascii_lowercase().contains("authorization:"));

    let body = raw.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or_default();
    let json: serde_json::Value = serde_json::from_str(body).expect("body is not JSON");
    assert_eq!(json["model"], "gpt-4o");
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["content"], "Dry skin?");
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let (url, server) = serve_once("502 Bad Gateway", r#"{"error": "upstream"}"#).await;

    let err = client_for(&url).complete(request()).await.unwrap_err();
    match err {
        RequestError::Status { status, message } => {
            assert_eq!(status, 502);
            assert!(message.contains("upstream"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    let _ = server.await;
}

#[tokio::test]
async fn test_malformed_body_is_error() {
    let (url, server) = serve_once("200 OK", "not json at all").await;

    let err = client_for(&url).complete(request()).await.unwrap_err();
    assert!(matches!(err, RequestError::Parse(_)));
    let _ = server.await;
}

#[tokio::test]
async fn test_empty_choices_is_error() {
    let (url, server) = serve_once("200 OK", r#"{"choices": []}"#).await;

    let err = client_for(&url).complete(request()).await.unwrap_err();
    assert!(matches!(err, RequestError::EmptyReply));
    let _ = server.await;
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let err = client_for(&closed_url().await).complete(request()).await.unwrap_err();
    assert!(matches!(err, RequestError::Network(_)));
    assert!(!err.is_response_error());
}

#[tokio::test]
async fn test_slow_worker_hits_timeout() {
    let (url, _server) = serve_once_after(
        Duration::from_millis(1_500),
        "200 OK",
        r#"{"choices": [{"message": {"content": "too late"}}]}"#,
    )
    .await;

    let err = client_with_timeout(&url, 200).complete(request()).await.unwrap_err();
    match err {
        RequestError::Timeout(timeout) => assert_eq!(timeout, Duration::from_millis(200)),
        other => panic!("expected timeout, got {:?}", other),
    }
}
