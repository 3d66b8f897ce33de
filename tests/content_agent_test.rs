//! Integration tests for the content agent client against a local HTTP server.
//!
//! Uses wiremock to check the request shape, status handling and streamed
//! decoding through the real reqwest adapter.

use kai::agent::{call_kai_content_agent, ContentAgentClient, ContentAgentRequest};
use kai::config::AgentConfig;
use kai::error::{ErrorCategory, KaiError, NetworkError, StreamError};
use kai::sse::ParseOptions;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AGENT_PATH: &str = "/functions/v1/kai-content-agent";

fn sse_body(fragments: &[&str]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        body.push_str(&format!(
            "data: {}\n\n",
            serde_json::json!({"choices": [{"delta": {"content": fragment}}]})
        ));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

fn client_for(mock_server: &MockServer) -> ContentAgentClient {
    let config = AgentConfig::new(mock_server.uri(), "anon-key").unwrap();
    ContentAgentClient::new(config).unwrap()
}

#[tokio::test]
async fn test_sends_authenticated_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AGENT_PATH))
        .and(header("authorization", "Bearer user-jwt"))
        .and(header("apikey", "anon-key"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "text/event-stream"))
        .and(header_exists("x-request-id"))
        .and(body_json(serde_json::json!({
            "clientId": "client-7",
            "request": "Legenda para o lançamento",
            "format": "carousel",
            "platform": "instagram"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["Novo", " lançamento!"]), "text/event-stream"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = ContentAgentRequest::new("client-7", "Legenda para o lançamento")
        .with_format("carousel")
        .with_platform("instagram");

    let text = client.generate(&request, "user-jwt", None).await.unwrap();
    assert_eq!(text, "Novo lançamento!");
}

#[tokio::test]
async fn test_streams_progress_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AGENT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["one", " two", " three"]), "text/event-stream"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut seen = Vec::new();
    let mut counts = Vec::new();
    let options = ParseOptions::new()
        .with_on_progress(|f| seen.push(f.to_string()))
        .with_on_chunk(|n| counts.push(n));

    let text = call_kai_content_agent(
        &client,
        &ContentAgentRequest::new("c1", "count"),
        "jwt",
        Some(options),
    )
    .await
    .unwrap();

    assert_eq!(text, "one two three");
    assert_eq!(seen, vec!["one", " two", " three"]);
    assert_eq!(counts, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_summary_reports_dropped_lines() {
    let mock_server = MockServer::start().await;

    let body = format!(
        "{}data: {{\"choices\":[{{\"delta\":\n{}",
        sse_body(&["kept"]),
        sse_body(&[" also kept"])
    );
    Mock::given(method("POST"))
        .and(path(AGENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let summary = client
        .generate_with_summary(&ContentAgentRequest::new("c1", "x"), "jwt", None)
        .await
        .unwrap();

    assert_eq!(summary.content, "kept also kept");
    assert_eq!(summary.fragments, 2);
    assert_eq!(summary.dropped_lines, 1);
}

#[tokio::test]
async fn test_non_success_status_fails_fast_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AGENT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream model unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .generate(&ContentAgentRequest::new("c1", "x"), "jwt", None)
        .await
        .unwrap_err();

    match &err {
        KaiError::Network(NetworkError::HttpStatus { status, message }) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "upstream model unavailable");
        }
        other => panic!("Expected HttpStatus error, got {:?}", other),
    }
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[tokio::test]
async fn test_unauthorized_requires_reauth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AGENT_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"msg\":\"Invalid JWT\"}"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .generate(&ContentAgentRequest::new("c1", "x"), "expired", None)
        .await
        .unwrap_err();

    assert!(err.requires_reauth());
    assert_eq!(err.category(), ErrorCategory::Auth);
    assert!(err.to_string().contains("Invalid JWT"));
}

#[tokio::test]
async fn test_no_content_status_is_missing_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AGENT_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .generate(&ContentAgentRequest::new("c1", "x"), "jwt", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        KaiError::Stream(StreamError::MissingBody { status: 204 })
    ));
}

#[tokio::test]
async fn test_custom_endpoint_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents/content"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_body(&["ok"]), "text/event-stream"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = AgentConfig::new(format!("{}/", mock_server.uri()), "anon-key")
        .unwrap()
        .with_endpoint_path("/agents/content");
    let client = ContentAgentClient::new(config).unwrap();

    let text = client
        .generate(&ContentAgentRequest::new("c1", "x"), "jwt", None)
        .await
        .unwrap();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn test_connection_refused() {
    let config = AgentConfig::new("http://127.0.0.1:59997", "anon-key").unwrap();
    let client = ContentAgentClient::new(config).unwrap();

    let err = client
        .generate(&ContentAgentRequest::new("c1", "x"), "jwt", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        KaiError::Network(NetworkError::ConnectionFailed { .. })
    ));
    assert!(err.is_retryable());
}
