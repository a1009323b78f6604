//! Wiremock integration tests for ChatClient.
//!
//! These tests verify correct HTTP interaction and error handling using
//! mocked gateway responses, including streamed `text/event-stream` bodies.

use muninn::{ChatClient, ModelConfigs, MuninnError, QueryRequest, SessionRequest, StreamEvent};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ChatClient {
    ChatClient::builder()
        .api_key("test_key")
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_create_session_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions"))
        .and(header("apikey", "test_key"))
        .and(body_partial_json(serde_json::json!({
            "externalUserId": "user-1",
            "agentIds": ["agent-1712327325"],
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": { "id": "sess-1" }
            })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = SessionRequest::new("user-1")
        .agent_id("agent-1712327325")
        .context("source", "dashboard_advisor");

    let session_id = client
        .create_session(&request)
        .await
        .expect("session creation should succeed");
    assert_eq!(session_id, "sess-1");
}

#[tokio::test]
async fn test_create_session_auth_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.create_session(&SessionRequest::new("user-1")).await;
    assert!(matches!(result, Err(MuninnError::AuthenticationFailed)));
}

// ============================================================================
// Streamed queries
// ============================================================================

#[tokio::test]
async fn test_query_accumulates_streamed_answer() {
    let mock_server = MockServer::start().await;

    let body = concat!(
        "event:message\n",
        "data: {\"eventType\":\"fulfillment\",\"answer\":\"Hel\",\"sessionId\":\"s1\"}\n",
        "data: {\"eventType\":\"fulfillment\",\"answer\":\"lo\",\"messageId\":\"m1\"}\n",
        "data: {\"eventType\":\"metricsLog\",\"publicMetrics\":{\"tokens\":12}}\n",
        "data: [DONE]\n",
    );

    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions/sess-1/query"))
        .and(header("apikey", "test_key"))
        .and(body_partial_json(serde_json::json!({
            "endpointId": "predefined-openai-gpt4o",
            "query": "Generate Academic Advice",
            "responseMode": "stream",
            "modelConfigs": { "temperature": 0.7 },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = QueryRequest::new("predefined-openai-gpt4o", "Generate Academic Advice")
        .model_configs(ModelConfigs::default().temperature(0.7).max_tokens(500));

    let answer = client
        .query("sess-1", &request)
        .await
        .expect("query should succeed");
    assert_eq!(answer.answer, "Hello");
    assert_eq!(answer.session_id, "s1");
    assert_eq!(answer.message_id, "m1");
    assert_eq!(answer.metrics["tokens"], 12);
}

#[tokio::test]
async fn test_query_with_status_forwards_progress_events() {
    let mock_server = MockServer::start().await;

    let body = concat!(
        "data: {\"eventType\":\"statusLog\",\"currentStatusLog\":{\"statusMessage\":\"Executing the agents...\"}}\n",
        "data: {\"eventType\":\"fulfillment\",\"answer\":\"done\"}\n",
        "data: [DONE]\n",
    );

    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions/sess-1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut statuses = Vec::new();
    let answer = client
        .query_with_status(
            "sess-1",
            &QueryRequest::new("endpoint-1", "hi"),
            |event| {
                if let StreamEvent::StatusLog { message: Some(msg) } = event {
                    statuses.push(msg.clone());
                }
            },
        )
        .await
        .expect("query should succeed");

    assert_eq!(answer.answer, "done");
    assert_eq!(statuses, vec!["Executing the agents...".to_owned()]);
}

#[tokio::test]
async fn test_query_empty_stream_is_success_not_error() {
    let mock_server = MockServer::start().await;

    // No fulfillment events at all: still a completed result.
    let body = "data: [DONE]\n";
    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions/sess-1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let answer = client
        .query("sess-1", &QueryRequest::new("endpoint-1", "hi"))
        .await
        .expect("empty stream should not be an error");
    assert!(answer.is_empty());
}

#[tokio::test]
async fn test_query_rate_limited_with_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions/sess-1/query"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .query("sess-1", &QueryRequest::new("endpoint-1", "hi"))
        .await;
    match result {
        Err(MuninnError::RateLimited { retry_after }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(30)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_query_session_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions/missing/query"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .query("missing", &QueryRequest::new("endpoint-1", "hi"))
        .await;
    assert!(matches!(result, Err(MuninnError::SessionNotFound(id)) if id == "missing"));
}

#[tokio::test]
async fn test_query_server_error_surfaces_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions/sess-1/query"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .query("sess-1", &QueryRequest::new("endpoint-1", "hi"))
        .await;
    match result {
        Err(MuninnError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_query_connection_failure_is_transport_error() {
    // Nothing listens here; the request itself must fail, distinctly from
    // an empty-but-successful stream.
    let client = ChatClient::builder()
        .api_key("test_key")
        .base_url("http://127.0.0.1:1")
        .timeout(2)
        .build()
        .unwrap();

    let result = client
        .query("sess-1", &QueryRequest::new("endpoint-1", "hi"))
        .await;
    assert!(matches!(result, Err(MuninnError::Http(_))));
}

// ============================================================================
// Sync queries
// ============================================================================

#[tokio::test]
async fn test_query_sync_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/v1/sessions/sess-1/query"))
        .and(body_partial_json(serde_json::json!({
            "responseMode": "sync",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "answer": "Question 1: what is ohm's law?",
                    "sessionId": "sess-1",
                    "messageId": "m9"
                }
            })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let answer = client
        .query_sync("sess-1", &QueryRequest::new("endpoint-1", "Start a quiz"))
        .await
        .expect("sync query should succeed");
    assert_eq!(answer.answer, "Question 1: what is ohm's law?");
    assert_eq!(answer.session_id.as_deref(), Some("sess-1"));
    assert_eq!(answer.message_id.as_deref(), Some("m9"));
}

// ============================================================================
// Media uploads
// ============================================================================

#[tokio::test]
async fn test_upload_file_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/media/v1/public/file/raw"))
        .and(header("apikey", "test_key"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": { "id": "file-1", "name": "notes.pdf" }
            })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let file = client
        .upload_file(
            "sess-1",
            "notes.pdf",
            b"%PDF-1.4 fake".to_vec(),
            &["agent-1713954536".to_owned()],
        )
        .await
        .expect("upload should succeed");
    assert_eq!(file.id.as_deref(), Some("file-1"));
    assert_eq!(file.name.as_deref(), Some("notes.pdf"));
}

#[tokio::test]
async fn test_upload_url_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/media/v1/public/file"))
        .and(body_partial_json(serde_json::json!({
            "url": "https://example.com/lecture.mp4",
            "plugins": ["plugin-1713961903"],
            "responseMode": "sync",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "id": "file-2", "url": "https://example.com/lecture.mp4" }
            })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let file = client
        .upload_url(
            "https://example.com/lecture.mp4",
            &["plugin-1713961903".to_owned()],
            "lecture-recording",
        )
        .await
        .expect("url upload should succeed");
    assert_eq!(file.id.as_deref(), Some("file-2"));
}
