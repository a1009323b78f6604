//! HTTP client for the hosted agent-chat gateway.
//!
//! Covers the session, query, and media endpoints. Streamed queries hand
//! the response body to [`AnswerAccumulator`]; everything before the body
//! (connection faults, non-success statuses) surfaces as a hard error,
//! distinct from a stream that completed with an empty answer.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::stream::AnswerAccumulator;
use crate::telemetry;
use crate::types::{
    AccumulatedAnswer, MediaFile, QueryRequest, SessionRequest, StreamEvent, SyncAnswer,
};
use crate::{MuninnError, Result};

/// Default base URL for the production gateway.
const DEFAULT_BASE_URL: &str = "https://api.on-demand.io";

/// Client for the agent-chat gateway.
///
/// # Example
///
/// ```rust,no_run
/// use muninn::{ChatClient, ModelConfigs, QueryRequest, SessionRequest};
///
/// #[tokio::main]
/// async fn main() -> muninn::Result<()> {
///     let client = ChatClient::builder().api_key("your-key").build()?;
///
///     let session = client
///         .create_session(&SessionRequest::new("user-42").agent_id("agent-1712327325"))
///         .await?;
///
///     let answer = client
///         .query(
///             &session,
///             &QueryRequest::new("predefined-openai-gpt4o", "Plan my study week.")
///                 .model_configs(ModelConfigs::default().temperature(0.7).max_tokens(500)),
///         )
///         .await?;
///
///     println!("{}", answer.answer);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ChatClient {
    api_key: String,
    http: Client,
    base_url: String,
    created_by: String,
}

impl ChatClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder::new()
    }

    /// Create a session the gateway will thread queries through.
    ///
    /// Returns the session id from the gateway's creation envelope.
    #[instrument(skip_all)]
    pub async fn create_session(&self, request: &SessionRequest) -> Result<String> {
        let url = format!("{}/chat/v1/sessions", self.base_url);
        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .post(&url)
                .header("apikey", self.api_key.as_str())
                .json(request)
                .send()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            let response = check_status(response, "session").await?;
            let envelope: Envelope<SessionData> = response
                .json()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            Ok(envelope.data.id)
        }
        .await;
        record_request("create_session", start, result.is_ok());
        if let Ok(id) = &result {
            debug!(session_id = %id, "created chat session");
        }
        result
    }

    /// Submit a query in streaming mode and accumulate the full answer.
    ///
    /// An empty answer is a successful result, not an error; whether to
    /// surface it as a failure is the caller's decision.
    #[instrument(skip(self, request))]
    pub async fn query(
        &self,
        session_id: &str,
        request: &QueryRequest,
    ) -> Result<AccumulatedAnswer> {
        self.query_inner(session_id, request, AnswerAccumulator::new())
            .await
    }

    /// Like [`query`](Self::query), forwarding `statusLog` and unknown
    /// events to `on_status` for UI progress display.
    pub async fn query_with_status<F>(
        &self,
        session_id: &str,
        request: &QueryRequest,
        on_status: F,
    ) -> Result<AccumulatedAnswer>
    where
        F: FnMut(&StreamEvent) + Send,
    {
        self.query_inner(
            session_id,
            request,
            AnswerAccumulator::with_status_callback(on_status),
        )
        .await
    }

    /// Submit a query in sync mode (single JSON response, no stream).
    #[instrument(skip(self, request))]
    pub async fn query_sync(&self, session_id: &str, request: &QueryRequest) -> Result<SyncAnswer> {
        let url = self.query_url(session_id);
        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .post(&url)
                .header("apikey", self.api_key.as_str())
                .json(&QueryBody {
                    request,
                    response_mode: "sync",
                })
                .send()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            let response = check_status(response, session_id).await?;
            let envelope: Envelope<SyncAnswer> = response
                .json()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            Ok(envelope.data)
        }
        .await;
        record_request("query_sync", start, result.is_ok());
        result
    }

    /// Upload raw file bytes into a session so agents can read them.
    ///
    /// # Arguments
    /// * `session_id` - Session the file is attached to
    /// * `file_name` - Name reported to the gateway
    /// * `bytes` - File contents
    /// * `agents` - Agent ids allowed to process the file
    #[instrument(skip(self, bytes))]
    pub async fn upload_file(
        &self,
        session_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        agents: &[String],
    ) -> Result<MediaFile> {
        let url = format!("{}/media/v1/public/file/raw", self.base_url);
        let start = Instant::now();
        let result = async {
            let mut form = reqwest::multipart::Form::new()
                .part(
                    "file",
                    reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_owned()),
                )
                .text("sessionId", session_id.to_owned())
                .text("name", file_name.to_owned())
                .text("createdBy", self.created_by.clone())
                .text("updatedBy", self.created_by.clone())
                .text("responseMode", "sync");
            for agent in agents {
                form = form.text("agents", agent.clone());
            }
            let response = self
                .http
                .post(&url)
                .header("apikey", self.api_key.as_str())
                .multipart(form)
                .send()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            let response = check_status(response, file_name).await?;
            let envelope: Envelope<MediaFile> = response
                .json()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            Ok(envelope.data)
        }
        .await;
        record_request("upload_file", start, result.is_ok());
        result
    }

    /// Register a remote URL as a media file, processed by the named plugins.
    #[instrument(skip(self))]
    pub async fn upload_url(
        &self,
        file_url: &str,
        plugins: &[String],
        name: &str,
    ) -> Result<MediaFile> {
        let url = format!("{}/media/v1/public/file", self.base_url);
        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .post(&url)
                .header("apikey", self.api_key.as_str())
                .json(&UrlUploadBody {
                    url: file_url,
                    plugins,
                    response_mode: "sync",
                    created_by: &self.created_by,
                    name,
                })
                .send()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            let response = check_status(response, name).await?;
            let envelope: Envelope<MediaFile> = response
                .json()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            Ok(envelope.data)
        }
        .await;
        record_request("upload_url", start, result.is_ok());
        result
    }

    async fn query_inner(
        &self,
        session_id: &str,
        request: &QueryRequest,
        accumulator: AnswerAccumulator<'_>,
    ) -> Result<AccumulatedAnswer> {
        let url = self.query_url(session_id);
        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .post(&url)
                .header("apikey", self.api_key.as_str())
                .json(&QueryBody {
                    request,
                    response_mode: "stream",
                })
                .send()
                .await
                .map_err(|e| MuninnError::Http(e.to_string()))?;
            let response = check_status(response, session_id).await?;

            // Connection faults mid-stream are transport errors. Malformed
            // content is handled inside the accumulator and never errors.
            accumulator
                .consume(response.bytes_stream())
                .await
                .map_err(|e| MuninnError::Stream(e.to_string()))
        }
        .await;
        record_request("query", start, result.is_ok());
        if let Ok(answer) = &result
            && answer.is_empty()
        {
            debug!(session_id, "stream completed with empty answer");
        }
        result
    }

    fn query_url(&self, session_id: &str) -> String {
        format!("{}/chat/v1/sessions/{}/query", self.base_url, session_id)
    }
}

/// Map a non-success response to the matching error.
///
/// Reads the body only on the generic path, so success responses can still
/// stream.
async fn check_status(response: reqwest::Response, resource: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!(%status, resource, "gateway returned non-success status");
    match status.as_u16() {
        401 | 403 => Err(MuninnError::AuthenticationFailed),
        404 => Err(MuninnError::SessionNotFound(resource.to_owned())),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            Err(MuninnError::RateLimited { retry_after })
        }
        code => {
            let message = response.text().await.unwrap_or_default();
            Err(MuninnError::Api {
                status: code,
                message,
            })
        }
    }
}

/// Record request outcome metrics (counter + histogram).
fn record_request(operation: &'static str, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "operation" => operation,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "operation" => operation,
    )
    .record(start.elapsed().as_secs_f64());
}

/// Builder for configuring [`ChatClient`] instances.
pub struct ChatClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    created_by: Option<String>,
}

impl ChatClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: None,
            created_by: None,
        }
    }

    /// Set the gateway API key (required).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the gateway base URL (for testing with wiremock).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the overall request deadline in seconds (default: 120).
    ///
    /// For streamed queries this bounds the entire operation, including
    /// draining the stream; the accumulator itself enforces no timeout.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the `createdBy`/`updatedBy` identity sent with media uploads.
    pub fn created_by(mut self, name: impl Into<String>) -> Self {
        self.created_by = Some(name.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ChatClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| MuninnError::Configuration("API key is required".into()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs.unwrap_or(120)))
            .build()
            .map_err(|e| MuninnError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // A trailing slash would double up when joining paths.
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(ChatClient {
            api_key,
            http,
            base_url,
            created_by: self.created_by.unwrap_or_else(|| "muninn".to_string()),
        })
    }
}

impl Default for ChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Wire structs
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody<'a> {
    #[serde(flatten)]
    request: &'a QueryRequest,
    response_mode: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UrlUploadBody<'a> {
    url: &'a str,
    plugins: &'a [String],
    response_mode: &'static str,
    created_by: &'a str,
    name: &'a str,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct SessionData {
    id: String,
}
