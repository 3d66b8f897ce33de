//! Content agent API client.
//!
//! Sends an authenticated generation request and decodes the streamed
//! answer with [`crate::sse`]. Fails fast: no retries, no buffering beyond
//! what the decoder needs.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::adapters::ReqwestHttpClient;
use crate::config::AgentConfig;
use crate::error::{KaiError, KaiResult, NetworkError, StreamError};
use crate::sse::{parse_openai_stream_with_summary, ParseOptions, StreamSummary};
use crate::traits::{Headers, HttpClient};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Body of a content generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAgentRequest {
    /// Agency client the content is generated for
    pub client_id: String,
    /// Free-form instruction for the agent
    pub request: String,
    /// Output format hint (e.g. "carousel", "thread")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Target platform hint (e.g. "instagram", "linkedin")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl ContentAgentRequest {
    /// Request with no format or platform hints.
    pub fn new(client_id: impl Into<String>, request: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            request: request.into(),
            format: None,
            platform: None,
        }
    }

    /// Set the output format hint.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the target platform hint.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// Client for the content agent endpoint.
///
/// Holds its configuration and HTTP client explicitly so tests can swap in
/// [`MockHttpClient`](crate::adapters::MockHttpClient) or point the config
/// at a local server.
#[derive(Clone)]
pub struct ContentAgentClient {
    config: AgentConfig,
    http: Arc<dyn HttpClient>,
}

impl ContentAgentClient {
    /// Create a client backed by reqwest, honoring the config's connect timeout.
    pub fn new(config: AgentConfig) -> KaiResult<Self> {
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout)?;
        Ok(Self::with_http_client(config, Arc::new(http)))
    }

    /// Create a client with a custom HTTP implementation.
    pub fn with_http_client(config: AgentConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn build_headers(&self, access_token: &str, request_id: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", access_token),
        );
        headers.insert("apikey".to_string(), self.config.api_key().to_string());
        headers.insert(REQUEST_ID_HEADER.to_string(), request_id.to_string());
        headers
    }

    /// Generate content and return the assembled text.
    ///
    /// `options` receives each fragment as it is decoded.
    pub async fn generate(
        &self,
        request: &ContentAgentRequest,
        access_token: &str,
        options: Option<ParseOptions<'_>>,
    ) -> KaiResult<String> {
        self.generate_with_summary(request, access_token, options)
            .await
            .map(|summary| summary.content)
    }

    /// Generate content and return the decode summary.
    ///
    /// # Errors
    /// - `KaiError::Network(HttpStatus)` for a non-2xx status; the message
    ///   is the raw response body
    /// - `KaiError::Stream(MissingBody)` when a 2xx response has no body
    /// - `KaiError::Network(..)` for connection and mid-stream transport failures
    pub async fn generate_with_summary(
        &self,
        request: &ContentAgentRequest,
        access_token: &str,
        options: Option<ParseOptions<'_>>,
    ) -> KaiResult<StreamSummary> {
        let url = self.config.endpoint_url();
        let request_id = Uuid::new_v4().to_string();
        let headers = self.build_headers(access_token, &request_id);
        let body = serde_json::to_string(request).map_err(|e| NetworkError::InvalidResponse {
            message: format!("Failed to encode request: {}", e),
        })?;

        info!(
            request_id = %request_id,
            client_id = %request.client_id,
            "Calling content agent"
        );

        let response = self.http.post_stream(&url, &body, &headers).await?;
        let status = response.status;
        debug!(request_id = %request_id, status, "Content agent responded");

        if !response.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(request_id = %request_id, status, "Content agent request failed");
            return Err(KaiError::Network(NetworkError::HttpStatus { status, message }));
        }

        let Some(stream) = response.body else {
            warn!(request_id = %request_id, status, "Content agent response has no body");
            return Err(StreamError::MissingBody { status }.into());
        };

        let summary = parse_openai_stream_with_summary(stream, options).await?;
        info!(
            request_id = %request_id,
            fragments = summary.fragments,
            dropped_lines = summary.dropped_lines,
            "Content agent stream finished"
        );

        Ok(summary)
    }
}

impl std::fmt::Debug for ContentAgentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentAgentClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Call the content agent once and return the assembled text.
pub async fn call_kai_content_agent(
    client: &ContentAgentClient,
    request: &ContentAgentRequest,
    access_token: &str,
    options: Option<ParseOptions<'_>>,
) -> KaiResult<String> {
    client.generate(request, access_token, options).await
}
