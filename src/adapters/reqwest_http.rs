//! Reqwest-based HTTP client adapter.
//!
//! This module provides a production HTTP client implementation using reqwest,
//! implementing the [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

use crate::error::{classify_reqwest_error, NetworkError};
use crate::traits::{ByteStream, Headers, HttpClient, StreamingResponse};

/// Statuses that never carry a response body.
const NULL_BODY_STATUSES: [u16; 3] = [204, 205, 304];

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use kai::adapters::ReqwestHttpClient;
/// use kai::traits::HttpClient;
///
/// let client = ReqwestHttpClient::with_connect_timeout(Duration::from_secs(10))?;
/// let response = client.post_stream("https://api.example.com/agent", "{}", &Headers::new()).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a client whose connector gives up after `timeout`.
    ///
    /// Only connection setup is bounded; a slow but live stream is not cut off.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| NetworkError::Other {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamingResponse, NetworkError> {
        let builder = self.client.post(url).body(body.to_string());
        let builder = Self::apply_headers(builder, headers);

        let response = builder
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, url))?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());

        if NULL_BODY_STATUSES.contains(&status) {
            return Ok(StreamingResponse::with_headers(status, response_headers, None));
        }

        let url = url.to_string();
        let stream = response
            .bytes_stream()
            .map(move |result| result.map_err(|e| classify_reqwest_error(&e, &url)));
        let body: ByteStream = Box::pin(stream);

        Ok(StreamingResponse::with_headers(status, response_headers, Some(body)))
    }
}
