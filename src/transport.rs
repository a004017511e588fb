//! HTTP capability used to reach the recognition service.
//!
//! [`SubmissionWorkflow`](crate::workflow::SubmissionWorkflow) never touches
//! `reqwest` directly; it holds an `Arc<dyn HttpTransport>`. Production code
//! uses [`ReqwestTransport`], tests substitute a scripted fake.

use crate::config::SubmitConfig;
use crate::error::SubmitError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// A fully received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase, e.g. `"Internal Server Error"`. May be empty.
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON `POST` and returns the complete response.
///
/// Implementations must not retry and must not impose a total deadline.
/// Any failure to obtain a response maps to [`SubmitError::Network`];
/// a non-2xx status is *not* an error at this layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, SubmitError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &SubmitConfig) -> Result<Self, SubmitError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SubmitError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, SubmitError> {
        debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        debug!("Response {} ({} bytes)", status, bytes.len());
        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: bytes.to_vec(),
        })
    }
}
