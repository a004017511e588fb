//! Configuration types for document submission.
//!
//! All submission behaviour is controlled through [`SubmitConfig`], built via
//! its [`SubmitConfigBuilder`]. The UI collaborators and the HTTP transport
//! are *not* part of the config; they are injected into
//! [`crate::workflow::SubmissionWorkflow::new`] so tests can swap them.

use crate::error::SubmitError;
use serde::{Deserialize, Serialize};

/// The recognition service's single `/ocr` endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ocrimpel-1032775540289.us-central1.run.app/ocr";

/// Configuration for a submission workflow.
///
/// # Example
/// ```rust
/// use ocr_submit::SubmitConfig;
///
/// let config = SubmitConfig::builder()
///     .endpoint("http://localhost:8080/ocr")
///     .document_types(["invoice", "receipt"])
///     .build()
///     .unwrap();
/// assert_eq!(config.document_types.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// URL receiving the `POST` with the JSON payload. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Valid document-type values offered by the selector.
    ///
    /// Empty means "accept any non-empty value".
    pub document_types: Vec<String>,

    /// TCP connect timeout in seconds. Default: None.
    ///
    /// Only the connect phase is bounded. Recognition can take several
    /// minutes, so the request as a whole never has a client-side deadline.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            document_types: Vec::new(),
            connect_timeout_secs: None,
        }
    }
}

impl SubmitConfig {
    /// Create a new builder for `SubmitConfig`.
    pub fn builder() -> SubmitConfigBuilder {
        SubmitConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SubmitConfig`].
#[derive(Debug)]
pub struct SubmitConfigBuilder {
    config: SubmitConfig,
}

impl SubmitConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn document_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.document_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = Some(secs);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SubmitConfig, SubmitError> {
        let c = &self.config;
        if !(c.endpoint.starts_with("http://") || c.endpoint.starts_with("https://")) {
            return Err(SubmitError::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                c.endpoint
            )));
        }
        if c.document_types.iter().any(|t| t.trim().is_empty()) {
            return Err(SubmitError::InvalidConfig(
                "document type options must be non-empty".into(),
            ));
        }
        if c.connect_timeout_secs == Some(0) {
            return Err(SubmitError::InvalidConfig(
                "connect timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
