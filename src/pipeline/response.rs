//! Response interpretation: HTTP status + body → [`StructuredResult`].
//!
//! Success bodies are expected to look like
//! `{"structured_data": {"fields": {...}}}`; any other shape degrades to an
//! empty result rather than an error. Failure bodies may carry a FastAPI-style
//! `{"detail": ...}`; without one the status line becomes the message.

use crate::error::SubmitError;
use crate::output::StructuredResult;
use crate::transport::HttpResponse;
use serde_json::Value;
use tracing::warn;

/// Turn a completed HTTP exchange into fields or a submission error.
pub fn interpret(response: &HttpResponse) -> Result<StructuredResult, SubmitError> {
    if !response.is_success() {
        let message = error_detail(&response.body).unwrap_or_else(|| {
            format!("HTTP {}: {}", response.status, response.status_text)
        });
        warn!("Service rejected request ({}): {}", response.status, message);
        return Err(SubmitError::Submission {
            status: Some(response.status),
            message,
        });
    }

    let body: Value =
        serde_json::from_slice(&response.body).map_err(|e| SubmitError::Submission {
            status: Some(response.status),
            message: format!("Invalid JSON in response: {e}"),
        })?;

    Ok(extract_fields(&body))
}

/// `structured_data.fields` when it is an object, otherwise empty.
pub fn extract_fields(body: &Value) -> StructuredResult {
    body.get("structured_data")
        .and_then(|s| s.get("fields"))
        .and_then(Value::as_object)
        .map(StructuredResult::from_json_object)
        .unwrap_or_default()
}

/// The `detail` of an error body. `null`, `false`, zero and the empty string
/// count as absent. Other non-string details (e.g. a list of validation
/// errors) are returned as their JSON text.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
