//! Encoding: raw file bytes → base64 text wrapped in an [`EncodedPayload`].
//!
//! The service takes the whole document inline in the JSON body, so the
//! standard padded alphabet is used (no data-URI prefix, no line breaks).

use crate::error::SubmitError;
use crate::pipeline::input::SelectedFile;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Characters of the base64 text echoed into debug logs.
const LOG_SAMPLE_CHARS: usize = 100;

/// Request body sent to the recognition service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPayload {
    pub image_base64: String,
    pub filename: String,
    pub document_type: String,
}

impl EncodedPayload {
    pub fn new(
        image_base64: impl Into<String>,
        filename: impl Into<String>,
        document_type: impl Into<String>,
    ) -> Self {
        Self {
            image_base64: image_base64.into(),
            filename: filename.into(),
            document_type: document_type.into(),
        }
    }

    /// Serialise to the JSON request body.
    pub fn to_json(&self) -> Result<String, SubmitError> {
        serde_json::to_string(self)
            .map_err(|e| SubmitError::Encoding(format!("Failed to serialise request: {e}")))
    }
}

/// Base64-encode a byte buffer. An empty result is rejected.
pub fn encode_bytes(bytes: &[u8]) -> Result<String, SubmitError> {
    let b64 = STANDARD.encode(bytes);
    if b64.is_empty() {
        return Err(SubmitError::Encoding("The file is empty".into()));
    }
    Ok(b64)
}

/// Read `file` and build the payload for `document_type`.
pub async fn encode_file(
    file: &SelectedFile,
    document_type: &str,
) -> Result<EncodedPayload, SubmitError> {
    let bytes = file.read().await?;
    let b64 = encode_bytes(&bytes)?;
    debug!("Encoded '{}' → {} chars base64", file.name(), b64.len());

    let payload = EncodedPayload::new(b64, file.name(), document_type);
    log_payload(&payload);
    Ok(payload)
}

fn log_payload(payload: &EncodedPayload) {
    let sample: String = payload.image_base64.chars().take(LOG_SAMPLE_CHARS).collect();
    debug!(
        document_type = %payload.document_type,
        filename = %payload.filename,
        base64_len = payload.image_base64.len(),
        "Payload ready; base64 sample: {}...",
        sample
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_round_trips() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let b64 = encode_bytes(&bytes).expect("encode should succeed");
        assert_eq!(STANDARD.decode(&b64).expect("valid base64"), bytes);
    }

    #[test]
    fn empty_file_is_encoding_error() {
        let err = encode_bytes(&[]).unwrap_err();
        assert!(matches!(err, SubmitError::Encoding(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn payload_has_exact_keys() {
        let p = EncodedPayload::new("QUJD", "doc.pdf", "invoice");
        let v: serde_json::Value = serde_json::from_str(&p.to_json().unwrap()).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["image_base64"], "QUJD");
        assert_eq!(obj["filename"], "doc.pdf");
        assert_eq!(obj["document_type"], "invoice");
    }

    #[tokio::test]
    async fn encode_file_from_memory() {
        let f = SelectedFile::from_bytes("a.png", b"ABC".to_vec());
        let p = encode_file(&f, "receipt").await.unwrap();
        assert_eq!(p.image_base64, "QUJD");
        assert_eq!(p.filename, "a.png");
        assert_eq!(p.document_type, "receipt");
    }

    #[tokio::test]
    async fn encode_zero_byte_file_fails() {
        let f = SelectedFile::from_bytes("empty.pdf", Vec::new());
        assert!(matches!(
            encode_file(&f, "invoice").await,
            Err(SubmitError::Encoding(_))
        ));
    }
}
