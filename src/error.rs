//! Error types for the ocr-submit library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PreconditionError`] — the user has not finished filling the form (no
//!   file, no document type). These are raised *before* any I/O, surfaced as a
//!   blocking alert, and never reach the network.
//!
//! * [`SubmitError`] — everything else: the file could not be read or
//!   encoded, the service rejected the request, or the request never
//!   completed. All of these funnel into a single catch point inside
//!   [`crate::workflow::SubmissionWorkflow::submit`], which turns them into an
//!   `Error: <message>` status line.

use std::path::PathBuf;
use thiserror::Error;

/// A form field required for submission is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// No file has been chosen via browse or drop.
    #[error("Please select a PDF or image file.")]
    NoFile,

    /// The document-type selector is empty or holds a value outside its options.
    #[error("Please select a document type.")]
    NoDocumentType,
}

/// All errors returned by the ocr-submit library.
#[derive(Debug, Error)]
pub enum SubmitError {
    // ── Form errors ───────────────────────────────────────────────────────
    /// Submission was attempted before the form was complete.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    // ── File errors ───────────────────────────────────────────────────────
    /// The selected file could not be read from disk.
    #[error("Error reading file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but produced no usable base64 text.
    #[error("{0}")]
    Encoding(String),

    // ── Service errors ────────────────────────────────────────────────────
    /// The service answered with a non-2xx status or an unreadable body.
    ///
    /// The message is the service's `detail` field when present, otherwise
    /// `HTTP <status>: <status text>`.
    #[error("{message}")]
    Submission { status: Option<u16>, message: String },

    /// The request could not be completed at all (DNS, connect, reset…).
    #[error("Network error: {0}")]
    Network(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SubmitError {
    /// `true` for errors that are raised before any I/O happens.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SubmitError::Precondition(_))
    }
}
