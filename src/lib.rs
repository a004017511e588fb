//! # ocr-submit
//!
//! Submit one document (image or PDF) to a remote OCR service and render the
//! structured fields it extracts.
//!
//! The recognition itself happens entirely on the service. This crate owns
//! the client side of the exchange: picking the file, checking the form is
//! complete, base64-encoding the bytes, issuing exactly one JSON `POST`, and
//! turning the answer (or the failure) into user-facing status and result
//! text.
//!
//! ## Pipeline Overview
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Capture   browse or drop; only the first dropped file is kept
//!  ├─ 2. Validate  file and document type present, else alert
//!  ├─ 3. Encode    async read → base64 → {image_base64, filename, document_type}
//!  ├─ 4. Submit    one POST, no retry, no client-side deadline
//!  ├─ 5. Interpret 2xx → structured_data.fields, else detail / status line
//!  └─ 6. Render    escaped "key: value" lines or a placeholder
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ocr_submit::{SelectedFile, SubmissionWorkflow, SubmitConfig};
//! use ocr_submit::ui::HeadlessUi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SubmitConfig::builder()
//!         .document_types(["invoice", "receipt"])
//!         .build()?;
//!     let ui = HeadlessUi::new(config.document_types.clone());
//!     let mut workflow = SubmissionWorkflow::with_reqwest(config, ui.bindings())?;
//!
//!     workflow.browse(SelectedFile::from_path("invoice.pdf")?);
//!     ui.selector.select("invoice");
//!     let outcome = workflow.submit().await?;
//!     for (name, value) in outcome.fields.iter() {
//!         println!("{name}: {value}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `ocr-submit` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod transport;
pub mod ui;
pub mod workflow;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SubmitConfig, SubmitConfigBuilder, DEFAULT_ENDPOINT};
pub use error::{PreconditionError, SubmitError};
pub use output::{StatusKind, StructuredResult, SubmissionOutcome, WorkflowPhase, WorkflowStatus};
pub use pipeline::encode::EncodedPayload;
pub use pipeline::input::{FileSource, SelectedFile};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use ui::UiBindings;
pub use workflow::SubmissionWorkflow;
