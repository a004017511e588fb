//! The submission workflow: capture → validate → encode → submit → render.
//!
//! ```text
//! Idle ──(file)──▶ Ready ──submit()──▶ Reading ──▶ Submitting ──▶ Ready
//!                    ▲                                              │
//!                    └────────── success or error, trigger on ──────┘
//! ```
//!
//! [`SubmissionWorkflow::submit`] takes `&mut self`, so a second submission
//! on the same workflow cannot start while one is in flight.

use crate::config::SubmitConfig;
use crate::error::{PreconditionError, SubmitError};
use crate::output::{StructuredResult, SubmissionOutcome, WorkflowPhase, WorkflowStatus};
use crate::pipeline::input::{FileSelection, SelectedFile};
use crate::pipeline::{encode, render, response};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::ui::{SubmitTrigger, UiBindings};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{error, info};

/// Phase shared between the workflow and its in-flight guard.
#[derive(Debug, Clone)]
struct SharedPhase(Arc<Mutex<WorkflowPhase>>);

impl SharedPhase {
    fn new(phase: WorkflowPhase) -> Self {
        Self(Arc::new(Mutex::new(phase)))
    }

    fn get(&self) -> WorkflowPhase {
        *self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set(&self, phase: WorkflowPhase) {
        *self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = phase;
    }
}

/// Disables the trigger on creation. On drop it re-enables the trigger and
/// puts the workflow back to `Ready`. This also runs when the submit future
/// is dropped mid-request.
struct InFlightGuard {
    trigger: Arc<dyn SubmitTrigger>,
    phase: SharedPhase,
}

impl InFlightGuard {
    fn start(trigger: Arc<dyn SubmitTrigger>, phase: SharedPhase) -> Self {
        trigger.set_enabled(false);
        Self { trigger, phase }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.phase.set(WorkflowPhase::Ready);
        self.trigger.set_enabled(true);
    }
}

/// One reusable document submission form.
pub struct SubmissionWorkflow {
    config: SubmitConfig,
    ui: UiBindings,
    transport: Arc<dyn HttpTransport>,
    selection: FileSelection,
    phase: SharedPhase,
}

impl std::fmt::Debug for SubmissionWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionWorkflow")
            .field("config", &self.config)
            .field("selection", &self.selection)
            .field("phase", &self.phase.get())
            .finish_non_exhaustive()
    }
}

impl SubmissionWorkflow {
    /// Bind a workflow to its UI slots and an HTTP transport.
    ///
    /// The status slot is reset to [`WorkflowStatus::Idle`].
    pub fn new(config: SubmitConfig, ui: UiBindings, transport: Arc<dyn HttpTransport>) -> Self {
        ui.status.set_status(&WorkflowStatus::Idle);
        Self {
            config,
            ui,
            transport,
            selection: FileSelection::new(),
            phase: SharedPhase::new(WorkflowPhase::Idle),
        }
    }

    /// Bind a workflow that talks to `config.endpoint` over `reqwest`.
    pub fn with_reqwest(config: SubmitConfig, ui: UiBindings) -> Result<Self, SubmitError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(config, ui, Arc::new(transport)))
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase.get()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selection.active()
    }

    // ── Capture ──────────────────────────────────────────────────────────

    /// Click-to-browse selection; replaces any previous file.
    pub fn browse(&mut self, file: SelectedFile) {
        let file = self.selection.browse(file);
        self.ui.file_info.show_file(file);
        self.phase.set(WorkflowPhase::Ready);
    }

    pub fn drag_enter(&self) {
        self.ui.drop_target.set_highlighted(true);
    }

    pub fn drag_leave(&self) {
        self.ui.drop_target.set_highlighted(false);
    }

    /// Drop selection; only the first file is kept. An empty drop changes
    /// nothing except clearing the hover highlight.
    pub fn drop_files<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        self.ui.drop_target.set_highlighted(false);
        if let Some(file) = self.selection.drop_files(files) {
            self.ui.file_info.show_file(file);
            self.phase.set(WorkflowPhase::Ready);
        }
    }

    // ── Submit ───────────────────────────────────────────────────────────

    /// Validate the form, send the document and render the outcome.
    ///
    /// Precondition failures raise an alert and return before any I/O.
    /// Every other failure is logged, shown as `Error: <message>` in the
    /// status slot with a failure note in the result slot, and returned.
    /// The file and document type stay selected either way.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, SubmitError> {
        let (file, document_type) = match self.check_preconditions() {
            Ok(ready) => ready,
            Err(e) => {
                self.ui.alerter.alert(&e.to_string());
                return Err(e.into());
            }
        };

        self.ui.status.set_status(&WorkflowStatus::Reading);
        self.ui.result.clear();
        let _in_flight = InFlightGuard::start(self.ui.trigger.clone(), self.phase.clone());

        let outcome = self.run(&file, &document_type).await;

        match outcome {
            Ok(outcome) => {
                info!(
                    "Processed '{}' as '{}': {} field(s) in {}s",
                    outcome.filename,
                    outcome.document_type,
                    outcome.fields.len(),
                    outcome.elapsed_display()
                );
                self.ui.status.set_status(&WorkflowStatus::Success {
                    elapsed: outcome.elapsed,
                });
                self.ui.result.show_fields(&outcome.fields);
                Ok(outcome)
            }
            Err(e) => {
                error!("OCR submission failed for '{}': {}", file.name(), e);
                self.ui.status.set_status(&WorkflowStatus::Error {
                    message: e.to_string(),
                });
                self.ui.result.show_failure(render::FAILURE_NOTE);
                Err(e)
            }
        }
    }

    fn check_preconditions(&self) -> Result<(SelectedFile, String), PreconditionError> {
        let file = self.selection.active().ok_or(PreconditionError::NoFile)?;

        let selector = &self.ui.document_type;
        let document_type = selector.value();
        if document_type.is_empty() {
            return Err(PreconditionError::NoDocumentType);
        }
        let options = selector.options();
        if !options.is_empty() && !options.contains(&document_type) {
            return Err(PreconditionError::NoDocumentType);
        }

        Ok((file.clone(), document_type))
    }

    async fn run(
        &mut self,
        file: &SelectedFile,
        document_type: &str,
    ) -> Result<SubmissionOutcome, SubmitError> {
        self.phase.set(WorkflowPhase::Reading);
        let payload = encode::encode_file(file, document_type).await?;
        let body = payload.to_json()?;
        drop(payload);

        self.phase.set(WorkflowPhase::Submitting);
        self.ui.status.set_status(&WorkflowStatus::Submitting);
        info!(
            "Submitting '{}' ({}) to {}",
            file.name(),
            document_type,
            self.config.endpoint
        );

        let start = Instant::now();
        let response = self.transport.post_json(&self.config.endpoint, body).await?;
        let elapsed = start.elapsed();

        let fields: StructuredResult = response::interpret(&response)?;
        Ok(SubmissionOutcome {
            filename: file.name().to_string(),
            document_type: document_type.to_string(),
            fields,
            elapsed,
        })
    }
}
