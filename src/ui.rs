//! UI slots the submission workflow talks to.
//!
//! The workflow does not own any presentation. It is handed one
//! implementation per slot through [`UiBindings`] and only ever calls the
//! methods below. A web front end maps them onto DOM elements; the CLI maps
//! them onto stderr/stdout; tests use the headless types at the bottom of
//! this module.
//!
//! All slot traits are `Send + Sync` so bindings can be shared with
//! whatever task drives the event loop.
//!
//! # Example
//!
//! ```rust
//! use ocr_submit::ui::HeadlessUi;
//!
//! let ui = HeadlessUi::new(["invoice", "receipt"]);
//! ui.selector.select("invoice");
//! let bindings = ui.bindings();
//! assert_eq!(bindings.document_type.value(), "invoice");
//! ```

use crate::output::{StatusKind, StructuredResult, WorkflowStatus};
use crate::pipeline::input::SelectedFile;
use crate::pipeline::render;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Status line.
pub trait StatusDisplay: Send + Sync {
    fn set_status(&self, status: &WorkflowStatus);
}

/// Result area.
pub trait ResultDisplay: Send + Sync {
    /// Empty the area when a new submission starts.
    fn clear(&self);

    /// Show the fields of a successful submission.
    fn show_fields(&self, result: &StructuredResult);

    /// Show a generic failure note after an error.
    fn show_failure(&self, note: &str);
}

/// Area describing the currently selected file.
pub trait FileInfoDisplay: Send + Sync {
    fn show_file(&self, file: &SelectedFile);
}

/// Drop zone. Only hover feedback is driven from here; the files themselves
/// arrive through [`crate::workflow::SubmissionWorkflow::drop_files`].
pub trait DropTarget: Send + Sync {
    fn set_highlighted(&self, highlighted: bool) {
        let _ = highlighted;
    }
}

/// The button that starts a submission.
pub trait SubmitTrigger: Send + Sync {
    fn set_enabled(&self, enabled: bool);
}

/// Document-type selector.
pub trait DocumentTypeSelector: Send + Sync {
    /// Currently selected value; empty when nothing is selected.
    fn value(&self) -> String;

    /// Valid non-empty values. Empty means the selector is free-form.
    fn options(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Blocking user alerts for incomplete forms.
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}

/// The collaborators a [`crate::workflow::SubmissionWorkflow`] is bound to.
#[derive(Clone)]
pub struct UiBindings {
    pub status: Arc<dyn StatusDisplay>,
    pub result: Arc<dyn ResultDisplay>,
    pub file_info: Arc<dyn FileInfoDisplay>,
    pub drop_target: Arc<dyn DropTarget>,
    pub trigger: Arc<dyn SubmitTrigger>,
    pub document_type: Arc<dyn DocumentTypeSelector>,
    pub alerter: Arc<dyn Alerter>,
}

impl std::fmt::Debug for UiBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiBindings").finish_non_exhaustive()
    }
}

// ── Headless bindings ────────────────────────────────────────────────────

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct PanelState {
    html: String,
    class: Option<StatusKind>,
    visible: bool,
    statuses: Vec<String>,
}

/// An in-memory HTML element: keeps the inner markup it was last given.
///
/// Implements the status, result and file-info slots the same way a DOM
/// element would be filled.
#[derive(Debug, Default)]
pub struct HtmlPanel {
    state: Mutex<PanelState>,
}

impl HtmlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current inner markup.
    pub fn html(&self) -> String {
        lock(&self.state).html.clone()
    }

    /// Status kind of the last status written, if any.
    pub fn kind(&self) -> Option<StatusKind> {
        lock(&self.state).class
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }

    /// Every status message written to this panel, oldest first.
    pub fn status_history(&self) -> Vec<String> {
        lock(&self.state).statuses.clone()
    }

    fn set(&self, html: String) {
        let mut s = lock(&self.state);
        s.html = html;
        s.visible = true;
    }
}

impl StatusDisplay for HtmlPanel {
    fn set_status(&self, status: &WorkflowStatus) {
        let mut s = lock(&self.state);
        s.html = render::escape_html(&status.message());
        s.class = Some(status.kind());
        s.visible = true;
        s.statuses.push(status.message());
    }
}

impl ResultDisplay for HtmlPanel {
    fn clear(&self) {
        lock(&self.state).html.clear();
    }

    fn show_fields(&self, result: &StructuredResult) {
        self.set(render::result_html(result));
    }

    fn show_failure(&self, note: &str) {
        self.set(render::escape_html(note));
    }
}

impl FileInfoDisplay for HtmlPanel {
    fn show_file(&self, file: &SelectedFile) {
        self.set(render::file_info_html(file));
    }
}

/// A button-like toggle.
#[derive(Debug)]
pub struct Toggle {
    enabled: AtomicBool,
    /// Every value ever written, in order.
    history: Mutex<Vec<bool>>,
}

impl Default for Toggle {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            history: Mutex::new(Vec::new()),
        }
    }
}

impl Toggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn history(&self) -> Vec<bool> {
        lock(&self.history).clone()
    }
}

impl SubmitTrigger for Toggle {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        lock(&self.history).push(enabled);
    }
}

/// Drop zone with a hover flag.
#[derive(Debug, Default)]
pub struct DropZone {
    highlighted: AtomicBool,
}

impl DropZone {
    pub fn is_highlighted(&self) -> bool {
        self.highlighted.load(Ordering::SeqCst)
    }
}

impl DropTarget for DropZone {
    fn set_highlighted(&self, highlighted: bool) {
        self.highlighted.store(highlighted, Ordering::SeqCst);
    }
}

/// Select element with a fixed option list.
#[derive(Debug, Default)]
pub struct Selector {
    value: Mutex<String>,
    options: Vec<String>,
}

impl Selector {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: Mutex::new(String::new()),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn select(&self, value: impl Into<String>) {
        *lock(&self.value) = value.into();
    }
}

impl DocumentTypeSelector for Selector {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }

    fn options(&self) -> Vec<String> {
        self.options.clone()
    }
}

/// Collects alerts instead of blocking on them.
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Mutex<Vec<String>>,
}

impl AlertLog {
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

impl Alerter for AlertLog {
    fn alert(&self, message: &str) {
        tracing::warn!("alert: {}", message);
        lock(&self.alerts).push(message.to_string());
    }
}

/// A full set of headless slots, keeping typed handles for inspection.
#[derive(Debug, Clone)]
pub struct HeadlessUi {
    pub status: Arc<HtmlPanel>,
    pub result: Arc<HtmlPanel>,
    pub file_info: Arc<HtmlPanel>,
    pub drop_zone: Arc<DropZone>,
    pub trigger: Arc<Toggle>,
    pub selector: Arc<Selector>,
    pub alerts: Arc<AlertLog>,
}

impl HeadlessUi {
    pub fn new<I, S>(document_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status: Arc::new(HtmlPanel::new()),
            result: Arc::new(HtmlPanel::new()),
            file_info: Arc::new(HtmlPanel::new()),
            drop_zone: Arc::new(DropZone::default()),
            trigger: Arc::new(Toggle::new()),
            selector: Arc::new(Selector::new(document_types)),
            alerts: Arc::new(AlertLog::default()),
        }
    }

    pub fn bindings(&self) -> UiBindings {
        UiBindings {
            status: self.status.clone(),
            result: self.result.clone(),
            file_info: self.file_info.clone(),
            drop_target: self.drop_zone.clone(),
            trigger: self.trigger.clone(),
            document_type: self.selector.clone(),
            alerter: self.alerts.clone(),
        }
    }
}
