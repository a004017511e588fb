//! CLI binary for ocr-submit.
//!
//! A thin shim over the library crate: maps CLI flags to `SubmitConfig`,
//! binds the workflow's UI slots to the terminal, and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ocr_submit::pipeline::render;
use ocr_submit::ui::{
    Alerter, DropTarget, FileInfoDisplay, ResultDisplay, Selector, StatusDisplay, SubmitTrigger,
};
use ocr_submit::{
    SelectedFile, StatusKind, StructuredResult, SubmissionWorkflow, SubmitConfig, UiBindings,
    WorkflowStatus, DEFAULT_ENDPOINT,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Terminal UI slots ────────────────────────────────────────────────────────

/// Status line on stderr. While loading, a spinner carries the message.
struct TerminalStatus {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl TerminalStatus {
    fn new(show_progress: bool, quiet: bool) -> Self {
        let bar = show_progress.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}  {elapsed:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
            );
            bar
        });
        Self { bar, quiet }
    }
}

impl StatusDisplay for TerminalStatus {
    fn set_status(&self, status: &WorkflowStatus) {
        let message = status.message();
        match (status.kind(), &self.bar) {
            // The file is chosen on the command line; there is no form to prompt for.
            (StatusKind::Idle, _) => {}
            (StatusKind::Loading, Some(bar)) => {
                bar.set_message(message);
                bar.enable_steady_tick(Duration::from_millis(80));
            }
            (kind, bar) => {
                if let Some(bar) = bar {
                    bar.finish_and_clear();
                }
                match kind {
                    StatusKind::Error => eprintln!("{} {}", red("✘"), red(&message)),
                    StatusKind::Success if !self.quiet => {
                        eprintln!("{} {}", green("✔"), bold(&message))
                    }
                    _ if !self.quiet => eprintln!("{}", dim(&message)),
                    _ => {}
                }
            }
        }
    }
}

/// Result area on stdout. In JSON mode the caller prints the outcome instead.
struct TerminalResult {
    json: bool,
}

impl ResultDisplay for TerminalResult {
    fn clear(&self) {}

    fn show_fields(&self, result: &StructuredResult) {
        if !self.json {
            println!("{}", render::result_text(result));
        }
    }

    fn show_failure(&self, note: &str) {
        eprintln!("{}", dim(note));
    }
}

struct TerminalFileInfo {
    quiet: bool,
}

impl FileInfoDisplay for TerminalFileInfo {
    fn show_file(&self, file: &SelectedFile) {
        if !self.quiet {
            eprintln!("{} {}", dim("file:"), render::file_info_text(file));
        }
    }
}

/// A terminal has no drop zone and no button; both slots only log.
struct Headless;

impl DropTarget for Headless {}

impl SubmitTrigger for Headless {
    fn set_enabled(&self, enabled: bool) {
        debug!("submit trigger enabled = {}", enabled);
    }
}

struct TerminalAlert;

impl Alerter for TerminalAlert {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", red("✘"), message);
    }
}

// ── CLI ──────────────────────────────────────────────────────────────────────

const AFTER_HELP: &str = r#"EXAMPLES:
  # Submit an invoice scan
  ocr-submit --document-type invoice scan.pdf

  # Restrict the accepted document types
  ocr-submit -t receipt --document-types invoice,receipt photo.jpg

  # JSON output (filename, document type, fields, elapsed seconds)
  ocr-submit -t invoice --json scan.pdf > fields.json

  # Point at a local service
  ocr-submit -t invoice --endpoint http://localhost:8080/ocr scan.pdf

ENVIRONMENT VARIABLES:
  OCR_SUBMIT_ENDPOINT        Service URL
  OCR_SUBMIT_DOCUMENT_TYPE   Document type sent with the file
  OCR_SUBMIT_DOCUMENT_TYPES  Comma-separated list of accepted document types
  RUST_LOG                   Override log filter (e.g. ocr_submit=debug)

NOTE:
  Recognition can take up to 3 minutes. No client-side deadline is applied.
"#;

/// Submit a document image or PDF to an OCR service and print the extracted fields.
#[derive(Parser, Debug)]
#[command(
    name = "ocr-submit",
    version,
    about = "Submit a document image or PDF to an OCR service and print the extracted fields",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Image or PDF file to submit.
    file: PathBuf,

    /// Document type hint sent to the service.
    #[arg(short = 't', long, env = "OCR_SUBMIT_DOCUMENT_TYPE", default_value = "")]
    document_type: String,

    /// Accepted document types (comma-separated). Empty accepts any value.
    #[arg(long, env = "OCR_SUBMIT_DOCUMENT_TYPES", value_delimiter = ',')]
    document_types: Vec<String>,

    /// OCR service endpoint.
    #[arg(long, env = "OCR_SUBMIT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// TCP connect timeout in seconds. The request itself is never timed out.
    #[arg(long, env = "OCR_SUBMIT_CONNECT_TIMEOUT")]
    connect_timeout: Option<u64>,

    /// Print the outcome as JSON on stdout.
    #[arg(long, env = "OCR_SUBMIT_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "OCR_SUBMIT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "OCR_SUBMIT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except results and errors.
    #[arg(short, long, env = "OCR_SUBMIT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner gives all the feedback that matters, so INFO logs are
    // only shown when it is off.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.verbose;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli)?;

    let selector = Arc::new(Selector::new(config.document_types.clone()));
    selector.select(cli.document_type.trim());

    let ui = UiBindings {
        status: Arc::new(TerminalStatus::new(show_progress, cli.quiet)),
        result: Arc::new(TerminalResult { json: cli.json }),
        file_info: Arc::new(TerminalFileInfo { quiet: cli.quiet }),
        drop_target: Arc::new(Headless),
        trigger: Arc::new(Headless),
        document_type: selector,
        alerter: Arc::new(TerminalAlert),
    };

    let mut workflow =
        SubmissionWorkflow::with_reqwest(config, ui).context("Failed to initialise HTTP client")?;

    // ── Capture and submit ───────────────────────────────────────────────
    let file = SelectedFile::from_path(&cli.file)
        .with_context(|| format!("Failed to open {}", cli.file.display()))?;
    workflow.browse(file);

    match workflow.submit().await {
        Ok(outcome) => {
            if cli.json {
                let json = serde_json::to_string_pretty(&outcome)
                    .context("Failed to serialise outcome")?;
                println!("{json}");
            }
            Ok(ExitCode::SUCCESS)
        }
        // Already reported through the status/alert slots.
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

/// Map CLI args to `SubmitConfig`.
fn build_config(cli: &Cli) -> Result<SubmitConfig> {
    let types = cli
        .document_types
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty());

    let mut builder = SubmitConfig::builder()
        .endpoint(cli.endpoint.trim())
        .document_types(types);
    if let Some(secs) = cli.connect_timeout {
        builder = builder.connect_timeout_secs(secs);
    }

    builder.build().context("Invalid configuration")
}
