//! Integration tests for the submission workflow.
//!
//! The recognition service is replaced by a `wiremock` server, so these run
//! offline. Files on disk come from `tempfile`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ocr_submit::pipeline::render::{FAILURE_NOTE, NO_FIELDS_PLACEHOLDER};
use ocr_submit::ui::HeadlessUi;
use ocr_submit::{
    EncodedPayload, PreconditionError, SelectedFile, StatusKind, SubmissionWorkflow,
    SubmitConfig, SubmitError,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────────

const TYPES: [&str; 3] = ["invoice", "receipt", "id_card"];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ocr_submit=debug")
        .with_test_writer()
        .try_init();
}

async fn workflow_for(server: &MockServer) -> (SubmissionWorkflow, HeadlessUi) {
    init_tracing();
    let config = SubmitConfig::builder()
        .endpoint(format!("{}/ocr", server.uri()))
        .document_types(TYPES)
        .build()
        .expect("valid config");
    let ui = HeadlessUi::new(TYPES);
    let wf = SubmissionWorkflow::with_reqwest(config, ui.bindings()).expect("client builds");
    (wf, ui)
}

fn png_file() -> SelectedFile {
    SelectedFile::from_bytes("scan.png", b"\x89PNG\r\n\x1a\nfake".to_vec())
}

/// Mount a single `/ocr` mock answering with `template`.
async fn mount(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .respond_with(template)
        .mount(server)
        .await;
}

// ── Preconditions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_document_type_never_calls_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(png_file());

    let err = wf.submit().await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Precondition(PreconditionError::NoDocumentType)
    ));
    assert_eq!(ui.alerts.alerts(), vec![PreconditionError::NoDocumentType.to_string()]);
    assert!(ui.trigger.is_enabled());
    server.verify().await;
}

#[tokio::test]
async fn missing_file_never_calls_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (mut wf, ui) = workflow_for(&server).await;
    ui.selector.select("invoice");

    let err = wf.submit().await.unwrap_err();

    assert!(err.is_precondition());
    assert_eq!(ui.alerts.alerts(), vec![PreconditionError::NoFile.to_string()]);
    server.verify().await;
}

// ── Success path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_payload_as_json_and_renders_escaped_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "structured_data": {"fields": {"Name": "Jane <b>Doe</b>", "Total": "12.50"}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(png_file());
    ui.selector.select("invoice");

    let outcome = wf.submit().await.expect("submission succeeds");

    let html = ui.result.html();
    assert!(html.contains("Jane &lt;b&gt;Doe&lt;/b&gt;"), "got: {html}");
    assert!(!html.contains("<b>"), "got: {html}");
    assert_eq!(outcome.fields.get("Total"), Some("12.50"));
    assert_eq!(ui.status.kind(), Some(StatusKind::Success));
    assert!(ui.status.html().starts_with("Processed! ("));
    assert!(ui.status.html().ends_with("s)"));

    let requests = server.received_requests().await.expect("recording on");
    assert_eq!(requests.len(), 1);
    let sent: EncodedPayload = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent.filename, "scan.png");
    assert_eq!(sent.document_type, "invoice");
    assert_eq!(
        STANDARD.decode(&sent.image_base64).unwrap(),
        b"\x89PNG\r\n\x1a\nfake"
    );
    server.verify().await;
}

#[tokio::test]
async fn missing_structured_data_shows_placeholder() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"extracted_text": "hello"})),
    )
    .await;
    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(png_file());
    ui.selector.select("receipt");

    let outcome = wf.submit().await.unwrap();

    assert!(outcome.fields.is_empty());
    assert!(ui.result.html().contains(NO_FIELDS_PLACEHOLDER));
}

#[tokio::test]
async fn empty_fields_show_same_placeholder() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"structured_data": {"fields": {}}})),
    )
    .await;
    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(png_file());
    ui.selector.select("receipt");

    wf.submit().await.unwrap();

    assert!(ui.result.html().contains(NO_FIELDS_PLACEHOLDER));
}

#[tokio::test]
async fn file_on_disk_is_read_and_sent() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"structured_data": {"fields": {"A": "1"}}})),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("doc.pdf");
    std::fs::write(&file_path, b"%PDF-1.7 test").unwrap();

    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(SelectedFile::from_path(&file_path).unwrap());
    ui.selector.select("id_card");
    assert!(ui.file_info.html().contains("doc.pdf"));

    wf.submit().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: EncodedPayload = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent.filename, "doc.pdf");
    assert_eq!(STANDARD.decode(sent.image_base64).unwrap(), b"%PDF-1.7 test");
}

// ── Failure paths ────────────────────────────────────────────────────────────

#[tokio::test]
async fn error_detail_is_shown_in_status() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(500).set_body_json(json!({"detail": "bad image"})),
    )
    .await;
    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(png_file());
    ui.selector.select("invoice");

    let err = wf.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Submission { status: Some(500), .. }));
    assert_eq!(ui.status.html(), "Error: bad image");
    assert_eq!(ui.status.kind(), Some(StatusKind::Error));
    assert_eq!(ui.result.html(), FAILURE_NOTE);
    assert!(ui.trigger.is_enabled());
}

#[tokio::test]
async fn unparseable_error_body_shows_status_line() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500).set_body_string("upstream crashed")).await;
    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(png_file());
    ui.selector.select("invoice");

    wf.submit().await.unwrap_err();

    let status = ui.status.html();
    assert!(status.contains("500"), "got: {status}");
    assert!(status.contains("Internal Server Error"), "got: {status}");
}

#[tokio::test]
async fn zero_byte_file_fails_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(SelectedFile::from_bytes("empty.png", Vec::new()));
    ui.selector.select("invoice");

    let err = wf.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Encoding(_)));
    assert!(ui.status.html().starts_with("Error: "));
    assert!(ui.trigger.is_enabled());
    server.verify().await;
}

#[tokio::test]
async fn unreadable_file_is_read_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("vanishing.jpg");
    std::fs::write(&file_path, b"jpeg").unwrap();

    let (mut wf, ui) = workflow_for(&server).await;
    wf.browse(SelectedFile::from_path(&file_path).unwrap());
    std::fs::remove_file(&file_path).unwrap();
    ui.selector.select("invoice");

    let err = wf.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Read { .. }), "got: {err:?}");
    assert_eq!(ui.result.html(), FAILURE_NOTE);
    assert!(ui.trigger.is_enabled());
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    init_tracing();
    let config = SubmitConfig::builder()
        .endpoint("http://127.0.0.1:9/ocr")
        .build()
        .unwrap();
    let ui = HeadlessUi::new(TYPES);
    let mut wf = SubmissionWorkflow::with_reqwest(config, ui.bindings()).unwrap();
    wf.browse(png_file());
    ui.selector.select("invoice");

    let err = wf.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Network(_)), "got: {err:?}");
    assert_eq!(ui.trigger.history(), vec![false, true]);
}

// ── Reuse ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn workflow_is_reusable_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"structured_data": {"fields": {"K": "V"}}})),
    )
    .await;
    let (mut wf, ui) = workflow_for(&server).await;
    wf.drop_files(vec![png_file(), SelectedFile::from_bytes("second.png", b"2".to_vec())]);
    ui.selector.select("invoice");

    assert!(wf.submit().await.is_err());
    assert!(ui.status.html().contains("503"));

    let outcome = wf.submit().await.expect("second attempt succeeds");
    assert_eq!(outcome.filename, "scan.png");
    assert_eq!(outcome.fields.get("K"), Some("V"));
    assert_eq!(ui.trigger.history(), vec![false, true, false, true]);
}
