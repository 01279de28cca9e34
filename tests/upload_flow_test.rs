// End-to-end upload flow against a local mock metrics service

use std::io::Write;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use neurochaos_viewer::error::MISSING_DATA_MESSAGE;
use neurochaos_viewer::views::ScreenBody;
use neurochaos_viewer::{AppConfig, AppContext, RecordingFile, Route, UploadError};
use serde_json::{json, Value};

fn metrics_body(filename: &str) -> Value {
    json!({
        "message": "File uploaded successfully",
        "filename": filename,
        "shape": [3, 1000],
        "sampling_rate": 250.0,
        "channel_names": ["C3", "C4", "Cz"],
        "metrics": [
            {"mean_amplitude": 1.0, "mu_psd": 2.0, "erd_amplitude": 3.0, "event_latency": 0.1},
            {"mean_amplitude": 4.0, "mu_psd": 5.0, "erd_amplitude": 6.0, "event_latency": 0.2},
            {"mean_amplitude": 7.0, "mu_psd": 8.0, "erd_amplitude": 9.0, "event_latency": 0.3}
        ]
    })
}

async fn upload(mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap_or_default();
        if name.ends_with(".edf") && !bytes.is_empty() {
            return Json(metrics_body(&name)).into_response();
        }
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "bad file"})),
        )
            .into_response();
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "No file part"})),
    )
        .into_response()
}

async fn partial_upload(_multipart: Multipart) -> Response {
    let mut body = metrics_body("a.edf");
    body.as_object_mut().unwrap().remove("channel_names");
    Json(body).into_response()
}

async fn short_record_upload(_multipart: Multipart) -> Response {
    Json(json!({
        "filename": "a.edf",
        "shape": [1, 1000],
        "channel_names": ["C3"],
        "metrics": [{"mean_amplitude": 1, "mu_psd": 2, "erd_amplitude": 3}]
    }))
    .into_response()
}

/// Start the mock service and return its base URL
async fn spawn_metrics_service() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock service");
    let addr = listener.local_addr().unwrap();
    let router = Router::new()
        .route("/upload", post(upload))
        .route("/partial", post(partial_upload))
        .route("/short-record", post(short_record_upload));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn context_for(endpoint: String) -> AppContext {
    let mut config = AppConfig::default();
    config.upload.endpoint = endpoint;
    config.upload.timeout_secs = 10;
    AppContext::new(config).expect("http client")
}

fn recording(name: &str, contents: &[u8]) -> (tempfile::TempDir, RecordingFile) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    (dir, RecordingFile::from_path(path))
}

#[tokio::test]
async fn test_valid_recording_lands_on_chart_grid() {
    let base = spawn_metrics_service().await;
    let ctx = context_for(format!("{base}/upload"));
    let (_dir, file) = recording("S001R04.edf", b"0       EDF header");

    ctx.open(Route::Upload);
    ctx.select_file(file);
    let state = ctx.submit().await.expect("upload succeeds");

    assert_eq!(state.response().filename.as_deref(), Some("S001R04.edf"));
    assert_eq!(ctx.shell().current_route(), Route::Visualize);

    let screen = ctx.screen();
    assert_eq!(screen.heading, "EEG Data Visualization: S001R04.edf");
    let charts = screen.charts();
    assert_eq!(charts.len(), 4);
    for chart in charts {
        assert_eq!(chart.series.x, vec!["C3", "C4", "Cz"]);
    }
    assert_eq!(charts[3].series.y, vec![0.1, 0.2, 0.3]);
    match screen.body {
        ScreenBody::ChartGrid { summary, .. } => {
            assert_eq!(summary.shape, vec![3, 1000]);
            assert_eq!(summary.sampling_rate, Some(250.0));
        }
        other => panic!("expected chart grid, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_message_is_shown() {
    let base = spawn_metrics_service().await;
    let ctx = context_for(format!("{base}/upload"));
    let (_dir, file) = recording("notes.txt", b"not eeg");

    ctx.open(Route::Upload);
    ctx.select_file(file);
    let err = ctx.submit().await.unwrap_err();

    assert_eq!(
        err,
        UploadError::ServerRejected {
            status: 500,
            error: Some("bad file".to_string()),
        }
    );
    assert_eq!(ctx.shell().current_route(), Route::Upload);
    assert_eq!(ctx.screen().error_text(), Some("bad file"));
    assert_eq!(ctx.shell().history(), vec![Route::Landing, Route::Upload]);
}

#[tokio::test]
async fn test_incomplete_response_reaches_error_view() {
    let base = spawn_metrics_service().await;
    let ctx = context_for(format!("{base}/partial"));
    let (_dir, file) = recording("a.edf", b"edf");

    ctx.open(Route::Upload);
    ctx.select_file(file);
    ctx.submit().await.expect("well-formed body navigates");

    let screen = ctx.screen();
    assert_eq!(screen.route, Route::Visualize);
    assert_eq!(screen.error_text(), Some(MISSING_DATA_MESSAGE));
    assert!(screen.charts().is_empty());
}

#[tokio::test]
async fn test_record_missing_metric_reaches_error_view() {
    let base = spawn_metrics_service().await;
    let ctx = context_for(format!("{base}/short-record"));
    let (_dir, file) = recording("a.edf", b"edf");

    ctx.open(Route::Upload);
    ctx.select_file(file);
    ctx.submit().await.expect("json body navigates");

    let screen = ctx.screen();
    assert_eq!(screen.route, Route::Visualize);
    assert_eq!(screen.error_text(), Some(MISSING_DATA_MESSAGE));
}

#[tokio::test]
async fn test_unreachable_service_reports_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let ctx = context_for(format!("http://{addr}/upload"));
    let (_dir, file) = recording("a.edf", b"edf");
    ctx.open(Route::Upload);
    ctx.select_file(file);

    let err = ctx.submit().await.unwrap_err();
    assert!(matches!(err, UploadError::TransportFailure { .. }), "{err:?}");
    let text = ctx.screen().error_text().map(str::to_string).unwrap();
    assert!(text.starts_with("Upload failed: "), "{text}");
    assert_eq!(ctx.shell().current_route(), Route::Upload);
}

#[tokio::test]
async fn test_missing_file_on_disk_never_reaches_service() {
    let base = spawn_metrics_service().await;
    let ctx = context_for(format!("{base}/upload"));
    ctx.open(Route::Upload);
    ctx.select_file(RecordingFile::from_path("/nonexistent/recording.edf"));

    let err = ctx.submit().await.unwrap_err();
    assert!(matches!(err, UploadError::FileUnreadable { .. }), "{err:?}");
    assert_eq!(ctx.shell().current_route(), Route::Upload);
}
