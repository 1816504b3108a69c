mod support;

use support::http_stub::{closed_port_url, serve_once};

use civic_classifier::backend::{ClassifierBackend, HttpBackend};
use civic_classifier::config::ServerSettings;
use civic_classifier::errors::RequestError;
use civic_classifier::training::TrainingForm;
use civic_classifier::upload::{self, UploadRequest};
use std::path::Path;

fn backend(base_url: &str) -> HttpBackend {
    HttpBackend::new(&ServerSettings {
        base_url: base_url.to_string(),
        ..ServerSettings::default()
    })
    .expect("backend")
}

fn upload_request(dir: &Path, name: &str, bytes: &[u8]) -> UploadRequest {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write image");
    let selected = upload::select_file(&path).expect("valid selection");
    UploadRequest::read(&selected).expect("read image")
}

#[test]
fn classify_posts_multipart_file_field() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (base_url, server) = serve_once(
        200,
        "application/json",
        r#"{"success":true,"prediction":"Road_Issues_Pothole","confidence":0.9,"confidence_percent":90.0,"severity":"High","priority":"High"}"#,
    );
    let request = upload_request(temp.path(), "pothole.png", b"\x89PNG-fake-bytes");

    let body = backend(&base_url).classify(&request).expect("classify");
    assert!(body.success);
    assert_eq!(body.prediction.as_deref(), Some("Road_Issues_Pothole"));
    assert_eq!(body.confidence_percent, Some(90.0));

    let captured = server.join().expect("server thread");
    assert_eq!(captured.request_line, "POST /upload HTTP/1.1");
    let content_type = captured.header("Content-Type").expect("content type");
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .expect("multipart content type");
    let text = captured.body_text();
    assert!(text.starts_with(&format!("--{boundary}\r\n")));
    assert!(text.contains("Content-Disposition: form-data; name=\"file\"; filename=\"pothole.png\""));
    assert!(text.contains("Content-Type: image/png\r\n\r\n"));
    assert!(text.contains("PNG-fake-bytes"));
    assert!(text.ends_with(&format!("--{boundary}--\r\n")));
}

#[test]
fn train_posts_json_body() {
    let (base_url, server) = serve_once(
        200,
        "application/json",
        r#"{"success":true,"message":"Training started","note":"Check server logs"}"#,
    );
    let form = TrainingForm {
        dataset_path: "/data/civic".into(),
        epochs: "5".into(),
        batch_size: "16 ".into(),
    };
    let request = form.to_request().expect("valid form");

    let body = backend(&base_url).train(&request).expect("train");
    assert!(body.success);
    assert_eq!(body.message.as_deref(), Some("Training started"));
    assert_eq!(body.note.as_deref(), Some("Check server logs"));

    let captured = server.join().expect("server thread");
    assert_eq!(captured.request_line, "POST /api/train HTTP/1.1");
    assert!(
        captured
            .header("Content-Type")
            .is_some_and(|value| value.starts_with("application/json"))
    );
    let sent: serde_json::Value = serde_json::from_slice(&captured.body).expect("json body");
    assert_eq!(
        sent,
        serde_json::json!({"dataset_path": "/data/civic", "epochs": 5, "batch_size": 16})
    );
}

#[test]
fn error_status_with_json_body_is_a_parsed_answer() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (base_url, server) =
        serve_once(400, "application/json", r#"{"error":"Invalid file type"}"#);
    let request = upload_request(temp.path(), "sign.gif", b"GIF89a");

    let body = backend(&base_url).classify(&request).expect("parsed body");
    assert!(!body.success);
    assert_eq!(body.error.as_deref(), Some("Invalid file type"));
    server.join().expect("server thread");
}

#[test]
fn non_json_body_is_a_network_error() {
    let (base_url, server) = serve_once(500, "text/html", "<h1>Internal Server Error</h1>");
    let form = TrainingForm::with_defaults("/data", 1, 1);

    let err = backend(&base_url)
        .train(&form.to_request().expect("valid form"))
        .expect_err("html body");
    assert!(matches!(err, RequestError::Decode(_)));
    assert!(err.to_string().starts_with("Network error: "));
    server.join().expect("server thread");
}

#[test]
fn refused_connection_is_a_transport_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let request = upload_request(temp.path(), "light.bmp", b"BM");

    let err = backend(&closed_port_url())
        .classify(&request)
        .expect_err("nothing listening");
    assert!(matches!(err, RequestError::Transport(_)));
    assert!(err.to_string().starts_with("Network error: "));
}

#[test]
fn base_url_path_prefix_is_kept() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (base_url, server) = serve_once(200, "application/json", r#"{"success":false}"#);
    let request = upload_request(temp.path(), "trash.jpeg", b"jpeg");

    let body = backend(&format!("{base_url}/civic"))
        .classify(&request)
        .expect("parsed body");
    assert!(!body.success);
    assert_eq!(
        server.join().expect("server thread").request_line,
        "POST /civic/upload HTTP/1.1"
    );
}
