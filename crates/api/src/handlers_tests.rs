// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use kbforge_core::QueueFlags;
use kbforge_queue::{FakeQueue, QueueJob};
use kbforge_storage::FilesystemStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{build_router, AppState};

struct TestApp {
    _dir: tempfile::TempDir,
    queue: FakeQueue,
    router: axum::Router,
}

fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let queue = FakeQueue::new();
    let state = AppState {
        queue: Arc::new(queue.clone()),
        store: Arc::new(FilesystemStore::new(dir.path())),
        version: "0.0.0-test",
        docs_url: "https://docs.example.test/".to_string(),
    };
    TestApp { _dir: dir, queue, router: build_router(state) }
}

fn write_artifact(app: &TestApp, job_id: &str, name: &str, data: &[u8]) {
    let job_dir = app._dir.path().join(job_id);
    std::fs::create_dir_all(&job_dir).unwrap();
    std::fs::write(job_dir.join(name), data).unwrap();
}

async fn get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn post_json(app: &TestApp, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn service_status_reports_running_and_version() {
    let app = test_app();
    let (status, body) = get(&app, "/v1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "running", "version": "0.0.0-test"}));
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let app = test_app();
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "https://docs.example.test/");
}

#[tokio::test]
async fn submit_enqueues_and_returns_job_id() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/v1/compile",
        r#"{"keyboard":"planck/rev6","keymap":"default","layout":"LAYOUT","layers":[]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enqueued"], true);
    let job_id = body["job_id"].as_str().unwrap().to_string();
    assert_eq!(app.queue.enqueued().len(), 1);

    // Enqueue-then-status: the id resolves immediately, never a 404.
    let (status, body) = get(&app, &format!("/v1/compile/{job_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "queued");
    assert_eq!(body["result"], Value::Null);
}

#[tokio::test]
async fn submit_rejects_malformed_json() {
    let app = test_app();
    let (status, body) = post_json(&app, "/v1/compile", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("invalid JSON payload"));
    assert!(app.queue.enqueued().is_empty());
}

#[tokio::test]
async fn submit_rejects_dot_in_keyboard() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/v1/compile",
        r#"{"keyboard":"planck.rev6","keymap":"default","layout":"LAYOUT","layers":[]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "invalid keyboard: must not contain '.'");
    assert!(app.queue.enqueued().is_empty());
}

#[tokio::test]
async fn submit_rejects_slash_in_keymap() {
    let app = test_app();
    let (status, _) = post_json(
        &app,
        "/v1/compile",
        r#"{"keyboard":"ab","keymap":"x/y","layout":"LAYOUT","layers":[]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn status_of_unknown_job_is_404_with_message() {
    let app = test_app();
    let (status, body) = get(&app, "/v1/compile/no-such-job").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "compile job not found");
}

#[tokio::test]
async fn encoded_dotdot_job_id_cannot_read_outside_the_store() {
    // Metadata planted above the store root, naming a file next to it.
    // `GET /v1/compile/%2e%2e` decodes to a ".." id; it must 404 rather
    // than resolve `base/../...json` and serve `base/../secret.txt`.
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("store");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(
        dir.path().join("...json"),
        br#"{"created_at": null, "enqueued_at": null, "id": "leak",
             "is_failed": false, "status": "finished",
             "result": {"firmware": true, "firmware_filename": "secret.txt"}}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("secret.txt"), b"out of reach").unwrap();

    let queue = FakeQueue::new();
    let state = AppState {
        queue: Arc::new(queue.clone()),
        store: Arc::new(FilesystemStore::new(root)),
        version: "0.0.0-test",
        docs_url: "https://docs.example.test/".to_string(),
    };
    let app = TestApp { _dir: dir, queue, router: build_router(state) };

    let (status, body) = get(&app, "/v1/compile/%2e%2e").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "compile job not found");

    let (status, _) = get(&app, "/v1/compile/%2e%2e/hex").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_reports_running_for_started_flag() {
    let app = test_app();
    app.queue
        .insert(QueueJob::with_flags("job-1", QueueFlags { started: true, ..QueueFlags::default() }));
    let (status, body) = get(&app, "/v1/compile/job-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["is_failed"], false);
}

#[tokio::test]
async fn firmware_download_streams_attachment() {
    let app = test_app();
    write_artifact(
        &app,
        "job-1",
        "job-1.json",
        br#"{"created_at": null, "enqueued_at": null, "id": "job-1",
             "is_failed": false, "status": "finished",
             "result": {"firmware": true, "firmware_filename": "default.hex",
                        "source_archive": "src.zip"}}"#,
    );
    write_artifact(&app, "job-1", "default.hex", b":100000FACE");

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/v1/compile/job-1/hex").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/octet-stream");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"default.hex\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b":100000FACE");
}

#[tokio::test]
async fn download_of_unfinished_job_is_422() {
    let app = test_app();
    app.queue
        .insert(QueueJob::with_flags("job-1", QueueFlags { started: true, ..QueueFlags::default() }));
    let (status, body) = get(&app, "/v1/compile/job-1/hex").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "compile job not finished or produced no firmware");
}

#[tokio::test]
async fn download_of_unknown_job_is_404() {
    let app = test_app();
    let (status, _) = get(&app, "/v1/compile/ghost/source").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
