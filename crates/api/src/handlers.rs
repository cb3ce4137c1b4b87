// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the compile gateway.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Redirect, Response};
use kbforge_core::{ArtifactKind, CompileRequest, JobView};
use serde_json::{json, Value};

use crate::{artifacts, resolver, ApiError, AppState};

/// `GET /` — send clients to the API documentation.
pub async fn root(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.docs_url)
}

/// `GET /v1` — service liveness and version.
pub async fn service_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "running",
        "version": state.version,
    }))
}

/// `POST /v1/compile` — validate and enqueue a compile job.
///
/// Fire-and-forget: responds as soon as the queue has accepted the task.
pub async fn submit_compile(
    State(state): State<AppState>,
    payload: Result<Json<CompileRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidJson(e.body_text()))?;
    request.validate()?;

    let job_id = state.queue.enqueue(&request).await?;
    Ok(Json(json!({
        "enqueued": true,
        "job_id": job_id,
    })))
}

/// `GET /v1/compile/{job_id}` — unified job status.
pub async fn job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobView>, ApiError> {
    let view = resolver::resolve_job(state.queue.as_ref(), state.store.as_ref(), &job_id).await?;
    Ok(Json(view))
}

/// `GET /v1/compile/{job_id}/hex` — download the firmware binary.
pub async fn download_firmware(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError> {
    download(&state, &job_id, ArtifactKind::Firmware).await
}

/// `GET /v1/compile/{job_id}/source` — download the source archive.
pub async fn download_source(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError> {
    download(&state, &job_id, ArtifactKind::Source).await
}

async fn download(state: &AppState, job_id: &str, kind: ArtifactKind) -> Result<Response, ApiError> {
    let (bytes, filename) =
        artifacts::fetch_artifact(state.queue.as_ref(), state.store.as_ref(), job_id, kind).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ];
    Ok((headers, bytes).into_response())
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
