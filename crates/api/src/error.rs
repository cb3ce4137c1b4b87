// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy at the HTTP boundary.
//!
//! Every non-2xx response carries a JSON body of the form
//! `{"message": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use kbforge_core::RequestError;
use kbforge_queue::QueueError;
use kbforge_storage::StorageError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be parsed as a compile request (400).
    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),

    /// Request parsed but failed validation (422).
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    /// Job id unknown to both the queue and durable storage (404).
    #[error("compile job not found")]
    JobNotFound,

    /// Job exists but has not produced the requested artifact (422).
    #[error("compile job not finished or produced no firmware")]
    NotReady,

    /// Metadata claims success but the referenced object is absent (404).
    ///
    /// Distinct from [`ApiError::JobNotFound`] so the inconsistency shows
    /// up in logs, even though clients see the same status code.
    #[error("compile artifact not found")]
    ArtifactMissing { job_id: String, key: String },

    /// Queue or storage client failure (500). Never retried here; retry
    /// policy belongs to the caller.
    #[error("internal server error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<QueueError> for ApiError {
    fn from(e: QueueError) -> Self {
        ApiError::Internal(Box::new(e))
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(Box::new(e))
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequest(_) | ApiError::NotReady => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::JobNotFound | ApiError::ArtifactMissing { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ArtifactMissing { job_id, key } => {
                tracing::error!(%job_id, %key, "metadata references a missing artifact object");
            }
            ApiError::Internal(source) => {
                tracing::error!(error = %source, "backend failure while serving request");
            }
            _ => {}
        }
        let body = Json(json!({ "message": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
