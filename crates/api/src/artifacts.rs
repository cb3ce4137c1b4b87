// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact retrieval for finished jobs.

use bytes::Bytes;
use kbforge_core::ArtifactKind;
use kbforge_queue::JobQueue;
use kbforge_storage::{object_key, ArtifactStore, StorageError};

use crate::{resolver, ApiError};

/// Locate and read a named artifact of a finished job.
///
/// Returns the artifact bytes together with the filename to present to
/// the client. Read-only and idempotent; safe to retry.
pub async fn fetch_artifact(
    queue: &dyn JobQueue,
    store: &dyn ArtifactStore,
    job_id: &str,
    kind: ArtifactKind,
) -> Result<(Bytes, String), ApiError> {
    let view = resolver::resolve_job(queue, store, job_id).await?;

    // The job must have successfully produced firmware; anything else
    // (still running, failed, finished without output) is re-pollable.
    let result = view.result.filter(|r| r.firmware).ok_or(ApiError::NotReady)?;

    let filename = kind.filename(&result).to_string();
    if filename.is_empty() {
        // Metadata claims success but names no artifact: a data-integrity
        // inconsistency, not a client mistake.
        return Err(ApiError::ArtifactMissing {
            job_id: job_id.to_string(),
            key: object_key(job_id, &filename),
        });
    }

    match store.read(job_id, &filename).await {
        Ok(bytes) => Ok((bytes, filename)),
        Err(StorageError::NotFound { key }) => {
            Err(ApiError::ArtifactMissing { job_id: job_id.to_string(), key })
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
