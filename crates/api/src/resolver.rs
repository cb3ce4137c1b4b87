// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job metadata resolution.
//!
//! A job is described by at most one authoritative source at a time: the
//! live queue record when one exists, otherwise the durable metadata
//! record the worker wrote at completion. The queue always wins during
//! the handoff window where both exist, because it is the more recent
//! writer.

use kbforge_core::{JobStatus, JobView};
use kbforge_queue::JobQueue;
use kbforge_storage::{metadata_name, valid_key_component, ArtifactStore};

use crate::ApiError;

/// Resolve the best-known view of a job.
///
/// Returns [`ApiError::JobNotFound`] when neither the queue nor durable
/// storage knows the id.
pub async fn resolve_job(
    queue: &dyn JobQueue,
    store: &dyn ArtifactStore,
    job_id: &str,
) -> Result<JobView, ApiError> {
    // The id becomes a storage path component; anything that is not a
    // single normal component cannot name a real job.
    if !valid_key_component(job_id) {
        return Err(ApiError::JobNotFound);
    }

    if let Some(live) = queue.fetch(job_id).await? {
        let view = live.to_view();
        if view.status == JobStatus::Unknown {
            // Contract violation in the queue backend, not a user error.
            tracing::error!(%job_id, "queue record has no recognized status flag");
        }
        return Ok(view);
    }

    // The queue no longer has it: either it expired, or the job finished
    // long enough ago that only the durable record remains.
    match store.read_json(job_id, &metadata_name(job_id)).await? {
        Some(value) => serde_json::from_value(value).map_err(|e| {
            tracing::error!(%job_id, error = %e, "durable metadata record is malformed");
            ApiError::Internal(Box::new(e))
        }),
        None => Err(ApiError::JobNotFound),
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
