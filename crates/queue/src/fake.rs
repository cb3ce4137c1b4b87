// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fake queue for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use kbforge_core::{CompileRequest, JobId, QueueFlags};
use parking_lot::Mutex;

use crate::{JobQueue, QueueError, QueueJob};

#[derive(Default)]
struct FakeQueueState {
    jobs: HashMap<String, QueueJob>,
    enqueued: Vec<CompileRequest>,
}

/// Fake queue backend holding live records in memory.
#[derive(Clone, Default)]
pub struct FakeQueue {
    inner: Arc<Mutex<FakeQueueState>>,
}

impl FakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a live record.
    pub fn insert(&self, job: QueueJob) {
        self.inner.lock().jobs.insert(job.id.to_string(), job);
    }

    /// Remove a live record, simulating expiry from the backend.
    pub fn expire(&self, job_id: &str) {
        self.inner.lock().jobs.remove(job_id);
    }

    /// Requests seen by `enqueue`, in order.
    pub fn enqueued(&self) -> Vec<CompileRequest> {
        self.inner.lock().enqueued.clone()
    }
}

#[async_trait]
impl JobQueue for FakeQueue {
    async fn enqueue(&self, request: &CompileRequest) -> Result<JobId, QueueError> {
        let id = JobId::new();
        let now = Some(Utc::now());
        let mut state = self.inner.lock();
        state.enqueued.push(request.clone());
        state.jobs.insert(
            id.to_string(),
            QueueJob {
                id: id.clone(),
                created_at: now,
                enqueued_at: now,
                flags: QueueFlags { queued: true, ..QueueFlags::default() },
                result: None,
            },
        );
        Ok(id)
    }

    async fn fetch(&self, job_id: &str) -> Result<Option<QueueJob>, QueueError> {
        Ok(self.inner.lock().jobs.get(job_id).cloned())
    }
}
