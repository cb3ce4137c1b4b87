// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kbforge-queue: client interface to the compile-job queue backend.
//!
//! The gateway only ever enqueues new jobs and fetches live records by id.
//! Everything else about a job's lifecycle is owned by the out-of-process
//! worker, and live records expire from the backend on its own retention
//! policy.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kbforge_core::{CompileRequest, JobId, JobView, QueueFlags, ResultRecord};
use thiserror::Error;

mod client;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use client::RedisQueue;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeQueue;

/// Errors from queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue backend request failed: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("queue record for {job_id} is corrupt: {source}")]
    CorruptRecord {
        job_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode task payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Live job record fetched from the queue backend.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueJob {
    pub id: JobId,
    pub created_at: Option<DateTime<Utc>>,
    pub enqueued_at: Option<DateTime<Utc>>,
    pub flags: QueueFlags,
    pub result: Option<ResultRecord>,
}

impl QueueJob {
    /// Build the unified status/result view for this live record.
    ///
    /// Flag precedence is applied here; the caller is responsible for
    /// logging when the collapsed status comes back `unknown`.
    pub fn to_view(&self) -> JobView {
        JobView {
            created_at: self.created_at,
            enqueued_at: self.enqueued_at,
            id: self.id.clone(),
            is_failed: self.flags.failed,
            status: self.flags.canonical_status(),
            result: self.result.clone(),
        }
    }

    /// A live record with the given flags and fixed timestamps.
    #[cfg(any(test, feature = "test-support"))]
    pub fn with_flags(id: &str, flags: QueueFlags) -> Self {
        use chrono::TimeZone;
        Self {
            id: id.into(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).single(),
            enqueued_at: Utc.timestamp_opt(1_700_000_001, 0).single(),
            flags,
            result: None,
        }
    }
}

/// Client interface to the queue backend.
#[async_trait]
pub trait JobQueue: Send + Sync + 'static {
    /// Enqueue a compile task and return the queue-assigned job id.
    ///
    /// Fire-and-forget: this never waits for compilation.
    async fn enqueue(&self, request: &CompileRequest) -> Result<JobId, QueueError>;

    /// Fetch the live record for a job, if the backend still has one.
    async fn fetch(&self, job_id: &str) -> Result<Option<QueueJob>, QueueError>;
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
