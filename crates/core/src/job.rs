// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identity, canonical status, and the unified status/result view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier for a compile job.
///
/// Assigned by the queue client at enqueue time; everything downstream
/// treats it as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Mint a fresh random id (UUID v4, the queue's id scheme).
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for JobId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JobId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Canonical lifecycle status of a job.
///
/// `Unknown` marks a queue record whose status flags matched nothing we
/// recognize — a backend contract violation, not a user-visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Finished,
    Failed,
    Unknown,
}

crate::simple_display! {
    JobStatus {
        Queued => "queued",
        Running => "running",
        Finished => "finished",
        Failed => "failed",
        Unknown => "unknown",
    }
}

impl JobStatus {
    /// Check if this status is terminal (the worker will not advance it).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::Failed)
    }
}

/// Raw status flags reported by the queue backend for a live job.
///
/// The backend exposes these as independent booleans;
/// [`QueueFlags::canonical_status`] collapses them into one [`JobStatus`]
/// using a fixed precedence order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFlags {
    pub finished: bool,
    pub queued: bool,
    pub started: bool,
    pub failed: bool,
}

/// Precedence for collapsing queue flags into a canonical status.
/// Earlier entries win when multiple flags are set.
const STATUS_PRECEDENCE: [(fn(QueueFlags) -> bool, JobStatus); 4] = [
    (|f| f.finished, JobStatus::Finished),
    (|f| f.queued, JobStatus::Queued),
    (|f| f.started, JobStatus::Running),
    (|f| f.failed, JobStatus::Failed),
];

impl QueueFlags {
    /// Collapse the flags into a canonical status.
    ///
    /// Returns [`JobStatus::Unknown`] when no known flag is set; callers
    /// should log that as a diagnostic since it means the queue backend
    /// broke its contract.
    pub fn canonical_status(self) -> JobStatus {
        STATUS_PRECEDENCE
            .iter()
            .find(|(is_set, _)| is_set(self))
            .map(|&(_, status)| status)
            .unwrap_or(JobStatus::Unknown)
    }
}

/// Worker-produced result payload for a terminal job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Whether a firmware binary was produced.
    pub firmware: bool,
    /// Artifact name of the firmware binary (set when `firmware` is true).
    #[serde(default)]
    pub firmware_filename: String,
    /// Artifact name of the source archive (set when `firmware` is true).
    #[serde(default)]
    pub source_archive: String,
}

/// Unified status/result view of a job.
///
/// The same shape is returned whether the job was described by the live
/// queue or by the durable metadata record the worker wrote on completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobView {
    pub created_at: Option<DateTime<Utc>>,
    pub enqueued_at: Option<DateTime<Utc>>,
    pub id: JobId,
    pub is_failed: bool,
    pub status: JobStatus,
    pub result: Option<ResultRecord>,
}

/// Which artifact of a finished job to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Firmware,
    Source,
}

crate::simple_display! {
    ArtifactKind {
        Firmware => "firmware",
        Source => "source",
    }
}

impl ArtifactKind {
    /// Select the stored filename for this artifact from a result record.
    ///
    /// Both kinds resolve from the result record itself; the storage
    /// backend never influences which filename is used.
    pub fn filename(self, result: &ResultRecord) -> &str {
        match self {
            ArtifactKind::Firmware => &result.firmware_filename,
            ArtifactKind::Source => &result.source_archive,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
