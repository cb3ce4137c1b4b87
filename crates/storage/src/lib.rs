// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kbforge-storage: uniform artifact storage over two backends.
//!
//! The worker persists a job's durable metadata record and artifact files
//! under a per-job prefix. Exactly one backend is active per deployment
//! (object store or local filesystem); both agree on the key mapping so
//! metadata records are backend-agnostic.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

mod fs;
mod object;

pub use fs::FilesystemStore;
pub use object::ObjectStoreBackend;

/// Errors from artifact storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("object store request failed: {0}")]
    Object(#[from] object_store::Error),

    #[error("stored JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage key shared by both backends: `{job_id}/{name}`.
///
/// The filesystem backend resolves the same key relative to its base path.
pub fn object_key(job_id: &str, name: &str) -> String {
    format!("{job_id}/{name}")
}

/// Filename of the durable metadata record the worker writes for a job.
pub fn metadata_name(job_id: &str) -> String {
    format!("{job_id}.json")
}

/// Check that a key part is a single normal path component.
///
/// Job ids and artifact names are spliced into object keys and filesystem
/// paths; a part containing a separator or a `.`/`..` component would
/// escape its job prefix, so it can never name a stored object.
pub fn valid_key_component(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\'])
}

/// Uniform get/exists operations over the per-job artifact namespace.
#[async_trait]
pub trait ArtifactStore: Send + Sync + 'static {
    /// Check whether an object exists. Absence is `false`, never an error.
    async fn exists(&self, job_id: &str, name: &str) -> Result<bool, StorageError>;

    /// Read an object's bytes. Absence is [`StorageError::NotFound`].
    async fn read(&self, job_id: &str, name: &str) -> Result<Bytes, StorageError>;

    /// Read and decode a JSON object, treating absence as `None`.
    ///
    /// Metadata lookups miss routinely (job still running, or never
    /// existed), so a miss is part of the contract rather than an error.
    /// Provided on the trait so decode behavior is identical across
    /// backends.
    async fn read_json(
        &self,
        job_id: &str,
        name: &str,
    ) -> Result<Option<serde_json::Value>, StorageError> {
        match self.read(job_id, name).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
