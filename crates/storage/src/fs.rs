// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-backed artifact store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{object_key, valid_key_component, ArtifactStore, StorageError};

/// Artifact store rooted at a base directory.
///
/// Keys resolve to `{base}/{job_id}/{name}`, mirroring the object-store
/// key layout.
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    base: PathBuf,
}

impl FilesystemStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn path_for(&self, job_id: &str, name: &str) -> PathBuf {
        self.base.join(job_id).join(name)
    }
}

#[async_trait]
impl ArtifactStore for FilesystemStore {
    async fn exists(&self, job_id: &str, name: &str) -> Result<bool, StorageError> {
        if !valid_key_component(job_id) || !valid_key_component(name) {
            return Ok(false);
        }
        Ok(tokio::fs::try_exists(self.path_for(job_id, name)).await?)
    }

    async fn read(&self, job_id: &str, name: &str) -> Result<Bytes, StorageError> {
        // Keys that are not single normal components would resolve outside
        // the store root; treat them as absent.
        if !valid_key_component(job_id) || !valid_key_component(name) {
            return Err(StorageError::NotFound { key: object_key(job_id, name) });
        }
        match tokio::fs::read(self.path_for(job_id, name)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound { key: object_key(job_id, name) })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
