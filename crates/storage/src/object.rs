// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Object-store-backed artifact store (S3-compatible in production).

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;

use crate::{object_key, valid_key_component, ArtifactStore, StorageError};

/// Artifact store backed by any [`ObjectStore`] implementation.
///
/// Production deployments point this at an S3-compatible bucket (MinIO);
/// tests use `object_store::memory::InMemory`.
#[derive(Clone)]
pub struct ObjectStoreBackend {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectStoreBackend {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self { inner }
    }

    /// Build against an S3-compatible bucket.
    ///
    /// Credentials and region fall back to the standard `AWS_*` environment
    /// variables. A custom endpoint (MinIO) implies plain-HTTP support.
    pub fn s3(
        bucket: &str,
        endpoint: Option<&str>,
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
    ) -> Result<Self, StorageError> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        if let Some(endpoint) = endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }
        if let Some(key) = access_key_id {
            builder = builder.with_access_key_id(key);
        }
        if let Some(secret) = secret_access_key {
            builder = builder.with_secret_access_key(secret);
        }
        Ok(Self::new(Arc::new(builder.build()?)))
    }

    fn location(job_id: &str, name: &str) -> ObjectPath {
        ObjectPath::from(object_key(job_id, name))
    }
}

#[async_trait]
impl ArtifactStore for ObjectStoreBackend {
    async fn exists(&self, job_id: &str, name: &str) -> Result<bool, StorageError> {
        if !valid_key_component(job_id) || !valid_key_component(name) {
            return Ok(false);
        }
        match self.inner.head(&Self::location(job_id, name)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn read(&self, job_id: &str, name: &str) -> Result<Bytes, StorageError> {
        if !valid_key_component(job_id) || !valid_key_component(name) {
            return Err(StorageError::NotFound { key: object_key(job_id, name) });
        }
        match self.inner.get(&Self::location(job_id, name)).await {
            Ok(result) => Ok(result.bytes().await?),
            Err(object_store::Error::NotFound { .. }) => {
                Err(StorageError::NotFound { key: object_key(job_id, name) })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
