// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gateway process entry point.

use std::sync::Arc;

use anyhow::Context;
use kbforge_api::env::{Config, StorageEngine, VERSION};
use kbforge_api::AppState;
use kbforge_queue::RedisQueue;
use kbforge_storage::{ArtifactStore, FilesystemStore, ObjectStoreBackend};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let engine_name = match &config.engine {
        StorageEngine::ObjectStore { .. } => "minio",
        StorageEngine::Filesystem { .. } => "filesystem",
    };
    tracing::info!(version = VERSION, engine = engine_name, "starting compile gateway");

    let store: Arc<dyn ArtifactStore> = match &config.engine {
        StorageEngine::ObjectStore { bucket, endpoint, access_key_id, secret_access_key } => {
            Arc::new(
                ObjectStoreBackend::s3(
                    bucket,
                    endpoint.as_deref(),
                    access_key_id.as_deref(),
                    secret_access_key.as_deref(),
                )
                .context("building object-store client")?,
            )
        }
        StorageEngine::Filesystem { base_path } => Arc::new(FilesystemStore::new(base_path.clone())),
    };

    let queue = Arc::new(
        RedisQueue::connect(&config.redis_url)
            .await
            .context("connecting to queue backend")?,
    );

    let state = AppState { queue, store, version: VERSION, docs_url: config.docs_url.clone() };
    kbforge_api::serve(config.bind, state).await.context("running server")?;
    Ok(())
}
