// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the gateway.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Service version reported by the status endpoint (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND: &str = "127.0.0.1:5001";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_FS_PATH: &str = "/srv/kbforge/artifacts";
const DEFAULT_DOCS_URL: &str = "https://docs.compile.kbforge.dev/";

/// Configuration errors at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("KBFORGE_STORAGE_ENGINE must be 'minio' or 'filesystem', got '{0}'")]
    UnknownEngine(String),

    #[error("{0} is required for the selected storage engine")]
    MissingVar(&'static str),

    #[error("KBFORGE_BIND is not a valid socket address: {0}")]
    InvalidBind(String),
}

/// Which storage backend persists job metadata and artifacts.
///
/// Selected once at startup; the two backends are never mixed or failed
/// over between at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEngine {
    ObjectStore {
        bucket: String,
        endpoint: Option<String>,
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
    },
    Filesystem {
        base_path: PathBuf,
    },
}

/// Runtime configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub redis_url: String,
    pub docs_url: String,
    pub engine: StorageEngine,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_raw = var("KBFORGE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr =
            bind_raw.parse().map_err(|_| ConfigError::InvalidBind(bind_raw.clone()))?;

        let redis_url = var("KBFORGE_REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());
        let docs_url = var("KBFORGE_DOCS_URL").unwrap_or_else(|| DEFAULT_DOCS_URL.to_string());

        let engine_raw =
            var("KBFORGE_STORAGE_ENGINE").unwrap_or_else(|| "filesystem".to_string());
        let engine = match engine_raw.as_str() {
            "minio" | "s3" => StorageEngine::ObjectStore {
                bucket: var("KBFORGE_S3_BUCKET")
                    .ok_or(ConfigError::MissingVar("KBFORGE_S3_BUCKET"))?,
                endpoint: var("KBFORGE_S3_ENDPOINT"),
                access_key_id: var("KBFORGE_S3_ACCESS_KEY_ID"),
                secret_access_key: var("KBFORGE_S3_SECRET_ACCESS_KEY"),
            },
            "filesystem" => StorageEngine::Filesystem {
                base_path: PathBuf::from(
                    var("KBFORGE_FS_PATH").unwrap_or_else(|| DEFAULT_FS_PATH.to_string()),
                ),
            },
            other => return Err(ConfigError::UnknownEngine(other.to_string())),
        };

        Ok(Self { bind, redis_url, docs_url, engine })
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
