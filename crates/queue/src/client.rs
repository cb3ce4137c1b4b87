// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-backed queue client.
//!
//! Layout shared with the worker: one hash per job under
//! `kbforge:job:{id}`, plus a pending list the worker pops from. The
//! gateway writes the initial record at enqueue time; the worker owns
//! every later mutation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kbforge_core::{CompileRequest, JobId, QueueFlags};
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::{JobQueue, QueueError, QueueJob};

const PENDING_LIST: &str = "kbforge:queue:default";

/// Queue client backed by Redis.
#[derive(Clone)]
pub struct RedisQueue {
    conn: MultiplexedConnection,
}

impl RedisQueue {
    /// Connect to the queue backend at the given Redis URL.
    pub async fn connect(url: &str) -> Result<Self, QueueError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn })
    }

    fn job_key(job_id: &str) -> String {
        format!("kbforge:job:{job_id}")
    }
}

#[async_trait]
impl JobQueue for RedisQueue {
    async fn enqueue(&self, request: &CompileRequest) -> Result<JobId, QueueError> {
        let id = JobId::new();
        let now = Utc::now().to_rfc3339();
        let payload = serde_json::to_string(request)?;

        let mut conn = self.conn.clone();
        let _: () = conn
            .hset_multiple(
                Self::job_key(id.as_str()),
                &[
                    ("status", "queued"),
                    ("created_at", now.as_str()),
                    ("enqueued_at", now.as_str()),
                    ("request", payload.as_str()),
                ],
            )
            .await?;
        let _: () = conn.rpush(PENDING_LIST, id.as_str()).await?;

        tracing::info!(job_id = %id, keyboard = %request.keyboard, "enqueued compile job");
        Ok(id)
    }

    async fn fetch(&self, job_id: &str) -> Result<Option<QueueJob>, QueueError> {
        let mut conn = self.conn.clone();
        let map: HashMap<String, String> = conn.hgetall(Self::job_key(job_id)).await?;
        if map.is_empty() {
            // Redis reports a missing hash as an empty map; the job either
            // never existed or already expired from the backend.
            return Ok(None);
        }
        Ok(Some(parse_record(job_id, &map)?))
    }
}

/// Decode a job hash into a live record.
///
/// An unrecognized status string leaves every flag clear, which the
/// resolver classifies as `unknown` and logs as a contract violation.
fn parse_record(job_id: &str, map: &HashMap<String, String>) -> Result<QueueJob, QueueError> {
    let mut flags = QueueFlags::default();
    match map.get("status").map(String::as_str) {
        Some("queued") => flags.queued = true,
        Some("started") => flags.started = true,
        Some("finished") => flags.finished = true,
        Some("failed") => flags.failed = true,
        _ => {}
    }

    let result = match map.get("result") {
        Some(raw) => Some(serde_json::from_str(raw).map_err(|e| QueueError::CorruptRecord {
            job_id: job_id.to_string(),
            source: e,
        })?),
        None => None,
    };

    Ok(QueueJob {
        id: job_id.into(),
        created_at: parse_timestamp(map, "created_at"),
        enqueued_at: parse_timestamp(map, "enqueued_at"),
        flags,
        result,
    })
}

fn parse_timestamp(map: &HashMap<String, String>, field: &str) -> Option<DateTime<Utc>> {
    map.get(field)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
