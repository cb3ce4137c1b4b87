// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sample fixtures shared across crates' tests.

use chrono::{TimeZone, Utc};

use crate::{CompileRequest, JobStatus, JobView, ResultRecord};

/// A result record for a successful build.
pub fn firmware_result(firmware_filename: &str, source_archive: &str) -> ResultRecord {
    ResultRecord {
        firmware: true,
        firmware_filename: firmware_filename.to_string(),
        source_archive: source_archive.to_string(),
    }
}

/// A result record for a job that completed without producing firmware.
pub fn empty_result() -> ResultRecord {
    ResultRecord {
        firmware: false,
        firmware_filename: String::new(),
        source_archive: String::new(),
    }
}

/// A finished job view with fixed timestamps and the given result.
pub fn finished_view(id: &str, result: ResultRecord) -> JobView {
    JobView {
        created_at: Utc.timestamp_opt(1_700_000_000, 0).single(),
        enqueued_at: Utc.timestamp_opt(1_700_000_001, 0).single(),
        id: id.into(),
        is_failed: false,
        status: JobStatus::Finished,
        result: Some(result),
    }
}

/// A well-formed compile request.
pub fn compile_request() -> CompileRequest {
    CompileRequest {
        keyboard: "planck/rev6".to_string(),
        keymap: "default".to_string(),
        layout: "LAYOUT_ortho_4x12".to_string(),
        layers: vec!["[\"KC_A\"]".to_string()],
    }
}
