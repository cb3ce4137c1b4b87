// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn job_id_display() {
    let id = JobId::from("abc-123");
    assert_eq!(id.to_string(), "abc-123");
}

#[test]
fn job_id_new_is_unique() {
    assert_ne!(JobId::new(), JobId::new());
}

#[test]
fn job_id_serde_is_transparent() {
    let id = JobId::from("my-job");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"my-job\"");

    let parsed: JobId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

fn flags(finished: bool, queued: bool, started: bool, failed: bool) -> QueueFlags {
    QueueFlags { finished, queued, started, failed }
}

#[yare::parameterized(
    finished_only          = { flags(true, false, false, false), JobStatus::Finished },
    queued_only            = { flags(false, true, false, false), JobStatus::Queued },
    started_only           = { flags(false, false, true, false), JobStatus::Running },
    failed_only            = { flags(false, false, false, true), JobStatus::Failed },
    none_set               = { flags(false, false, false, false), JobStatus::Unknown },
    finished_beats_queued  = { flags(true, true, false, false), JobStatus::Finished },
    finished_beats_failed  = { flags(true, false, false, true), JobStatus::Finished },
    queued_beats_started   = { flags(false, true, true, false), JobStatus::Queued },
    started_beats_failed   = { flags(false, false, true, true), JobStatus::Running },
    all_set                = { flags(true, true, true, true), JobStatus::Finished },
)]
fn canonical_status_precedence(flags: QueueFlags, expected: JobStatus) {
    assert_eq!(flags.canonical_status(), expected);
}

#[test]
fn status_is_terminal() {
    assert!(JobStatus::Finished.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
    assert!(!JobStatus::Queued.is_terminal());
    assert!(!JobStatus::Running.is_terminal());
    assert!(!JobStatus::Unknown.is_terminal());
}

#[test]
fn status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&JobStatus::Running).unwrap(), "\"running\"");
    assert_eq!(serde_json::to_string(&JobStatus::Finished).unwrap(), "\"finished\"");
    let parsed: JobStatus = serde_json::from_str("\"queued\"").unwrap();
    assert_eq!(parsed, JobStatus::Queued);
}

#[test]
fn job_view_serializes_null_result_until_terminal() {
    let view = JobView {
        created_at: None,
        enqueued_at: None,
        id: "job-1".into(),
        is_failed: false,
        status: JobStatus::Queued,
        result: None,
    };
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], "job-1");
    assert_eq!(json["status"], "queued");
    assert!(json["result"].is_null());
    assert_eq!(json["is_failed"], false);
}

#[test]
fn job_view_round_trips_through_json() {
    let view = crate::test_support::finished_view(
        "job-2",
        crate::test_support::firmware_result("default.hex", "src.zip"),
    );
    let json = serde_json::to_string(&view).unwrap();
    let parsed: JobView = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, view);
}

#[test]
fn artifact_kind_selects_filename() {
    let result = crate::test_support::firmware_result("planck_default.hex", "planck_src.zip");
    assert_eq!(ArtifactKind::Firmware.filename(&result), "planck_default.hex");
    assert_eq!(ArtifactKind::Source.filename(&result), "planck_src.zip");
}

#[test]
fn result_record_tolerates_missing_filenames() {
    // Worker writes only `firmware: false` for builds with no output.
    let parsed: ResultRecord = serde_json::from_str(r#"{"firmware": false}"#).unwrap();
    assert!(!parsed.firmware);
    assert!(parsed.firmware_filename.is_empty());
    assert!(parsed.source_archive.is_empty());
}
