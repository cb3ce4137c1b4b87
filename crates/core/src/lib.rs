// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kbforge-core: domain types for the firmware compile gateway.
//!
//! Pure data — the canonical job status model, the unified status/result
//! view, and compile-request validation. No I/O lives here.

pub mod macros;

pub mod job;
pub mod request;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use job::{ArtifactKind, JobId, JobStatus, JobView, QueueFlags, ResultRecord};
pub use request::{CompileRequest, RequestError};
