// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compile request shape and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for a compile request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// An identifier contains a character that would escape its storage prefix.
    #[error("invalid {field}: must not contain '{separator}'")]
    ForbiddenSeparator { field: &'static str, separator: char },
}

/// A request to compile firmware for one keyboard/keymap/layout combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub keyboard: String,
    pub keymap: String,
    pub layout: String,
    pub layers: Vec<String>,
}

impl CompileRequest {
    /// Reject identifiers that could traverse into foreign storage paths.
    ///
    /// `keyboard` and `keymap` are later spliced into object keys and
    /// filesystem paths, so separator characters would let a request escape
    /// its job prefix. This is a security boundary, reported as a client
    /// error rather than a server fault.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.keyboard.contains('.') {
            return Err(RequestError::ForbiddenSeparator { field: "keyboard", separator: '.' });
        }
        if self.keymap.contains('/') {
            return Err(RequestError::ForbiddenSeparator { field: "keymap", separator: '/' });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
