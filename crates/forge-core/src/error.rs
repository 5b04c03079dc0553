// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Session Forge workspace.

use thiserror::Error;

/// The primary error type used across storage, memory and tool operations.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Configuration errors (invalid values, unresolvable directories).
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors while persisting or removing a document.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document could not be serialized for writing.
    #[error("serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Caller-supplied parameters are missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A delete-by-index request fell outside the current view.
    #[error("{}", describe_out_of_range(*index, *len))]
    IndexOutOfRange { index: usize, len: usize },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ForgeError {
    /// Wraps any filesystem-level error as [`ForgeError::Storage`].
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ForgeError::Storage {
            source: Box::new(err),
        }
    }

    /// The valid 1-based index range for an out-of-range error, e.g. `"1-3"`.
    ///
    /// `None` for other variants and for an empty view.
    pub fn valid_range(&self) -> Option<String> {
        match self {
            ForgeError::IndexOutOfRange { len, .. } if *len > 0 => Some(format!("1-{len}")),
            _ => None,
        }
    }
}

fn describe_out_of_range(index: usize, len: usize) -> String {
    if len == 0 {
        format!("index {index} is out of range: no entries to delete")
    } else {
        format!("index {index} is out of range: valid range is 1-{len}")
    }
}
