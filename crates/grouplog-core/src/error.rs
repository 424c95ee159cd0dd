// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the group message logger.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The error type shared by the hook, the query tool, and the configuration layer.
#[derive(Debug, Error)]
pub enum GrouplogError {
    /// Configuration errors (invalid TOML, failed validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors while reading or appending the log file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON encoding or decoding failures.
    #[error("serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// An event timestamp that cannot be represented as a calendar date.
    #[error("invalid timestamp: {0}")]
    Timestamp(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GrouplogError {
    /// Wrap an I/O error together with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        GrouplogError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
