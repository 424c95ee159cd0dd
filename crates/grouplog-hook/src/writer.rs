// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only JSON-lines writer for the shared log file.
//!
//! Each record is encoded to one buffer (JSON plus `\n`) and written with a
//! single `write_all` on a file opened in append mode. The in-process mutex
//! keeps concurrent hook calls from interleaving partial lines; other
//! processes writing the same file are not coordinated.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use grouplog_core::{GrouplogError, LogRecord};
use tracing::debug;

/// Appends log records to a JSON-lines file.
#[derive(Debug)]
pub struct JsonlAppender {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlAppender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line, creating the parent directory if needed.
    pub fn append(&self, record: &LogRecord) -> Result<(), GrouplogError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        // The guard only serializes writers; a poisoned lock protects no data.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GrouplogError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| GrouplogError::io(&self.path, e))?;
        file.write_all(&line)
            .map_err(|e| GrouplogError::io(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = line.len(), "appended group record");
        Ok(())
    }
}
