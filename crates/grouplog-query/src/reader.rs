// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-file reading of the JSON-lines log.
//!
//! A line that is not a JSON object is skipped; it never stops the rest of
//! the file from being read. A trailing partial line from an in-progress
//! append is skipped the same way. Objects are kept exactly as stored.

use std::io::ErrorKind;
use std::path::Path;

use grouplog_core::{GrouplogError, Metadata};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One log line as stored on disk, whatever keys and value types it carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredRecord(Metadata);

impl StoredRecord {
    /// The string value stored under `key`, if there is one.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }

    /// `groupId`, when stored as a string.
    pub fn group_id(&self) -> Option<&str> {
        self.str_field("groupId")
    }

    /// `timestamp`, when stored as a string.
    pub fn timestamp(&self) -> Option<&str> {
        self.str_field("timestamp")
    }

    pub fn as_map(&self) -> &Metadata {
        &self.0
    }
}

impl From<Metadata> for StoredRecord {
    fn from(map: Metadata) -> Self {
        Self(map)
    }
}

/// Parse every non-blank line, dropping the ones that fail.
pub fn parse_records(content: &str) -> Vec<StoredRecord> {
    let mut skipped = 0usize;
    let records: Vec<StoredRecord> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        debug!(skipped, "skipped malformed log lines");
    }
    records
}

/// Read the log file. `Ok(None)` means it does not exist yet.
pub fn read_to_string_if_exists(path: &Path) -> Result<Option<String>, GrouplogError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GrouplogError::io(path, e)),
    }
}

/// Read and parse the log file. `Ok(None)` means it does not exist yet.
pub fn read_records(path: &Path) -> Result<Option<Vec<StoredRecord>>, GrouplogError> {
    Ok(read_to_string_if_exists(path)?.map(|content| parse_records(&content)))
}
