// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator-facing statistics for the `grouplogs` command.

use std::collections::HashSet;
use std::fmt::{Display, Write};
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use grouplog_core::{parse_datetime, GrouplogError};

use crate::reader::{read_to_string_if_exists, StoredRecord};

/// Reply when nothing has been logged yet.
pub const EMPTY_STATE: &str = "📝 No group messages logged yet.\n\nMessages will be automatically stored when they arrive in WhatsApp groups.";

/// Summary figures for the log file.
#[derive(Debug, Clone, PartialEq)]
pub struct LogStats {
    /// Non-empty lines, parseable or not.
    pub total_messages: usize,
    /// Distinct non-empty string `groupId` values among object lines.
    pub unique_groups: usize,
    pub size_bytes: u64,
    /// Timestamp of the last object line, if it has a readable one.
    pub latest: Option<DateTime<Utc>>,
}

/// Compute statistics from file content and size.
pub fn summarize(content: &str, size_bytes: u64) -> LogStats {
    let lines: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();
    let records: Vec<StoredRecord> = lines
        .iter()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    let unique_groups = records
        .iter()
        .filter_map(StoredRecord::group_id)
        .filter(|g| !g.is_empty())
        .collect::<HashSet<_>>()
        .len();

    LogStats {
        total_messages: lines.len(),
        unique_groups,
        size_bytes,
        latest: records
            .last()
            .and_then(StoredRecord::timestamp)
            .and_then(parse_datetime),
    }
}

/// Read the log and compute statistics. `Ok(None)` means no log file yet.
pub fn collect_stats(path: &Path) -> Result<Option<LogStats>, GrouplogError> {
    let Some(content) = read_to_string_if_exists(path)? else {
        return Ok(None);
    };
    let size_bytes = std::fs::metadata(path)
        .map_err(|e| GrouplogError::io(path, e))?
        .len();
    Ok(Some(summarize(&content, size_bytes)))
}

/// Render `moment` in `tz` with a strftime pattern; an invalid pattern falls
/// back to RFC 3339.
pub fn format_local<Tz>(moment: DateTime<Utc>, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = moment.with_timezone(tz);
    let mut out = String::new();
    if write!(out, "{}", local.format(pattern)).is_err() {
        return local.to_rfc3339();
    }
    out
}

/// Human-readable summary text.
pub fn render_summary<Tz>(stats: &LogStats, path: &Path, tz: &Tz, time_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let latest = stats
        .latest
        .map(|t| format_local(t, tz, time_format))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "📊 Group Message Logger Statistics\n\n\
         💬 Total messages: {}\n\
         👥 Unique groups: {}\n\
         💾 File size: {:.2} KB\n\
         🕒 Latest message: {}\n\
         📂 Location: {}",
        stats.total_messages,
        stats.unique_groups,
        stats.size_bytes as f64 / 1024.0,
        latest,
        path.display()
    )
}

/// The full command reply: empty state, summary, or an error line. Never fails.
pub fn stats_reply<Tz>(path: &Path, tz: &Tz, time_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match collect_stats(path) {
        Ok(None) => EMPTY_STATE.to_string(),
        Ok(Some(stats)) => render_summary(&stats, path, tz, time_format),
        Err(err) => format!("❌ Error reading log file: {err}"),
    }
}
