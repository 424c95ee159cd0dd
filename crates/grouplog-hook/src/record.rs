// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record construction: field defaulting and timestamp normalization.

use chrono::{DateTime, Utc};
use grouplog_core::{format_iso, DeliveryContext, GrouplogError, InboundEvent, LogRecord};

/// Values above this are read as milliseconds, at or below it as seconds.
///
/// A heuristic: a seconds value beyond ~33658 AD would be misread as millis.
pub const MILLIS_THRESHOLD: f64 = 1e12;

/// Turn an event timestamp (seconds or milliseconds) into an ISO-8601 string.
///
/// Missing or non-finite values fall back to `now`.
pub fn normalize_timestamp(
    timestamp: Option<f64>,
    now: DateTime<Utc>,
) -> Result<String, GrouplogError> {
    let Some(raw) = timestamp.filter(|t| t.is_finite()) else {
        return Ok(format_iso(now));
    };

    let millis = if raw > MILLIS_THRESHOLD {
        raw
    } else {
        raw * 1000.0
    };

    DateTime::from_timestamp_millis(millis.trunc() as i64)
        .map(format_iso)
        .ok_or_else(|| GrouplogError::Timestamp(format!("{raw} is outside the supported date range")))
}

/// First non-empty candidate, or `fallback`.
fn first_non_empty<'a>(candidates: &[&'a str], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|c| !c.is_empty())
        .unwrap_or(fallback)
}

/// Assemble the persisted record for an accepted event.
///
/// `group_id` and `message` have already been checked non-empty by the caller.
pub fn build_record(
    event: &InboundEvent,
    ctx: &DeliveryContext,
    group_id: &str,
    message: &str,
    timestamp: String,
) -> LogRecord {
    let conversation = ctx.conversation_id.as_deref().unwrap_or("");
    let meta = |key| event.metadata_str(key);

    LogRecord {
        timestamp,
        group_id: group_id.to_string(),
        group_name: first_non_empty(
            &[meta("groupName"), meta("chatName"), conversation],
            "Unknown Group",
        )
        .to_string(),
        session_key: meta("sessionKey").to_string(),
        sender_id: first_non_empty(&[meta("senderId"), event.from.as_str()], "unknown").to_string(),
        sender_name: first_non_empty(
            &[meta("senderName"), meta("senderUsername"), meta("pushName")],
            "Unknown",
        )
        .to_string(),
        message: message.to_string(),
        message_type: first_non_empty(&[meta("messageType"), meta("type")], "text").to_string(),
        channel_id: ctx.channel_id.clone(),
        account_id: first_non_empty(&[ctx.account_id.as_deref().unwrap_or("")], "default")
            .to_string(),
    }
}
