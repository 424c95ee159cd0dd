// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter, sort, and limit pipeline over the group message log.
//!
//! Steps, in order: exact `group_id` match, `since` lower bound (or, only
//! when `since` is absent, an `hours` window), ascending sort by timestamp,
//! then truncation from the front so the newest `limit` records remain.

use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use grouplog_core::{format_iso, parse_datetime, GrouplogError};
use serde::Serialize;
use tracing::debug;

use crate::args::QueryParams;
use crate::reader::{read_records, StoredRecord};

/// Informational text returned when the log file does not exist yet.
pub const NO_LOG_INFO: &str = "No messages logged yet. Make sure the group-logger hook is enabled and group messages have been sent.";

/// Filters as resolved for this query, echoed in the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFilters {
    /// The requested group, or `"all"`.
    pub group_id: String,
    pub since: Option<String>,
    /// The raw `hours` argument.
    pub hours: Option<String>,
    pub limit: usize,
}

/// Successful query output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub messages: Vec<StoredRecord>,
    pub count: usize,
    pub filters: ResolvedFilters,
    pub timestamp: String,
}

/// Output when there is no log file to query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyLog {
    pub messages: Vec<StoredRecord>,
    pub count: usize,
    pub info: String,
    pub log_file: String,
}

/// What a query produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    NoLog(EmptyLog),
    Results(QueryResult),
}

impl QueryResponse {
    pub fn count(&self) -> usize {
        match self {
            QueryResponse::NoLog(empty) => empty.count,
            QueryResponse::Results(result) => result.count,
        }
    }
}

/// Apply the filter/sort/limit pipeline to already-parsed records.
pub fn filter_records(
    mut records: Vec<StoredRecord>,
    params: &QueryParams,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<StoredRecord> {
    if let Some(group_id) = &params.group_id {
        records.retain(|r| r.group_id() == Some(group_id.as_str()));
    }

    // `since` suppresses `hours` even when `since` itself does not parse.
    let lower_bound = match &params.since {
        Some(since) => parse_datetime(since),
        None => params
            .hours_window()
            .and_then(TimeDelta::try_hours)
            .and_then(|window| now.checked_sub_signed(window)),
    };
    if let Some(bound) = lower_bound {
        records.retain(|r| stored_time(r).is_some_and(|t| t >= bound));
    }

    records.sort_by_cached_key(stored_time);

    if records.len() > limit {
        records = records.split_off(records.len() - limit);
    }
    records
}

/// The parsed `timestamp` of a stored line; `None` sorts first.
fn stored_time(record: &StoredRecord) -> Option<DateTime<Utc>> {
    record.timestamp().and_then(parse_datetime)
}

/// Run a query against the log file at `path`.
pub fn run_query(
    path: &Path,
    params: &QueryParams,
    default_limit: usize,
    now: DateTime<Utc>,
) -> Result<QueryResponse, GrouplogError> {
    let Some(records) = read_records(path)? else {
        debug!(path = %path.display(), "log file does not exist");
        return Ok(QueryResponse::NoLog(EmptyLog {
            messages: Vec::new(),
            count: 0,
            info: NO_LOG_INFO.to_string(),
            log_file: path.display().to_string(),
        }));
    };

    let total = records.len();
    let limit = params.resolve_limit(default_limit);
    let messages = filter_records(records, params, limit, now);
    debug!(total, matched = messages.len(), limit, "query complete");

    Ok(QueryResponse::Results(QueryResult {
        count: messages.len(),
        messages,
        filters: ResolvedFilters {
            group_id: params.group_id.clone().unwrap_or_else(|| "all".to_string()),
            since: params.since.clone(),
            hours: params.hours.clone(),
            limit,
        },
        timestamp: format_iso(now),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rec(group: &str, ts: &str, msg: &str) -> StoredRecord {
        let value = serde_json::json!({"timestamp": ts, "groupId": group, "message": msg});
        serde_json::from_value(value).unwrap()
    }

    fn two_days() -> Vec<StoredRecord> {
        vec![
            rec("a@g.us", "2024-01-01T00:00:00Z", "first"),
            rec("a@g.us", "2024-01-02T00:00:00Z", "second"),
        ]
    }

    fn far_future() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    fn messages(records: &[StoredRecord]) -> Vec<&str> {
        records.iter().filter_map(|r| r.str_field("message")).collect()
    }

    #[test]
    fn since_is_inclusive() {
        let params = QueryParams {
            since: Some("2024-01-02T00:00:00Z".into()),
            ..Default::default()
        };
        let out = filter_records(two_days(), &params, 100, far_future());
        assert_eq!(messages(&out), vec!["second"]);
    }

    #[test]
    fn hours_window_relative_to_now() {
        let params = QueryParams {
            hours: Some("1".into()),
            ..Default::default()
        };
        assert!(filter_records(two_days(), &params, 100, far_future()).is_empty());

        let just_after = Utc.with_ymd_and_hms(2024, 1, 2, 0, 30, 0).unwrap();
        let out = filter_records(two_days(), &params, 100, just_after);
        assert_eq!(messages(&out), vec!["second"]);
    }

    #[test]
    fn since_takes_priority_over_hours() {
        // `hours=1` alone would drop both records; `since` alone keeps both.
        let params = QueryParams {
            since: Some("2023-12-31T00:00:00Z".into()),
            hours: Some("1".into()),
            ..Default::default()
        };
        let out = filter_records(two_days(), &params, 100, far_future());
        assert_eq!(messages(&out), vec!["first", "second"]);
    }

    #[test]
    fn unparseable_since_skips_filter_and_still_suppresses_hours() {
        let params = QueryParams {
            since: Some("last tuesday".into()),
            hours: Some("1".into()),
            ..Default::default()
        };
        let out = filter_records(two_days(), &params, 100, far_future());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn limit_keeps_most_recent_in_ascending_order() {
        let records = vec![
            rec("a@g.us", "2024-01-03T00:00:00Z", "3"),
            rec("a@g.us", "2024-01-01T00:00:00Z", "1"),
            rec("a@g.us", "2024-01-05T00:00:00Z", "5"),
            rec("a@g.us", "2024-01-02T00:00:00Z", "2"),
            rec("a@g.us", "2024-01-04T00:00:00Z", "4"),
        ];
        let out = filter_records(records, &QueryParams::default(), 2, far_future());
        assert_eq!(messages(&out), vec!["4", "5"]);
    }

    #[test]
    fn group_filter_is_exact() {
        let records = vec![
            rec("a@g.us", "2024-01-01T00:00:00Z", "a"),
            rec("ab@g.us", "2024-01-01T00:00:00Z", "ab"),
        ];
        let params = QueryParams {
            group_id: Some("a@g.us".into()),
            ..Default::default()
        };
        let out = filter_records(records, &params, 100, far_future());
        assert_eq!(messages(&out), vec!["a"]);
    }

    #[test]
    fn undated_records_sort_first_and_fail_time_filters() {
        let records = vec![
            rec("a@g.us", "2024-01-01T00:00:00Z", "dated"),
            rec("a@g.us", "", "undated"),
        ];
        let out = filter_records(records.clone(), &QueryParams::default(), 100, far_future());
        assert_eq!(messages(&out), vec!["undated", "dated"]);

        let params = QueryParams {
            since: Some("2000-01-01".into()),
            ..Default::default()
        };
        let out = filter_records(records, &params, 100, far_future());
        assert_eq!(messages(&out), vec!["dated"]);
    }

    #[test]
    fn stored_objects_pass_through_unchanged() {
        let sparse: StoredRecord =
            serde_json::from_str(r#"{"timestamp":"2024-01-02T00:00:00Z","groupId":"a@g.us"}"#)
                .unwrap();
        let numeric_group: StoredRecord =
            serde_json::from_str(r#"{"timestamp":"2024-01-01T00:00:00Z","groupId":123}"#).unwrap();
        let records = vec![sparse.clone(), numeric_group.clone()];

        let out = filter_records(records.clone(), &QueryParams::default(), 100, far_future());
        assert_eq!(out, vec![numeric_group, sparse.clone()]);

        let params = QueryParams {
            group_id: Some("a@g.us".into()),
            ..Default::default()
        };
        assert_eq!(filter_records(records, &params, 100, far_future()), vec![sparse]);
    }

    #[test]
    fn resolved_filters_echo_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        std::fs::write(&path, "").unwrap();

        let params = QueryParams {
            hours: Some("24h".into()),
            limit: Some("0".into()),
            ..Default::default()
        };
        let QueryResponse::Results(result) = run_query(&path, &params, 100, far_future()).unwrap()
        else {
            panic!("expected results for an existing file");
        };
        assert_eq!(result.count, 0);
        assert_eq!(
            result.filters,
            ResolvedFilters {
                group_id: "all".into(),
                since: None,
                hours: Some("24h".into()),
                limit: 100,
            }
        );
        assert_eq!(result.timestamp, "2030-01-01T00:00:00.000Z");
    }

    #[test]
    fn missing_file_yields_informational_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.jsonl");
        let response = run_query(&path, &QueryParams::default(), 100, far_future()).unwrap();

        assert_eq!(response.count(), 0);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["messages"], serde_json::json!([]));
        assert_eq!(json["info"], NO_LOG_INFO);
        assert_eq!(json["logFile"], path.display().to_string());
    }
}
