// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `--key value` argument pairing for the query tool.

use std::collections::HashMap;

/// Pair up arguments two at a time.
///
/// A pair whose first element starts with `--` sets `key = value`; any other
/// pair is skipped whole. A trailing key without a value is dropped.
pub fn parse_pairs(args: &[String]) -> HashMap<String, String> {
    args.chunks(2)
        .filter_map(|pair| {
            let key = pair[0].strip_prefix("--")?;
            let value = pair.get(1)?;
            Some((key.to_string(), value.clone()))
        })
        .collect()
}

/// Parse the leading integer of `input`, ignoring anything after the digits.
///
/// `"12h"` gives 12, `" -3"` gives -3, `"h12"` gives `None`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Filter parameters for one query.
///
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub group_id: Option<String>,
    pub since: Option<String>,
    pub hours: Option<String>,
    pub limit: Option<String>,
}

impl QueryParams {
    /// Build parameters from raw `--key value` arguments. Unknown keys are ignored.
    pub fn from_args(args: &[String]) -> Self {
        let mut pairs = parse_pairs(args);
        let mut take = |key: &str| pairs.remove(key).filter(|v| !v.is_empty());
        Self {
            group_id: take("group_id"),
            since: take("since"),
            hours: take("hours"),
            limit: take("limit"),
        }
    }

    /// Positive hour count, if `hours` parses to one.
    pub fn hours_window(&self) -> Option<i64> {
        self.hours
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|h| *h > 0)
    }

    /// Record cap: a positive `limit`, else `default`.
    pub fn resolve_limit(&self, default: usize) -> usize {
        self.limit
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(default)
    }
}
