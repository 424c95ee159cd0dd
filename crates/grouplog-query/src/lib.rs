// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side tools for the group message log: the query pipeline used by
//! agents and operators, and the statistics summary behind `grouplogs`.

pub mod args;
pub mod query;
pub mod reader;
pub mod stats;

pub use args::{parse_leading_int, parse_pairs, QueryParams};
pub use query::{filter_records, run_query, QueryResponse, QueryResult, ResolvedFilters};
pub use reader::{parse_records, read_records, StoredRecord};
pub use stats::{collect_stats, render_summary, stats_reply, LogStats, EMPTY_STATE};
