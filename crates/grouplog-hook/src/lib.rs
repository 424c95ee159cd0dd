// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message-received hook for WhatsApp group conversations.
//!
//! Each inbound event is classified, normalized into a [`LogRecord`], and
//! appended as one line to the shared JSON-lines log.
//!
//! [`LogRecord`]: grouplog_core::LogRecord

pub mod classify;
pub mod handler;
pub mod record;
pub mod writer;

pub use classify::{classify, extract_group_id, ChannelMatcher, Classification};
pub use handler::{GroupLogHandler, Outcome, RejectReason, HOOK_NAME};
pub use record::{build_record, normalize_timestamp};
pub use writer::JsonlAppender;
