// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the group message logger.
//!
//! This crate provides the error type, the inbound event and log record
//! types, and the traits the host runtime and the hook meet at: a
//! [`MessageHook`] receives events, a [`DiagnosticSink`] receives trace lines.

pub mod error;
pub mod time;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GrouplogError;
pub use time::{format_iso, parse_datetime};
pub use traits::{DiagnosticSink, MessageHook, TracingSink};
pub use types::{DeliveryContext, InboundEvent, LogRecord, Metadata};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouplog_error_variants_render() {
        let config = GrouplogError::Config("bad".into());
        assert_eq!(config.to_string(), "configuration error: bad");

        let io = GrouplogError::io(
            "/tmp/x.jsonl",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(io.to_string().contains("/tmp/x.jsonl"));
        assert!(io.to_string().contains("denied"));

        let ts = GrouplogError::Timestamp("out of range".into());
        assert_eq!(ts.to_string(), "invalid timestamp: out of range");

        let _internal = GrouplogError::Internal("test".into());
    }

    #[test]
    fn serde_json_errors_convert() {
        let err = serde_json::from_str::<LogRecord>("{not json").unwrap_err();
        let converted: GrouplogError = err.into();
        assert!(matches!(converted, GrouplogError::Serialization { .. }));
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_hook<T: MessageHook>() {}
        fn _assert_sink<T: DiagnosticSink>() {}
        _assert_sink::<TracingSink>();
    }
}
