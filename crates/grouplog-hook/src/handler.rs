// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The message-received hook.
//!
//! [`GroupLogHandler::handle`] never fails: rejections are traced, errors are
//! reported to the diagnostic sink and to stderr, and the call returns.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use grouplog_config::model::ClassifierConfig;
use grouplog_core::{
    DeliveryContext, DiagnosticSink, GrouplogError, InboundEvent, LogRecord, MessageHook,
};
use strum::Display;

use crate::classify::{classify, ChannelMatcher};
use crate::record::{build_record, normalize_timestamp};
use crate::writer::JsonlAppender;

/// Registration name used with the host.
pub const HOOK_NAME: &str = "group-logger";

/// Why an event produced no record. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RejectReason {
    #[strum(to_string = "not a whatsapp group message")]
    NotWhatsAppGroup,
    #[strum(to_string = "no group id")]
    MissingGroupId,
    #[strum(to_string = "empty message")]
    EmptyMessage,
}

/// What happened to one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Logged(LogRecord),
    Rejected(RejectReason),
}

/// Classifies inbound events and appends WhatsApp group messages to the log.
pub struct GroupLogHandler {
    appender: JsonlAppender,
    matcher: ChannelMatcher,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl GroupLogHandler {
    pub fn new(
        appender: JsonlAppender,
        classifier: &ClassifierConfig,
        sink: Option<Arc<dyn DiagnosticSink>>,
    ) -> Self {
        Self {
            appender,
            matcher: ChannelMatcher::new(classifier),
            sink,
        }
    }

    pub fn appender(&self) -> &JsonlAppender {
        &self.appender
    }

    /// Handle an event, swallowing every failure.
    pub fn handle(&self, event: &InboundEvent, ctx: &DeliveryContext) {
        if let Err(err) = self.process(event, ctx, Utc::now()) {
            let line = format!("[{HOOK_NAME}] Error logging message: {err}");
            if let Some(sink) = &self.sink {
                sink.error(&line);
            }
            eprintln!("{line}");
        }
    }

    /// Classify, build and append. `now` stands in for a missing event timestamp.
    pub fn process(
        &self,
        event: &InboundEvent,
        ctx: &DeliveryContext,
        now: DateTime<Utc>,
    ) -> Result<Outcome, GrouplogError> {
        self.debug(&format!(
            "[{HOOK_NAME}] received message: channel={} from={} conversation={}",
            ctx.channel_id,
            event.from,
            ctx.conversation_id.as_deref().unwrap_or("-"),
        ));

        let classification = classify(event, ctx, &self.matcher);
        let message = event.content.trim();

        let rejection = if !classification.is_eligible() {
            Some(RejectReason::NotWhatsAppGroup)
        } else if classification.group_id.is_empty() {
            Some(RejectReason::MissingGroupId)
        } else if message.is_empty() {
            Some(RejectReason::EmptyMessage)
        } else {
            None
        };

        if let Some(reason) = rejection {
            self.debug(&format!("[{HOOK_NAME}] skipped: {reason}"));
            return Ok(Outcome::Rejected(reason));
        }

        let timestamp = normalize_timestamp(event.timestamp, now)?;
        let record = build_record(event, ctx, &classification.group_id, message, timestamp);
        self.appender.append(&record)?;

        if let Some(sink) = &self.sink {
            sink.info(&format!(
                "[{HOOK_NAME}] logged message from {} in {} to {}",
                record.sender_name,
                record.group_id,
                self.appender.path().display()
            ));
        }
        Ok(Outcome::Logged(record))
    }

    fn debug(&self, line: &str) {
        if let Some(sink) = &self.sink {
            sink.debug(line);
        }
    }
}

impl MessageHook for GroupLogHandler {
    fn name(&self) -> &str {
        HOOK_NAME
    }

    fn on_message_received(&self, event: &InboundEvent, ctx: &DeliveryContext) {
        self.handle(event, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<(&'static str, String)>>,
    }

    impl RecordingSink {
        fn at(&self, level: &str) -> Vec<String> {
            self.lines
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn debug(&self, message: &str) {
            self.lines.lock().unwrap().push(("debug", message.to_string()));
        }
        fn info(&self, message: &str) {
            self.lines.lock().unwrap().push(("info", message.to_string()));
        }
        fn warn(&self, message: &str) {
            self.lines.lock().unwrap().push(("warn", message.to_string()));
        }
        fn error(&self, message: &str) {
            self.lines.lock().unwrap().push(("error", message.to_string()));
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn group_event(content: &str) -> (InboundEvent, DeliveryContext) {
        let event = InboundEvent {
            from: "31611111111@s.whatsapp.net".into(),
            content: content.into(),
            timestamp: Some(1_700_000_000.0),
            metadata: json!({"groupName": "Climbing", "senderName": "Ana"})
                .as_object()
                .cloned()
                .unwrap(),
        };
        let ctx = DeliveryContext {
            channel_id: "whatsapp".into(),
            account_id: None,
            conversation_id: Some("120363000000000001@g.us".into()),
        };
        (event, ctx)
    }

    fn handler_in(dir: &tempfile::TempDir, sink: Option<Arc<dyn DiagnosticSink>>) -> GroupLogHandler {
        GroupLogHandler::new(
            JsonlAppender::new(dir.path().join("group-messages.jsonl")),
            &ClassifierConfig::default(),
            sink,
        )
    }

    #[test]
    fn accepted_event_is_logged_and_traced() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(RecordingSink::default());
        let handler = handler_in(&dir, Some(sink.clone()));
        let (event, ctx) = group_event("  see you at the wall  ");

        let outcome = handler.process(&event, &ctx, now()).unwrap();
        let Outcome::Logged(record) = outcome else {
            panic!("expected Logged, got {outcome:?}");
        };
        assert_eq!(record.message, "see you at the wall");
        assert_eq!(record.group_id, "120363000000000001@g.us");
        assert_eq!(record.timestamp, "2023-11-14T22:13:20.000Z");
        assert_eq!(sink.at("info").len(), 1);
        assert!(sink.at("debug")[0].contains("channel=whatsapp"));
    }

    #[test]
    fn rejection_reasons_follow_priority() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler_in(&dir, None);

        let event = InboundEvent {
            from: "someone".into(),
            content: "".into(),
            ..Default::default()
        };
        let ctx = DeliveryContext {
            channel_id: "telegram".into(),
            ..Default::default()
        };
        assert_eq!(
            handler.process(&event, &ctx, now()).unwrap(),
            Outcome::Rejected(RejectReason::NotWhatsAppGroup)
        );

        let ctx = DeliveryContext {
            channel_id: "whatsapp".into(),
            ..Default::default()
        };
        assert_eq!(
            handler.process(&event, &ctx, now()).unwrap(),
            Outcome::Rejected(RejectReason::MissingGroupId)
        );

        let (event, ctx) = group_event("   \n\t");
        assert_eq!(
            handler.process(&event, &ctx, now()).unwrap(),
            Outcome::Rejected(RejectReason::EmptyMessage)
        );

        assert!(!handler.appender().path().exists());
    }

    #[test]
    fn handle_swallows_write_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();

        let sink = Arc::new(RecordingSink::default());
        let handler = GroupLogHandler::new(
            JsonlAppender::new(&blocked),
            &ClassifierConfig::default(),
            Some(sink.clone()),
        );
        let (event, ctx) = group_event("hello");

        handler.handle(&event, &ctx);

        let errors = sink.at("error");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Error logging message"));
    }

    #[test]
    fn handle_without_sink_does_not_fail() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler_in(&dir, None);
        let (mut event, ctx) = group_event("hello");
        event.timestamp = Some(1e300);

        handler.handle(&event, &ctx);
        assert!(!handler.appender().path().exists());
    }

    #[test]
    fn message_hook_delegates_to_handle() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler_in(&dir, None);
        let hook: &dyn MessageHook = &handler;
        let (event, ctx) = group_event("hi");

        assert_eq!(hook.name(), "group-logger");
        hook.on_message_received(&event, &ctx);

        let content = std::fs::read_to_string(handler.appender().path()).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
