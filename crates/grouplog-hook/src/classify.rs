// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group-id extraction and WhatsApp channel classification.
//!
//! An event is eligible when a `...@g.us` group id can be found in any of
//! its addressing fields, or when any channel-ish field names WhatsApp. The
//! two checks are independent: either one alone is enough.

use std::sync::LazyLock;

use grouplog_config::model::ClassifierConfig;
use grouplog_core::{DeliveryContext, InboundEvent};
use regex::Regex;

/// WhatsApp group JIDs end in `@g.us`.
static GROUP_JID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z._-]+@g\.us").expect("group JID pattern is valid"));

/// Returns the first group JID embedded in `candidate`, if any.
pub fn extract_group_id(candidate: &str) -> Option<&str> {
    GROUP_JID.find(candidate).map(|m| m.as_str())
}

/// Scans the addressing fields in priority order and returns the first group id.
///
/// Order: conversation id, `originatingTo`, `to`, then the sender.
pub fn find_group_id<'a>(event: &'a InboundEvent, ctx: &'a DeliveryContext) -> Option<&'a str> {
    [
        ctx.conversation_id.as_deref().unwrap_or(""),
        event.metadata_str("originatingTo"),
        event.metadata_str("to"),
        event.from.as_str(),
    ]
    .into_iter()
    .find_map(extract_group_id)
}

/// Decides whether a channel name refers to WhatsApp.
#[derive(Debug, Clone)]
pub struct ChannelMatcher {
    keyword: String,
    aliases: Vec<String>,
}

impl ChannelMatcher {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            keyword: config.channel_keyword.trim().to_lowercase(),
            aliases: config
                .channel_aliases
                .iter()
                .map(|a| a.trim().to_lowercase())
                .collect(),
        }
    }

    /// True if the folded name contains the keyword or equals an alias.
    pub fn matches(&self, name: &str) -> bool {
        let folded = name.trim().to_lowercase();
        if folded.is_empty() {
            return false;
        }
        folded.contains(&self.keyword) || self.aliases.iter().any(|a| *a == folded)
    }

    /// Checks the context channel and the `originatingChannel`, `surface`
    /// and `provider` metadata fields.
    pub fn matches_event(&self, event: &InboundEvent, ctx: &DeliveryContext) -> bool {
        [
            ctx.channel_id.as_str(),
            event.metadata_str("originatingChannel"),
            event.metadata_str("surface"),
            event.metadata_str("provider"),
        ]
        .into_iter()
        .any(|name| self.matches(name))
    }
}

impl Default for ChannelMatcher {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

/// Result of classifying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Extracted group id, empty when none was found.
    pub group_id: String,
    /// Whether a channel field named WhatsApp.
    pub channel_match: bool,
}

impl Classification {
    pub fn is_eligible(&self) -> bool {
        !self.group_id.is_empty() || self.channel_match
    }
}

/// Classify an event against the matcher.
pub fn classify(
    event: &InboundEvent,
    ctx: &DeliveryContext,
    matcher: &ChannelMatcher,
) -> Classification {
    Classification {
        group_id: find_group_id(event, ctx).unwrap_or_default().to_string(),
        channel_match: matcher.matches_event(event, ctx),
    }
}
