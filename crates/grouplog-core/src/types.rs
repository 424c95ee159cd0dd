// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound event, delivery context, and persisted log record types.

use serde::{Deserialize, Deserializer, Serialize};

/// Open-ended metadata attached to an inbound event by the host.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A message event delivered by the host runtime.
///
/// The host owns this shape; every field is optional on the wire so a sparse
/// payload still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Sender identifier as reported by the channel.
    ///
    /// Non-string values on the wire are treated as empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: String,

    /// Free-text message content.
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,

    /// Event time in seconds or milliseconds since the epoch.
    ///
    /// Non-numeric values on the wire are treated as absent.
    #[serde(default, deserialize_with = "lenient_number")]
    pub timestamp: Option<f64>,

    /// Arbitrary host-supplied metadata. Anything but an object reads as empty.
    #[serde(default, deserialize_with = "lenient_object")]
    pub metadata: Metadata,
}

impl InboundEvent {
    /// Returns the metadata value for `key` if it is a string, otherwise `""`.
    pub fn metadata_str(&self, key: &str) -> &str {
        self.metadata
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or("")
    }
}

/// Accept any JSON value for a timestamp, keeping only numbers.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64))
}

/// Accept any JSON value for a text field, keeping only strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

fn lenient_object<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Object(map)) => map,
        _ => Metadata::new(),
    })
}

/// Where an inbound event was delivered from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    /// Channel identifier (e.g. "whatsapp").
    #[serde(default)]
    pub channel_id: String,

    /// Account the channel is bound to.
    #[serde(default)]
    pub account_id: Option<String>,

    /// Conversation the event belongs to.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// One persisted line of the group message log, as the hook writes it.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub timestamp: String,
    pub group_id: String,
    pub group_name: String,
    pub session_key: String,
    pub sender_id: String,
    pub sender_name: String,
    pub message: String,
    pub message_type: String,
    pub channel_id: String,
    pub account_id: String,
}
