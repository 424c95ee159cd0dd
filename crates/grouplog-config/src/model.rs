// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GrouplogConfig {
    /// Log file location and diagnostic verbosity.
    #[serde(default)]
    pub log: LogConfig,

    /// Channel-name heuristics for recognising WhatsApp traffic.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Query tool defaults.
    #[serde(default)]
    pub query: QueryConfig,

    /// Statistics command rendering.
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Log file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Path of the shared JSON-lines log file.
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Diagnostic level (trace, debug, info, warn, error).
    #[serde(default = "default_level")]
    pub level: String,
}

impl LogConfig {
    /// The log file path as a `PathBuf`.
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            level: default_level(),
        }
    }
}

fn default_log_path() -> String {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".openclaw")
        .join("group-messages.jsonl")
        .display()
        .to_string()
}

fn default_level() -> String {
    "info".to_string()
}

/// Channel classification settings.
///
/// A channel name matches when it contains `channel_keyword` or equals one of
/// `channel_aliases`, after trimming and lowercasing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    #[serde(default = "default_channel_keyword")]
    pub channel_keyword: String,

    #[serde(default = "default_channel_aliases")]
    pub channel_aliases: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            channel_keyword: default_channel_keyword(),
            channel_aliases: default_channel_aliases(),
        }
    }
}

fn default_channel_keyword() -> String {
    "whatsapp".to_string()
}

fn default_channel_aliases() -> Vec<String> {
    vec!["web".to_string(), "web-inbound".to_string()]
}

/// Query tool settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Record cap applied when `--limit` is absent or unusable.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    100
}

/// Statistics command settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    /// `strftime` pattern for the latest-message time, rendered in local time.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
        }
    }
}

fn default_time_format() -> String {
    "%d-%m-%Y, %H:%M:%S".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_openclaw_file() {
        let config = GrouplogConfig::default();
        let path = config.log.path_buf();
        assert!(path.ends_with(".openclaw/group-messages.jsonl"));
    }

    #[test]
    fn classifier_defaults_match_host_convention() {
        let config = ClassifierConfig::default();
        assert_eq!(config.channel_keyword, "whatsapp");
        assert_eq!(config.channel_aliases, vec!["web", "web-inbound"]);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: GrouplogConfig = toml::from_str("[query]\ndefault_limit = 20\n").unwrap();
        assert_eq!(config.query.default_limit, 20);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.stats.time_format, "%d-%m-%Y, %H:%M:%S");
    }

    #[test]
    fn unknown_classifier_key_is_rejected() {
        let result = toml::from_str::<GrouplogConfig>("[classifier]\nkeyword = \"wa\"\n");
        assert!(result.is_err());
    }
}
