// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./grouplog.toml` > `~/.config/grouplog/grouplog.toml` >
//! `/etc/grouplog/grouplog.toml`, with `GROUPLOG_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GrouplogConfig;

/// Top-level sections, used to turn `GROUPLOG_LOG_PATH` into `log.path`.
const SECTIONS: &[&str] = &["log", "classifier", "query", "stats"];

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/grouplog/grouplog.toml`
/// 3. `~/.config/grouplog/grouplog.toml`
/// 4. `./grouplog.toml`
/// 5. `GROUPLOG_*` environment variables
pub fn load_config() -> Result<GrouplogConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only. Used by tests.
pub fn load_config_from_str(toml_content: &str) -> Result<GrouplogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GrouplogConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GrouplogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GrouplogConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GrouplogConfig::default()))
        .merge(Toml::file("/etc/grouplog/grouplog.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("grouplog/grouplog.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("grouplog.toml"))
        .merge(env_provider())
}

/// Environment provider mapping the first `_` after a known section to a dot.
///
/// `Env::split("_")` would turn `GROUPLOG_QUERY_DEFAULT_LIMIT` into
/// `query.default.limit`; the explicit map keeps `query.default_limit`.
fn env_provider() -> Env {
    Env::prefixed("GROUPLOG_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("log_path"), "log.path");
        assert_eq!(map_env_key("query_default_limit"), "query.default_limit");
        assert_eq!(
            map_env_key("classifier_channel_keyword"),
            "classifier.channel_keyword"
        );
        assert_eq!(map_env_key("stats_time_format"), "stats.time_format");
    }

    #[test]
    fn unknown_env_key_passes_through() {
        assert_eq!(map_env_key("logpath"), "logpath");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }
}
