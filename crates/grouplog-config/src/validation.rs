// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::GrouplogConfig;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &GrouplogConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.log.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "log.path must not be empty".to_string(),
        });
    }

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LEVELS.join(", ")
            ),
        });
    }

    if config.classifier.channel_keyword.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "classifier.channel_keyword must not be empty".to_string(),
        });
    }

    if config.query.default_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "query.default_limit must be at least 1".to_string(),
        });
    }

    if config.stats.time_format.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "stats.time_format must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
