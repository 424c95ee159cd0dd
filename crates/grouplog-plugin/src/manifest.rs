// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `plugin.toml`.

use grouplog_core::GrouplogError;
use serde::Deserialize;

/// The manifest compiled into this crate.
const BUILTIN_MANIFEST: &str = include_str!("../plugin.toml");

/// What the plugin registers with its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginManifest {
    pub name: String,
    pub version: semver::Version,
    pub description: String,
    /// Host event classes the plugin hooks into.
    pub hooks: Vec<String>,
    /// Operator commands the plugin registers.
    pub commands: Vec<String>,
    /// Agent-callable skills shipped alongside.
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    plugin: PluginSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginSection {
    name: String,
    version: String,
    description: String,
    #[serde(default)]
    hooks: Vec<String>,
    #[serde(default)]
    commands: Vec<String>,
    #[serde(default)]
    skills: Vec<String>,
}

/// Parse and validate a plugin manifest.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<PluginManifest, GrouplogError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| GrouplogError::Config(format!("invalid plugin manifest: {e}")))?;
    let section = file.plugin;

    if section.name.trim().is_empty() {
        return Err(GrouplogError::Config(
            "plugin manifest: name must not be empty".to_string(),
        ));
    }

    let version = semver::Version::parse(&section.version).map_err(|e| {
        GrouplogError::Config(format!(
            "plugin manifest: version '{}' is not semver: {e}",
            section.version
        ))
    })?;

    Ok(PluginManifest {
        name: section.name,
        version,
        description: section.description,
        hooks: section.hooks,
        commands: section.commands,
        skills: section.skills,
    })
}

/// The manifest shipped with this crate.
pub fn builtin_manifest() -> Result<PluginManifest, GrouplogError> {
    parse_plugin_manifest(BUILTIN_MANIFEST)
}
