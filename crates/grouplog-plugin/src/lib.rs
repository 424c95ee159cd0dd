// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin entry point for the group message logger.
//!
//! [`register`] subscribes the logging hook to inbound messages and adds the
//! `grouplogs` statistics command to the host.

pub mod host;
pub mod manifest;

use std::sync::Arc;

use chrono::Local;
use grouplog_config::GrouplogConfig;
use grouplog_core::GrouplogError;
use grouplog_hook::{GroupLogHandler, JsonlAppender};
use grouplog_query::stats_reply;

pub use host::{CommandHandler, CommandRegistration, PluginHost};
pub use manifest::{builtin_manifest, parse_plugin_manifest, PluginManifest};

/// Name of the statistics command.
pub const STATS_COMMAND: &str = "grouplogs";

/// Hook class the logging handler subscribes to.
pub const MESSAGE_RECEIVED: &str = "message_received";

/// Register everything the built-in manifest declares with `host`.
pub fn register(
    host: &mut dyn PluginHost,
    config: &GrouplogConfig,
) -> Result<PluginManifest, GrouplogError> {
    let manifest = builtin_manifest()?;
    register_manifest(host, config, &manifest)?;
    Ok(manifest)
}

/// Register the hooks, commands and skills listed in `manifest`.
///
/// An entry this crate has no implementation for is a configuration error.
pub fn register_manifest(
    host: &mut dyn PluginHost,
    config: &GrouplogConfig,
    manifest: &PluginManifest,
) -> Result<(), GrouplogError> {
    let logger = host.logger();
    let path = config.log.path_buf();
    let name = &manifest.name;

    logger.info(&format!("[{name}] Plugin loaded"));

    for hook in &manifest.hooks {
        match hook.as_str() {
            MESSAGE_RECEIVED => {
                let handler = GroupLogHandler::new(
                    JsonlAppender::new(path.clone()),
                    &config.classifier,
                    Some(Arc::clone(&logger)),
                );
                host.on_message_received(Arc::new(handler));
                logger.info(&format!("[{name}] Registered {MESSAGE_RECEIVED} hook"));
            }
            other => {
                return Err(GrouplogError::Config(format!(
                    "plugin manifest: unsupported hook '{other}'"
                )));
            }
        }
    }

    for command in &manifest.commands {
        match command.as_str() {
            STATS_COMMAND => {
                let time_format = config.stats.time_format.clone();
                let command_path = path.clone();
                host.register_command(CommandRegistration {
                    name: STATS_COMMAND.to_string(),
                    description: "Show WhatsApp group message log statistics".to_string(),
                    handler: Box::new(move || stats_reply(&command_path, &Local, &time_format)),
                });
            }
            other => {
                return Err(GrouplogError::Config(format!(
                    "plugin manifest: unsupported command '{other}'"
                )));
            }
        }
    }

    for skill in &manifest.skills {
        logger.info(&format!("[{name}] Skill {skill} registered for agent access"));
    }
    logger.info(&format!(
        "[{name}] Messages will be logged to: {}",
        path.display()
    ));

    Ok(())
}
