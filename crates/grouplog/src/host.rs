// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process host used when the binary runs the plugin on its own.

use std::collections::HashMap;
use std::sync::Arc;

use grouplog_core::{DeliveryContext, DiagnosticSink, InboundEvent, MessageHook, TracingSink};
use grouplog_plugin::{CommandRegistration, PluginHost};

/// Collects hook and command registrations and dispatches to them.
#[derive(Default)]
pub struct StandaloneHost {
    hooks: Vec<Arc<dyn MessageHook>>,
    commands: HashMap<String, CommandRegistration>,
}

impl StandaloneHost {
    /// Deliver one inbound event to every registered hook.
    pub fn dispatch(&self, event: &InboundEvent, ctx: &DeliveryContext) {
        for hook in &self.hooks {
            tracing::debug!(hook = hook.name(), "dispatching message_received");
            hook.on_message_received(event, ctx);
        }
    }

    /// Run a registered command by name.
    pub fn run_command(&self, name: &str) -> Option<String> {
        self.commands.get(name).map(CommandRegistration::invoke)
    }
}

impl PluginHost for StandaloneHost {
    fn logger(&self) -> Arc<dyn DiagnosticSink> {
        Arc::new(TracingSink)
    }

    fn on_message_received(&mut self, hook: Arc<dyn MessageHook>) {
        self.hooks.push(hook);
    }

    fn register_command(&mut self, command: CommandRegistration) {
        self.commands.insert(command.name.clone(), command);
    }
}
