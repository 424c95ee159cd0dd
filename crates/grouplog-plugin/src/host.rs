// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The surface a chat host exposes to plugins.

use std::fmt;
use std::sync::Arc;

use grouplog_core::{DiagnosticSink, MessageHook};

/// Produces the text reply of an operator command.
pub type CommandHandler = Box<dyn Fn() -> String + Send + Sync>;

/// An operator command such as `/grouplogs`.
pub struct CommandRegistration {
    pub name: String,
    pub description: String,
    pub handler: CommandHandler,
}

impl CommandRegistration {
    /// Run the command and return its reply text.
    pub fn invoke(&self) -> String {
        (self.handler)()
    }
}

impl fmt::Debug for CommandRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistration")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Registration points offered by the host.
pub trait PluginHost {
    /// The host's logger; plugin diagnostics go here.
    fn logger(&self) -> Arc<dyn DiagnosticSink>;

    /// Subscribe a hook to every inbound message.
    fn on_message_received(&mut self, hook: Arc<dyn MessageHook>);

    /// Add an operator command.
    fn register_command(&mut self, command: CommandRegistration);
}
