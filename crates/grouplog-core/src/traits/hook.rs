// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hook trait invoked by the host for every inbound message.

use crate::types::{DeliveryContext, InboundEvent};

/// A handler registered against the host's "message received" event.
///
/// Implementations must not fail observably: the host ignores any outcome,
/// so errors are handled inside `on_message_received`.
pub trait MessageHook: Send + Sync {
    /// Returns the hook's registration name.
    fn name(&self) -> &str;

    /// Handles one inbound event together with its delivery context.
    fn on_message_received(&self, event: &InboundEvent, ctx: &DeliveryContext);
}
