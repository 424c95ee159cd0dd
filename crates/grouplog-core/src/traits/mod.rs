// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions shared between the host-facing plugin and the hook.

pub mod hook;
pub mod sink;

pub use hook::MessageHook;
pub use sink::{DiagnosticSink, TracingSink};
