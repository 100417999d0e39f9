// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seams between routing and its collaborators.

pub mod registry;

pub use registry::AgentRegistry;
