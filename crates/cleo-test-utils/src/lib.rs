// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Cleo integration tests.
//!
//! Provides mock agent registries for fast, deterministic tests without
//! touching agent files on disk.
//!
//! # Components
//!
//! - [`MockRegistry`] - Fixed agent list with a load counter
//! - [`FailingRegistry`] - Registry whose every load fails

pub mod mock_registry;

pub use mock_registry::{FailingRegistry, MockRegistry};
