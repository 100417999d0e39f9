// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Cleo delegation routing.

use thiserror::Error;

/// The primary error type used across the Cleo crates.
#[derive(Debug, Error)]
pub enum CleoError {
    /// The effective configuration could not be rendered or applied.
    #[error("configuration error: {0}")]
    Config(String),

    /// The agent registry could not be loaded (missing file, parse failure, backend down).
    #[error("agent registry error: {message}")]
    Registry {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CleoError {
    /// Shorthand for a registry error without an underlying cause.
    pub fn registry(message: impl Into<String>) -> Self {
        CleoError::Registry {
            message: message.into(),
            source: None,
        }
    }
}
