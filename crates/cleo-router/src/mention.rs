// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit specialist mention detection for the early-exit fast path.
//!
//! Recognizes `@toby`, `toby, ...` and "ask toby" style phrases (English and
//! Spanish) for the built-in specialists. Only the fixed catalogue is
//! consulted, never the agent registry.

use regex::Regex;

use crate::agents::{Specialist, BUILTIN_SPECIALISTS};

/// Verbs that introduce a directly addressed specialist.
const ADDRESS_VERBS: &str =
    r"ask|tell|ping|pregúntale\s+a|preguntale\s+a|pregunta\s+a|dile\s+a|pídele\s+a|pidele\s+a";

/// Scans messages for explicit mentions of built-in specialists.
pub struct MentionDetector {
    patterns: Vec<(&'static Specialist, Regex)>,
}

impl MentionDetector {
    pub fn new() -> Self {
        Self::for_specialists(BUILTIN_SPECIALISTS)
    }

    /// Build a detector for an arbitrary set of specialists.
    pub fn for_specialists(specialists: &'static [Specialist]) -> Self {
        let patterns = specialists
            .iter()
            .map(|s| {
                let aliases = s
                    .aliases
                    .iter()
                    .map(|a| regex::escape(a))
                    .collect::<Vec<_>>()
                    .join("|");
                let pattern = format!(
                    r"(?i)@(?:{aliases})\b|\b(?:{aliases})\s*,|\b(?:{ADDRESS_VERBS})\s+(?:{aliases})\b"
                );
                let regex = Regex::new(&pattern).expect("mention pattern must compile");
                (s, regex)
            })
            .collect();
        Self { patterns }
    }

    /// Return the specialist mentioned earliest in the message, if any.
    ///
    /// Ties on position go to catalogue order.
    pub fn detect(&self, message: &str) -> Option<&'static Specialist> {
        self.patterns
            .iter()
            .filter_map(|(specialist, regex)| regex.find(message).map(|m| (m.start(), *specialist)))
            .min_by_key(|(start, _)| *start)
            .map(|(_, specialist)| specialist)
    }
}

impl Default for MentionDetector {
    fn default() -> Self {
        Self::new()
    }
}
