// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delegation routing for the Cleo assistant.
//!
//! This crate provides:
//! - [`analyze_task_complexity`]: Heuristic complexity scoring (pure, no I/O)
//! - [`AgentSuggester`]: Keyword rules, then a display-name lookup in the agent registry
//! - [`RoutingCache`]: In-memory TTL/LRU cache of learned routings
//! - [`DelegationDecider`]: Explicit-mention fast path, then score + suggestion
//!
//! The decision is rendered into a system-prompt hint with
//! [`render_delegation_hint`]; the model makes the final tool choice.

pub mod agents;
pub mod cache;
pub mod complexity;
pub mod decision;
pub mod mention;
pub mod prompt;
pub mod registry;
pub mod suggestion;

pub use agents::{delegate_tool_name, specialist, Specialist, BUILTIN_SPECIALISTS};
pub use cache::{
    normalize_input, spawn_cleanup_task, CacheStats, RoutingCache, RoutingCacheConfig,
    RoutingCacheEntry, MIN_CLEANUP_INTERVAL,
};
pub use complexity::{analyze_task_complexity, ComplexityScore, Factor, Recommendation};
pub use decision::{DelegationDecider, DelegationDecision};
pub use mention::MentionDetector;
pub use prompt::render_delegation_hint;
pub use registry::{registry_from_config, FileRegistry, LayeredRegistry, StaticRegistry};
pub use suggestion::{
    find_agent_by_name, AgentNameLookup, AgentSuggester, AgentSuggestion, KeywordMatcher, Matcher,
    NameIndex, NameMatch, RegistryLookup, SuggestionRule, SuggestionSource,
};
