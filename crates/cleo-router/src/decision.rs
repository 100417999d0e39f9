// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delegation decisions: explicit mention > complexity + suggestion.
//!
//! The decider never fails. Registry errors are swallowed by the suggestion
//! stage, everything else is in-process computation.

use std::sync::Arc;

use cleo_config::model::{CleoConfig, RoutingConfig};
use cleo_core::{AgentRegistry, SystemClock};
use serde::Serialize;
use tracing::{debug, info};

use crate::agents::delegate_tool_name;
use crate::cache::{RoutingCache, RoutingCacheConfig};
use crate::complexity::{analyze_task_complexity, ComplexityScore, Recommendation};
use crate::mention::MentionDetector;
use crate::suggestion::{AgentSuggester, AgentSuggestion, SuggestionSource};

/// Outcome of routing one user message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelegationDecision {
    pub should_delegate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_agent: Option<String>,
    /// Tool the assistant should call to hand off to `target_agent`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_tool: Option<String>,
    pub reasoning: String,
    pub complexity: ComplexityScore,
    /// Set when an explicit mention short-circuited the analysis.
    pub early_exit: bool,
}

impl DelegationDecision {
    fn direct(reasoning: String, complexity: ComplexityScore) -> Self {
        Self {
            should_delegate: false,
            target_agent: None,
            delegate_tool: None,
            reasoning,
            complexity,
            early_exit: false,
        }
    }

    /// `tool` falls back to the derived tool name when the agent declared none.
    fn delegate(
        suggestion: AgentSuggestion,
        reasoning: String,
        complexity: ComplexityScore,
    ) -> Self {
        let tool = suggestion
            .tool
            .unwrap_or_else(|| delegate_tool_name(&suggestion.agent_id));
        Self {
            should_delegate: true,
            target_agent: Some(suggestion.agent_id),
            delegate_tool: Some(tool),
            reasoning,
            complexity,
            early_exit: false,
        }
    }
}

/// Decides whether a message should go to a specialist.
pub struct DelegationDecider {
    enabled: bool,
    early_exit: bool,
    mentions: MentionDetector,
    suggester: AgentSuggester,
    cache: Option<Arc<RoutingCache>>,
}

impl DelegationDecider {
    pub fn new(
        routing: &RoutingConfig,
        suggester: AgentSuggester,
        cache: Option<Arc<RoutingCache>>,
    ) -> Self {
        Self {
            enabled: routing.enabled,
            early_exit: routing.early_exit,
            mentions: MentionDetector::new(),
            suggester,
            cache,
        }
    }

    /// Decider wired from configuration, looking up names in `registry`.
    ///
    /// A system-clock cache is created when `routing.cache_enabled` is set.
    pub fn from_config(config: &CleoConfig, registry: Arc<dyn AgentRegistry>) -> Self {
        let cache = config.routing.cache_enabled.then(|| {
            Arc::new(RoutingCache::new(
                RoutingCacheConfig::from(&config.routing),
                Arc::new(SystemClock),
            ))
        });
        Self::new(&config.routing, AgentSuggester::with_registry(registry), cache)
    }

    /// Replace the routing cache, e.g. to share one between deciders.
    pub fn with_cache(mut self, cache: Option<Arc<RoutingCache>>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> Option<&Arc<RoutingCache>> {
        self.cache.as_ref()
    }

    /// Route `user_message`.
    pub async fn make_delegation_decision(&self, user_message: &str) -> DelegationDecision {
        if !self.enabled {
            let complexity = analyze_task_complexity(user_message);
            return DelegationDecision::direct(
                "Delegation routing is disabled; handling directly".to_string(),
                complexity,
            );
        }

        if self.early_exit {
            if let Some(specialist) = self.mentions.detect(user_message) {
                info!(agent = specialist.id, "explicit mention, skipping analysis");
                return DelegationDecision {
                    should_delegate: true,
                    target_agent: Some(specialist.id.to_string()),
                    delegate_tool: Some(specialist.tool.to_string()),
                    reasoning: format!(
                        "User explicitly asked for {}; delegating to {}",
                        specialist.name, specialist.id
                    ),
                    complexity: ComplexityScore::explicit_mention(specialist.id),
                    early_exit: true,
                };
            }
        }

        let complexity = analyze_task_complexity(user_message);
        let score = complexity.score;

        // A direct answer never uses the suggestion, so skip the registry I/O.
        if complexity.recommendation == Recommendation::Direct {
            debug!(score, "simple task, answering directly");
            return DelegationDecision::direct(
                format!("Simple task (complexity {score}); handling directly"),
                complexity,
            );
        }

        let decision = match (complexity.recommendation, self.suggest(user_message).await) {
            (Recommendation::Delegate, Some(suggestion)) => {
                let reasoning = format!(
                    "Complex task (complexity {score}) matching {} via {} lookup",
                    suggestion.agent_id, suggestion.source
                );
                DelegationDecision::delegate(suggestion, reasoning, complexity)
            }
            (Recommendation::Clarify, Some(suggestion)) => {
                let reasoning = format!(
                    "Ambiguous complexity ({score}) but {} matches via {} lookup; delegating",
                    suggestion.agent_id, suggestion.source
                );
                DelegationDecision::delegate(suggestion, reasoning, complexity)
            }
            _ => DelegationDecision::direct(
                format!(
                    "No specialist matched (complexity {score}); will handle directly, may follow up"
                ),
                complexity,
            ),
        };

        info!(
            delegate = decision.should_delegate,
            agent = decision.target_agent.as_deref().unwrap_or("-"),
            score,
            "delegation decision"
        );
        decision
    }

    /// Cached routing first, then the suggester. Fresh suggestions are offered
    /// to the cache, which applies its own confidence floor.
    async fn suggest(&self, message: &str) -> Option<AgentSuggestion> {
        if let Some(cache) = &self.cache {
            if let Some(agent_id) = cache.get_cached(message) {
                let entry = cache.entry(message);
                let confidence = entry
                    .as_ref()
                    .map_or(cache.config().min_confidence, |e| e.confidence);
                return Some(AgentSuggestion {
                    agent_id,
                    source: SuggestionSource::Cache,
                    confidence,
                    matched: "cache".to_string(),
                    tool: entry.and_then(|e| e.tool),
                });
            }
        }

        let suggestion = self.suggester.suggest_agent(message).await?;
        if let Some(cache) = &self.cache {
            cache.set_with_tool(
                message,
                &suggestion.agent_id,
                suggestion.tool.as_deref(),
                suggestion.confidence,
            );
        }
        Some(suggestion)
    }
}
