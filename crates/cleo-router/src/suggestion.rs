// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Specialist suggestion from message content.
//!
//! Two stages with a clear boundary:
//! - [`Matcher`]: synchronous, ordered keyword rules over a fixed table.
//! - [`RegistryLookup`]: asynchronous scan for display names of agents
//!   loaded from an [`AgentRegistry`].
//!
//! [`AgentSuggester`] runs the matcher first and only falls back to the
//! registry when no rule fired.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cleo_core::{AgentRecord, AgentRegistry};
use regex::Regex;
use serde::Serialize;
use strum::Display;
use tracing::{debug, warn};

use crate::agents::{AMI, APU, EMMA, JENN, PETER, TOBY};

/// Confidence attached to a keyword rule match.
pub const STATIC_MATCH_CONFIDENCE: f64 = 0.85;

/// Confidence attached to a registry display-name match.
pub const REGISTRY_MATCH_CONFIDENCE: f64 = 0.75;

/// Which stage produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Static,
    Registry,
    Cache,
}

/// A suggested delegation target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSuggestion {
    pub agent_id: String,
    pub source: SuggestionSource,
    pub confidence: f64,
    /// Rule name or matched display name.
    pub matched: String,
    /// Delegate tool declared by the agent's record, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

/// Synchronous suggestion stage.
pub trait Matcher: Send + Sync {
    fn match_agent(&self, message: &str) -> Option<AgentSuggestion>;
}

/// Asynchronous suggestion stage. Implementations swallow their own
/// failures and return `None`.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    async fn lookup(&self, message: &str) -> Option<AgentSuggestion>;
}

/// One keyword rule: if `pattern` matches, suggest `agent_id`.
#[derive(Debug, Clone)]
pub struct SuggestionRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub agent_id: String,
}

impl SuggestionRule {
    /// Build a rule from a case-insensitive pattern.
    pub fn new(
        name: &'static str,
        pattern: &str,
        agent_id: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(&format!("(?i){pattern}"))?,
            agent_id: agent_id.into(),
        })
    }
}

/// Ordered rule table where the first matching rule wins.
///
/// Order encodes priority: Telegram is checked before calendar/email so
/// "send a telegram message" goes to the community specialist, and before
/// generic social media for the same reason.
pub struct KeywordMatcher {
    rules: Vec<SuggestionRule>,
}

impl KeywordMatcher {
    pub fn new(rules: Vec<SuggestionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SuggestionRule] {
        &self.rules
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Matcher for KeywordMatcher {
    fn match_agent(&self, message: &str) -> Option<AgentSuggestion> {
        let rule = self.rules.iter().find(|r| r.pattern.is_match(message))?;
        Some(AgentSuggestion {
            agent_id: rule.agent_id.clone(),
            source: SuggestionSource::Static,
            confidence: STATIC_MATCH_CONFIDENCE,
            matched: rule.name.to_string(),
            tool: None,
        })
    }
}

/// The built-in rule table, in priority order.
pub fn default_rules() -> Vec<SuggestionRule> {
    let table: [(&'static str, &str, &str); 7] = [
        (
            "telegram",
            r"\b(telegram|telegram channel|canal de telegram)\b",
            JENN.id,
        ),
        (
            "calendar_email",
            r"\b(calendar|meeting|meetings|schedule|appointment|email|emails|e-mail|gmail|inbox|correo|reuni[oó]n|calendario|agenda)\b",
            AMI.id,
        ),
        (
            "social_media",
            r"\b(twitter|tweet|tweets|instagram|facebook|tiktok|linkedin|social media|redes sociales|hashtags?|followers)\b",
            JENN.id,
        ),
        (
            "technical",
            r"\b(code|coding|programming|function|bug|debug|api|database|sql|deploy|deployment|server|python|javascript|typescript|rust|react|script|algorithm|refactor|compile|github|docker|kubernetes|backend|frontend)\b",
            TOBY.id,
        ),
        (
            "ecommerce",
            r"\b(shopify|e-?commerce|online store|store|products?|inventory|orders?|sales|checkout|dropshipping|tienda|ventas)\b",
            EMMA.id,
        ),
        (
            "finance",
            r"\b(budget|investment|investing|invest|stocks?|portfolio|crypto|cryptocurrency|bitcoin|tax|taxes|accounting|invoices?|loan|expenses?|finanzas|presupuesto)\b",
            PETER.id,
        ),
        (
            "research",
            r"\b(research|investigate|news|latest news|web search|search the web|look up|compare|comparison|investigar)\b",
            APU.id,
        ),
    ];

    table
        .into_iter()
        .filter_map(|(name, pattern, agent_id)| match SuggestionRule::new(name, pattern, agent_id) {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!(rule = name, error = %e, "dropping suggestion rule with invalid pattern");
                None
            }
        })
        .collect()
}

/// Finds agents by display name in message text.
///
/// Names match case-insensitively as whole words. A name directly preceded
/// by `@` is a social handle (Telegram/Twitter flows), not an agent mention,
/// and is skipped.
pub struct AgentNameLookup {
    registry: Arc<dyn AgentRegistry>,
}

impl AgentNameLookup {
    pub fn new(registry: Arc<dyn AgentRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl RegistryLookup for AgentNameLookup {
    async fn lookup(&self, message: &str) -> Option<AgentSuggestion> {
        let agents = match self.registry.get_all_agents().await {
            Ok(agents) => agents,
            Err(e) => {
                warn!(
                    registry = self.registry.name(),
                    error = %e,
                    "agent registry unavailable, skipping name lookup"
                );
                return None;
            }
        };

        let found = NameIndex::new(&agents).find(message)?;
        debug!(
            agent = found.agent_id.as_str(),
            name = found.name.as_str(),
            "agent named in message"
        );
        Some(AgentSuggestion {
            agent_id: found.agent_id,
            source: SuggestionSource::Registry,
            confidence: REGISTRY_MATCH_CONFIDENCE,
            matched: found.name,
            tool: found.tool,
        })
    }
}

/// Whole-word display-name patterns for one registry snapshot.
///
/// Built once per registry load. Names are lowercased and deduplicated
/// (first id wins) and ordered longest first by character count, so
/// "Ami Pro" wins over "Ami".
pub struct NameIndex {
    entries: Vec<(NameMatch, Regex)>,
}

/// An agent found by display name.
#[derive(Debug, Clone, PartialEq)]
pub struct NameMatch {
    /// Lowercased display name.
    pub name: String,
    pub agent_id: String,
    /// First tool the agent's record declares.
    pub tool: Option<String>,
}

impl NameIndex {
    pub fn new(agents: &[AgentRecord]) -> Self {
        let mut by_name: HashMap<String, &AgentRecord> = HashMap::new();
        for agent in agents {
            let name = agent.name.trim().to_lowercase();
            if !name.is_empty() {
                by_name.entry(name).or_insert(agent);
            }
        }

        let mut names: Vec<(String, &AgentRecord)> = by_name.into_iter().collect();
        names.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });

        let entries = names
            .into_iter()
            .filter_map(|(name, agent)| {
                let pattern = format!(r"(?i)(?:^|[^@\w]){}(?:$|\W)", regex::escape(&name));
                match Regex::new(&pattern) {
                    Ok(pattern) => Some((
                        NameMatch {
                            name,
                            agent_id: agent.id.clone(),
                            tool: agent.tools.first().cloned(),
                        },
                        pattern,
                    )),
                    Err(e) => {
                        warn!(
                            agent = agent.id.as_str(),
                            error = %e,
                            "skipping agent name with invalid pattern"
                        );
                        None
                    }
                }
            })
            .collect();
        Self { entries }
    }

    /// The first indexed agent named in `message` as a whole word not
    /// preceded by `@`.
    pub fn find(&self, message: &str) -> Option<NameMatch> {
        self.entries
            .iter()
            .find(|(_, pattern)| pattern.is_match(message))
            .map(|(found, _)| found.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-shot form of [`NameIndex::find`], returning `(lowercased name, id)`.
pub fn find_agent_by_name(message: &str, agents: &[AgentRecord]) -> Option<(String, String)> {
    NameIndex::new(agents)
        .find(message)
        .map(|found| (found.name, found.agent_id))
}

/// Composes the static and registry stages.
pub struct AgentSuggester {
    matcher: Box<dyn Matcher>,
    lookup: Option<Box<dyn RegistryLookup>>,
}

impl AgentSuggester {
    pub fn new(matcher: Box<dyn Matcher>, lookup: Option<Box<dyn RegistryLookup>>) -> Self {
        Self { matcher, lookup }
    }

    /// Keyword rules plus display-name lookup against `registry`.
    pub fn with_registry(registry: Arc<dyn AgentRegistry>) -> Self {
        Self::new(
            Box::new(KeywordMatcher::default()),
            Some(Box::new(AgentNameLookup::new(registry))),
        )
    }

    /// Keyword rules only.
    pub fn static_only() -> Self {
        Self::new(Box::new(KeywordMatcher::default()), None)
    }

    /// Suggest a specialist, or `None` if neither stage finds one.
    pub async fn suggest_agent(&self, message: &str) -> Option<AgentSuggestion> {
        if let Some(suggestion) = self.matcher.match_agent(message) {
            debug!(
                agent = suggestion.agent_id.as_str(),
                rule = suggestion.matched.as_str(),
                "keyword rule matched"
            );
            return Some(suggestion);
        }

        match &self.lookup {
            Some(lookup) => lookup.lookup(message).await,
            None => None,
        }
    }
}
