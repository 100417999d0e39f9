// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in specialist catalogue.

use cleo_core::{AgentOrigin, AgentRecord};

/// A specialist persona shipped with Cleo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Specialist {
    /// Delegation target id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Lowercase handles users type to address the specialist directly.
    pub aliases: &'static [&'static str],
    /// Tool the assistant calls to hand work to this specialist.
    pub tool: &'static str,
    pub specialty: &'static str,
    pub tags: &'static [&'static str],
}

pub const TOBY: Specialist = Specialist {
    id: "toby-technical",
    name: "Toby",
    aliases: &["toby"],
    tool: "delegate_to_toby",
    specialty: "software engineering, debugging, APIs and infrastructure",
    tags: &["technical", "code"],
};

pub const EMMA: Specialist = Specialist {
    id: "emma-ecommerce",
    name: "Emma",
    aliases: &["emma"],
    tool: "delegate_to_emma",
    specialty: "Shopify stores, products, orders and sales analytics",
    tags: &["ecommerce", "shopify"],
};

pub const APU: Specialist = Specialist {
    id: "apu-support",
    name: "Apu",
    aliases: &["apu"],
    tool: "delegate_to_apu",
    specialty: "web research, news and in-depth comparisons",
    tags: &["research", "web"],
};

pub const PETER: Specialist = Specialist {
    id: "peter-financial",
    name: "Peter",
    aliases: &["peter"],
    tool: "delegate_to_peter",
    specialty: "budgets, investments, crypto and accounting",
    tags: &["finance"],
};

pub const AMI: Specialist = Specialist {
    id: "ami-assistant",
    name: "Ami",
    aliases: &["ami"],
    tool: "delegate_to_ami",
    specialty: "calendar, email and personal organisation",
    tags: &["productivity", "calendar", "email"],
};

pub const JENN: Specialist = Specialist {
    id: "jenn-community",
    name: "Jenn",
    aliases: &["jenn", "jen"],
    tool: "delegate_to_jenn",
    specialty: "social media, Telegram channels and community management",
    tags: &["social", "telegram", "twitter"],
};

/// Every built-in specialist.
pub const BUILTIN_SPECIALISTS: &[Specialist] = &[TOBY, EMMA, APU, PETER, AMI, JENN];

/// Look up a built-in specialist by id.
pub fn specialist(id: &str) -> Option<&'static Specialist> {
    BUILTIN_SPECIALISTS.iter().find(|s| s.id == id)
}

/// Delegate tool name for any agent id.
///
/// Built-ins use their declared tool; custom agents get
/// `delegate_to_<id>` with dashes replaced by underscores.
pub fn delegate_tool_name(agent_id: &str) -> String {
    match specialist(agent_id) {
        Some(s) => s.tool.to_string(),
        None => format!("delegate_to_{}", agent_id.replace('-', "_")),
    }
}

impl From<&Specialist> for AgentRecord {
    fn from(s: &Specialist) -> Self {
        AgentRecord {
            id: s.id.to_string(),
            name: s.name.to_string(),
            description: Some(s.specialty.to_string()),
            tags: s.tags.iter().map(|t| t.to_string()).collect(),
            tools: vec![s.tool.to_string()],
            origin: AgentOrigin::Builtin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_aliases_are_unique() {
        let mut ids: Vec<_> = BUILTIN_SPECIALISTS.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), BUILTIN_SPECIALISTS.len());

        let mut aliases: Vec<_> = BUILTIN_SPECIALISTS
            .iter()
            .flat_map(|s| s.aliases.iter())
            .collect();
        let total = aliases.len();
        aliases.sort();
        aliases.dedup();
        assert_eq!(aliases.len(), total);
    }

    #[test]
    fn aliases_are_lowercase() {
        for s in BUILTIN_SPECIALISTS {
            for alias in s.aliases {
                assert_eq!(*alias, alias.to_lowercase());
            }
        }
    }

    #[test]
    fn tool_names() {
        assert_eq!(delegate_tool_name("toby-technical"), "delegate_to_toby");
        assert_eq!(delegate_tool_name("cleo-test"), "delegate_to_cleo_test");
    }

    #[test]
    fn specialist_converts_to_builtin_record() {
        let record = AgentRecord::from(&JENN);
        assert_eq!(record.id, "jenn-community");
        assert_eq!(record.origin, AgentOrigin::Builtin);
        assert_eq!(record.tools, vec!["delegate_to_jenn"]);
    }
}
