// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cleo agents` command implementation.

use cleo_config::model::CleoConfig;
use cleo_core::{AgentOrigin, AgentRecord, CleoError};
use cleo_router::{delegate_tool_name, registry_from_config};
use colored::Colorize;

/// Lists every agent the configured registry knows about.
pub async fn run_agents(config: &CleoConfig) -> Result<(), CleoError> {
    let agents = registry_from_config(config).get_all_agents().await?;
    for agent in &agents {
        println!("{}", format_agent(agent));
    }
    Ok(())
}

fn format_agent(agent: &AgentRecord) -> String {
    let origin = match agent.origin {
        AgentOrigin::Builtin => agent.origin.to_string().dimmed(),
        AgentOrigin::Custom => agent.origin.to_string().cyan(),
    };
    let tool = agent
        .tools
        .first()
        .cloned()
        .unwrap_or_else(|| delegate_tool_name(&agent.id));
    let mut line = format!(
        "{:<18} {:<10} {:<8} {}",
        agent.id.bold(),
        agent.name,
        origin,
        tool
    );
    if let Some(description) = &agent.description {
        line.push_str(&format!("\n  {}", description.dimmed()));
    }
    line
}
