// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System-prompt hint derived from a delegation decision.

use crate::agents::{delegate_tool_name, specialist};
use crate::decision::DelegationDecision;

/// Render the hint that nudges the assistant toward a delegate tool.
///
/// Returns `None` when the decision is to answer directly. The decision's
/// `delegate_tool` is named when set, otherwise the derived tool name. The
/// model still makes the final tool choice.
pub fn render_delegation_hint(decision: &DelegationDecision) -> Option<String> {
    if !decision.should_delegate {
        return None;
    }
    let agent_id = decision.target_agent.as_deref()?;
    let tool = decision
        .delegate_tool
        .clone()
        .unwrap_or_else(|| delegate_tool_name(agent_id));
    let display = specialist(agent_id).map_or(agent_id, |s| s.name);

    let lead = if decision.early_exit {
        format!("The user explicitly addressed {display} ({agent_id}).")
    } else {
        format!(
            "This request looks like a job for {display} ({agent_id}), complexity {}/100.",
            decision.complexity.score
        )
    };

    Some(format!(
        "DELEGATION HINT: {lead} Prefer calling `{tool}` with the user's full request \
         instead of answering yourself. Reason: {}",
        decision.reasoning
    ))
}
