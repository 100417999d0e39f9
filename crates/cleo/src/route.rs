// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cleo route` and `cleo score` command implementations.

use cleo_config::model::CleoConfig;
use cleo_core::CleoError;
use cleo_router::{
    analyze_task_complexity, registry_from_config, render_delegation_hint, ComplexityScore,
    DelegationDecider, DelegationDecision, Recommendation,
};
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct RouteOutput<'a> {
    decision: &'a DelegationDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

/// Runs `cleo route`: one decision with a fresh registry and cache.
pub async fn run_route(config: &CleoConfig, message: &str, json: bool) -> Result<(), CleoError> {
    let decider = DelegationDecider::from_config(config, registry_from_config(config));
    let decision = decider.make_delegation_decision(message).await;

    if json {
        let output = RouteOutput {
            decision: &decision,
            hint: render_delegation_hint(&decision),
        };
        println!("{}", to_json(&output)?);
    } else {
        println!("{}", format_decision(&decision));
    }
    Ok(())
}

/// Runs `cleo score`.
pub fn run_score(message: &str, json: bool) -> Result<(), CleoError> {
    let score = analyze_task_complexity(message);
    if json {
        println!("{}", to_json(&score)?);
    } else {
        println!("{}", format_score(&score));
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CleoError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CleoError::Internal(format!("failed to serialize output: {e}")))
}

fn colored_recommendation(recommendation: Recommendation) -> colored::ColoredString {
    let label = recommendation.to_string();
    match recommendation {
        Recommendation::Direct => label.green(),
        Recommendation::Delegate => label.yellow(),
        Recommendation::Clarify => label.cyan(),
    }
}

pub fn format_score(score: &ComplexityScore) -> String {
    let factors = if score.factors.is_empty() {
        "none".to_string()
    } else {
        score.factors.join(", ")
    };
    format!(
        "{} {}/100 ({})\n{} {}\n{}",
        "complexity:".bold(),
        score.score,
        colored_recommendation(score.recommendation),
        "factors:".bold(),
        factors,
        score.reasoning.dimmed()
    )
}

pub fn format_decision(decision: &DelegationDecision) -> String {
    let verdict = match (&decision.target_agent, decision.should_delegate) {
        (Some(agent), true) => format!("{} {}", "delegate to".yellow().bold(), agent.bold()),
        _ => "answer directly".green().bold().to_string(),
    };
    let mut out = verdict;
    if decision.early_exit {
        out.push_str(&format!(" {}", "(explicit mention)".dimmed()));
    }
    out.push('\n');
    out.push_str(&decision.reasoning);
    out.push('\n');
    out.push_str(&format_score(&decision.complexity));
    if let Some(hint) = render_delegation_hint(decision) {
        out.push('\n');
        out.push_str(&format!("{} {}", "hint:".bold(), hint));
    }
    out
}
