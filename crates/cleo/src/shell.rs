// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cleo shell` command implementation.
//!
//! Routes each line through one long-lived decider, so the routing cache
//! warms up across the session. Expired entries are swept in the background
//! until the shell exits.

use std::time::Duration;

use cleo_config::model::CleoConfig;
use cleo_core::CleoError;
use cleo_router::{registry_from_config, spawn_cleanup_task, CacheStats, DelegationDecider};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::route::format_decision;

/// A line of shell input.
#[derive(Debug, PartialEq)]
enum ShellCommand<'a> {
    Quit,
    Stats,
    Clear,
    Help,
    Unknown(&'a str),
    Route(&'a str),
}

fn parse_line(line: &str) -> Option<ShellCommand<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match trimmed {
        "/quit" | "/exit" => ShellCommand::Quit,
        "/stats" => ShellCommand::Stats,
        "/clear" => ShellCommand::Clear,
        "/help" => ShellCommand::Help,
        cmd if cmd.starts_with('/') => ShellCommand::Unknown(cmd),
        message => ShellCommand::Route(message),
    })
}

fn format_stats(stats: &CacheStats) -> String {
    format!(
        "cache: {} entries, {} hits / {} misses ({:.0}% hit rate)",
        stats.size,
        stats.hits,
        stats.misses,
        stats.hit_rate * 100.0
    )
}

/// Runs the `cleo shell` interactive REPL.
pub async fn run_shell(config: CleoConfig) -> Result<(), CleoError> {
    let decider = DelegationDecider::from_config(&config, registry_from_config(&config));

    let shutdown = CancellationToken::new();
    let cleanup = decider.cache().map(|cache| {
        spawn_cleanup_task(
            cache.clone(),
            Duration::from_secs(config.routing.cache_cleanup_interval_secs),
            shutdown.clone(),
        )
    });

    let mut rl = DefaultEditor::new()
        .map_err(|e| CleoError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "cleo shell".bold().green());
    println!(
        "Type a message to route it, {} for cache stats, {} to exit.\n",
        "/stats".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", config.agent.name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let Some(command) = parse_line(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(&line);

                match command {
                    ShellCommand::Quit => break,
                    ShellCommand::Stats => match decider.cache() {
                        Some(cache) => println!("{}", format_stats(&cache.get_stats())),
                        None => println!("{}", "routing cache disabled".dimmed()),
                    },
                    ShellCommand::Clear => {
                        if let Some(cache) = decider.cache() {
                            cache.clear();
                        }
                        println!("{}", "cache cleared".dimmed());
                    }
                    ShellCommand::Help => {
                        println!("/stats  show routing cache statistics");
                        println!("/clear  empty the routing cache");
                        println!("/quit   exit the shell");
                    }
                    ShellCommand::Unknown(cmd) => {
                        eprintln!("{}: unknown command {cmd}", "error".red());
                    }
                    ShellCommand::Route(message) => {
                        let decision = decider.make_delegation_decision(message).await;
                        println!("{}\n", format_decision(&decision));
                    }
                }
            }
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    shutdown.cancel();
    if let Some(handle) = cleanup {
        if let Err(e) = handle.await {
            debug!(error = %e, "cache cleanup task ended abnormally");
        }
    }
    if let Some(cache) = decider.cache() {
        println!("{}", format_stats(&cache.get_stats()).dimmed());
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}
