// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cleo - delegation routing for a multi-specialist assistant.
//!
//! This is the binary entry point: one-shot routing and scoring, agent
//! listing, and an interactive routing shell.

mod agents;
mod route;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cleo_config::model::CleoConfig;
use cleo_core::CleoError;
use colored::Colorize;

/// Cleo - delegation routing for a multi-specialist assistant.
#[derive(Parser, Debug)]
#[command(name = "cleo", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide whether a message should be delegated, and to whom.
    Route {
        message: String,
        /// Print the decision as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Score a message's complexity.
    Score {
        message: String,
        /// Print the score as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the known specialist agents.
    Agents,
    /// Launch an interactive routing REPL.
    Shell,
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => cleo_config::load_and_validate_path(path),
        None => cleo_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            cleo_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Route { message, json }) => route::run_route(&config, &message, json).await,
        Some(Commands::Score { message, json }) => route::run_score(&message, json),
        Some(Commands::Agents) => agents::run_agents(&config).await,
        Some(Commands::Shell) => shell::run_shell(config).await,
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("cleo: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn print_config(config: &CleoConfig) -> Result<(), CleoError> {
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &CleoConfig) -> Result<String, CleoError> {
    toml::to_string_pretty(config)
        .map_err(|e| CleoError::Config(format!("failed to render config: {e}")))
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cleo={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
