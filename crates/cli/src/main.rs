//! CineCommand CLI — the main entry point.
//!
//! Commands:
//! - `translate` — Prompt to commands, once or interactively
//! - `parse`     — Extract commands from completion text, offline
//! - `normalize` — Normalize a call-style command line
//! - `rules`     — Inspect and test the rule table
//! - `models`    — List available models
//! - `config`    — Show, locate or validate the configuration
//! - `doctor`    — Diagnose setup

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "cinecommand",
    about = "CineCommand — natural-language prompts to Cinema 4D scene commands",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Skip rule matching for this run
    #[arg(long, global = true)]
    no_rules: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a prompt into scene commands
    Translate {
        /// Translate a single prompt instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Extract and normalize commands from completion text (no LLM call)
    Parse {
        /// Read from this file instead of stdin
        file: Option<PathBuf>,

        /// Input is a raw Messages API response body
        #[arg(long)]
        response: bool,
    },

    /// Normalize a call-style command, e.g. "AddCube(size=100)"
    Normalize {
        call: String,
    },

    /// Inspect the rule table
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// List available models
    Models,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose setup
    Doctor,
}

#[derive(Subcommand)]
enum RulesAction {
    /// List loaded rules in match order
    List,
    /// Show which rule, if any, answers a prompt
    Test { prompt: String },
    /// Print the rules file path
    Path,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (key redacted)
    Show,
    /// Print the config file path
    Path,
    /// Validate the configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Translate { message } => commands::translate::run(message, cli.no_rules).await?,
        Commands::Parse { file, response } => commands::parse::run(file, response).await?,
        Commands::Normalize { call } => commands::normalize::run(&call)?,
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list()?,
            RulesAction::Test { prompt } => commands::rules::test(&prompt)?,
            RulesAction::Path => commands::rules::path()?,
        },
        Commands::Models => commands::models::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path()?,
            ConfigAction::Validate => commands::config_cmd::validate()?,
        },
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
