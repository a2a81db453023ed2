//! `cinecommand translate` — Single-prompt or interactive translation.

use super::{load_config, open_rules};
use cinecommand_agent::{SessionLog, Translator};
use cinecommand_config::AppConfig;
use cinecommand_core::ParseResult;
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

pub async fn run(message: Option<String>, no_rules: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    if !config.has_api_key() {
        eprintln!();
        eprintln!("  WARNING: No API key configured. Only rule matches will succeed.");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    CINECOMMAND_API_KEY = 'sk-ant-...'");
        eprintln!("    ANTHROPIC_API_KEY   = 'sk-ant-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
    }

    let provider = cinecommand_providers::build_from_config(&config);
    let rules = Arc::new(open_rules(&config, no_rules));
    let translator = Translator::from_config(&config, provider, rules);

    if let Some(prompt) = message {
        let result = translator.process_prompt(&prompt).await;
        print_result(&result)?;
        if result.is_error() {
            return Err("Translation failed".into());
        }
        return Ok(());
    }

    // Interactive mode; the banner goes to stderr so stdout stays JSON
    eprintln!();
    eprintln!("  ╔══════════════════════════════════════════════╗");
    eprintln!("  ║     CineCommand — Interactive Translation     ║");
    eprintln!("  ╚══════════════════════════════════════════════╝");
    eprintln!();
    eprintln!("  Model:     {}", translator.model());
    eprintln!(
        "  Rules:     {} loaded ({})",
        translator.rules().len(),
        if translator.rules().is_enabled() { "enabled" } else { "disabled" }
    );
    eprintln!();
    eprintln!("  Type a prompt and press Enter.");
    eprintln!("  Type 'reload' to re-read the rules file, 'exit' to quit.");
    eprintln!();

    let mut session = SessionLog::new();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprint!("  You > ");
        std::io::stderr().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let prompt = line.trim();

        match prompt {
            "" => continue,
            "exit" | "quit" => break,
            "reload" => {
                match translator.reload_rules() {
                    Ok(outcome) => eprintln!(
                        "  Reloaded {} rule(s), skipped {}",
                        outcome.loaded, outcome.skipped
                    ),
                    Err(e) => eprintln!("  [Error] {e}"),
                }
                continue;
            }
            _ => {}
        }

        let result = translator.process_prompt(prompt).await;
        session.record(prompt, &result);
        print_result(&result)?;
    }

    session.end();
    let summary = session.summary();
    eprintln!();
    eprintln!(
        "  Session: {} prompt(s), {} rule hit(s), {} AI response(s), {} error(s), {} command(s)",
        summary.prompts, summary.rule_hits, summary.ai_responses, summary.errors, summary.commands
    );
    eprintln!("  Goodbye! 👋");
    eprintln!();

    Ok(())
}

fn print_result(result: &ParseResult) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
