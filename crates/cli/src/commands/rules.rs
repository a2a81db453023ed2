//! `cinecommand rules` — Rule table inspection.

use super::{load_config, open_rules};
use cinecommand_rules::RuleStore;

pub fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let book = open_rules(&config, false);
    let rules = book.rules();

    println!("📜 Rules ({}) from {}", rules.len(), config.rules_path().display());
    if !config.rules.enabled {
        println!("   ⚠️  Rule matching is disabled in config");
    }
    println!();

    if rules.is_empty() {
        println!("   No rules loaded.");
        return Ok(());
    }

    for (idx, rule) in rules.iter().enumerate() {
        match &rule.description {
            Some(desc) => println!("  {:>3}. \"{}\" — {desc}", idx + 1, rule.prompt_contains),
            None => println!("  {:>3}. \"{}\"", idx + 1, rule.prompt_contains),
        }
        if rule.commands.is_empty() {
            println!("        (no commands)");
        }
        for cmd in &rule.commands {
            println!("        {cmd}");
        }
    }

    Ok(())
}

pub fn test(prompt: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let book = open_rules(&config, false);
    book.set_enabled(true);

    match book.match_prompt(prompt) {
        Some(commands) => {
            eprintln!("  ✅ Rule match");
            println!("{}", serde_json::to_string_pretty(&commands)?);
        }
        None => eprintln!("  ❌ No rule matches; the prompt would go to the LLM"),
    }

    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    println!("{}", config.rules_path().display());
    Ok(())
}
