//! `cinecommand doctor` — Diagnose setup.

use cinecommand_config::{AppConfig, ConfigError};
use cinecommand_rules::{RuleBook, RuleStore};
use std::path::Path;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 CineCommand Doctor — Setup Diagnostics");
    println!("=========================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let (config, load_error) = load_with_env(&config_path, |key| std::env::var(key).ok());
    if !config_path.exists() {
        println!("  ⚠️  No config file at {}, using defaults", config_path.display());
    } else if let Some(e) = load_error {
        println!("  ❌ Config file invalid: {e}");
        issues += 1;
    } else {
        println!("  ✅ Config file valid");
    }

    // Check rules
    let rules_path = config.rules_path();
    let book = RuleBook::new(&rules_path);
    match book.reload() {
        Ok(outcome) if outcome.found => {
            println!(
                "  ✅ Rules file found: {} rule(s), {} skipped",
                outcome.loaded, outcome.skipped
            );
            if outcome.skipped > 0 {
                issues += 1;
            }
        }
        Ok(_) => println!("  ⚠️  No rules file at {}", rules_path.display()),
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    // Check API key
    if config.has_api_key() {
        println!("  ✅ API key configured");

        let provider = cinecommand_providers::build_from_config(&config);
        match provider.health_check().await {
            Ok(true) => println!("  ✅ API key accepted by {}", provider.name()),
            Ok(false) => {
                println!("  ⚠️  {} reachable but returned an error", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ API check failed: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ❌ No API key configured — add api_key to config.toml");
        issues += 1;
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

/// Config to run the checks with. Falls back to defaults when the file is
/// broken; environment overrides apply either way.
fn load_with_env(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> (AppConfig, Option<ConfigError>) {
    let (mut config, error) = match AppConfig::load_from(path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    config.apply_env(lookup);
    (config, error)
}
