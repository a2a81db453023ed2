//! `cinecommand config` — Configuration management commands.

use super::load_config;
use cinecommand_config::AppConfig;

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if !config.has_api_key() {
                warnings.push(
                    "No API key set (set CINECOMMAND_API_KEY or ANTHROPIC_API_KEY)".to_string(),
                );
            }

            let rules_path = config.rules_path();
            if config.rules.enabled && !rules_path.exists() {
                warnings.push(format!(
                    "Rules enabled but {} does not exist",
                    rules_path.display()
                ));
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Model:      {}", config.default_model);
            println!("   Max tokens: {}", config.max_tokens);
            println!(
                "   Rules:      {} ({})",
                rules_path.display(),
                if config.rules.enabled { "enabled" } else { "disabled" }
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config()?;
    if config.api_key.is_some() {
        config.api_key = Some("[REDACTED]".into());
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
