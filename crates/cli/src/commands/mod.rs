pub mod config_cmd;
pub mod doctor;
pub mod models;
pub mod normalize;
pub mod parse;
pub mod rules;
pub mod translate;

use cinecommand_config::AppConfig;
use cinecommand_rules::{RuleBook, RuleStore};

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Open the configured rules file. `--no-rules` and `rules.enabled = false`
/// both leave matching off.
pub fn open_rules(config: &AppConfig, no_rules: bool) -> RuleBook {
    let book = RuleBook::open(config.rules_path());
    book.set_enabled(config.rules.enabled && !no_rules);
    book
}
