//! LLM Provider implementations for CineCommand.
//!
//! All providers implement the `cinecommand_core::Provider` trait.

pub mod anthropic;

pub use anthropic::AnthropicProvider;

use cinecommand_core::Provider;
use std::sync::Arc;

/// Build the completion provider from configuration.
///
/// A missing API key still yields a provider; its calls fail with
/// `NotConfigured`, which the translator reports as an error envelope.
pub fn build_from_config(config: &cinecommand_config::AppConfig) -> Arc<dyn Provider> {
    let api_key = config.api_key.clone().unwrap_or_default();

    let mut provider = AnthropicProvider::new(api_key);
    if let Some(ref url) = config.anthropic.api_url {
        provider = provider.with_base_url(url);
    }

    Arc::new(provider)
}
