//! Prompt translation: rule lookup first, the LLM otherwise.

use crate::system_prompt::SYSTEM_PROMPT;
use cinecommand_core::provider::{CompletionRequest, Provider};
use cinecommand_core::ParseResult;
use cinecommand_parser::{extract_text, parse_completion};
use cinecommand_rules::{LoadOutcome, RuleStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Turns a natural-language prompt into scene commands.
///
/// Holds no per-prompt state; one instance can serve prompts from several
/// tasks behind an `Arc`.
pub struct Translator {
    provider: Arc<dyn Provider>,
    rules: Arc<dyn RuleStore>,
    model: String,
    max_tokens: u32,
    system_prompt: String,
}

impl Translator {
    pub fn new(provider: Arc<dyn Provider>, rules: Arc<dyn RuleStore>) -> Self {
        Self {
            provider,
            rules,
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: SYSTEM_PROMPT.into(),
        }
    }

    /// Model, token limit and prompt override taken from configuration.
    pub fn from_config(
        config: &cinecommand_config::AppConfig,
        provider: Arc<dyn Provider>,
        rules: Arc<dyn RuleStore>,
    ) -> Self {
        let mut translator = Self::new(provider, rules)
            .with_model(&config.default_model)
            .with_max_tokens(config.max_tokens);
        if let Some(ref prompt) = config.system_prompt_override {
            translator = translator.with_system_prompt(prompt);
        }
        translator
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn rules(&self) -> &Arc<dyn RuleStore> {
        &self.rules
    }

    /// Re-read the rule source.
    pub fn reload_rules(&self) -> Result<LoadOutcome, cinecommand_core::Error> {
        Ok(self.rules.reload()?)
    }

    /// Translate one prompt.
    ///
    /// Never fails: provider errors come back as an `error` result.
    pub async fn process_prompt(&self, prompt: &str) -> ParseResult {
        if let Some(commands) = self.rules.match_prompt(prompt) {
            if commands.is_empty() {
                warn!(prompt = %prompt, "Matched rule has no commands, skipping the LLM anyway");
            }
            return ParseResult::rule(commands);
        }

        let request = CompletionRequest::new(&self.model, prompt)
            .with_system(&self.system_prompt)
            .with_max_tokens(self.max_tokens);

        info!(
            provider = self.provider.name(),
            model = %self.model,
            "Requesting completion"
        );

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Completion failed");
                return ParseResult::error(e);
            }
        };

        let completion = extract_text(&response);
        debug!(chars = completion.len(), "Completion received");

        let commands = parse_completion(&completion);

        ParseResult::ai(completion, commands)
    }
}
