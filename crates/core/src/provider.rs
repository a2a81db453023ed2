//! Provider trait — the abstraction over the LLM completion endpoint.
//!
//! A Provider sends one prompt (plus system prompt) to an LLM and hands back
//! the provider's raw JSON response. Unwrapping that envelope into text is
//! the parser's job, not the provider's, so a mock only has to return a
//! `serde_json::Value`.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "claude-3-opus-20240229")
    pub model: String,

    /// The user's prompt, sent as the only user message
    pub prompt: String,

    /// System prompt, sent as a top-level field when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 {
    1000
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            max_tokens: default_max_tokens(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A model the provider can serve, as shown in model pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// The core Provider trait.
///
/// The translator calls `complete()` without knowing which backend is
/// behind it; tests inject scripted implementations.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send a request and get the raw response body.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<serde_json::Value, ProviderError>;

    /// List the models this provider offers.
    async fn list_models(&self) -> std::result::Result<Vec<ModelInfo>, ProviderError> {
        Ok(Vec::new())
    }

    /// Check that the provider is reachable and the credentials are accepted.
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
