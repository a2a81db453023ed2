//! Anthropic native provider implementation.
//!
//! Uses Anthropic's Messages API directly:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as top-level field
//!
//! The response body is returned as-is; the parser crate owns unwrapping
//! the `content` blocks into text.

use async_trait::async_trait;
use cinecommand_core::error::ProviderError;
use cinecommand_core::provider::{CompletionRequest, ModelInfo, Provider};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Model used for the key check; cheapest of the known set.
const HEALTH_CHECK_MODEL: &str = "claude-3-sonnet-20240229";

/// Anthropic native Messages API provider.
pub struct AnthropicProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            name: "anthropic".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The Messages API body for one single-turn request.
    pub fn build_body(request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "messages": [{"role": "user", "content": request.prompt}],
        });

        if let Some(ref sys) = request.system {
            body["system"] = serde_json::json!(sys);
        }

        body
    }

    /// The models offered in model pickers.
    pub fn known_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: "claude-3-opus-20240229".into(),
                name: "Claude 3 Opus".into(),
                description: "Most powerful, highest quality".into(),
            },
            ModelInfo {
                id: "claude-3-sonnet-20240229".into(),
                name: "Claude 3 Sonnet".into(),
                description: "Balanced speed & intelligence".into(),
            },
        ]
    }

    fn ensure_key(&self) -> Result<(), ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Missing API key. Set api_key in config.toml or CINECOMMAND_API_KEY".into(),
            ));
        }
        Ok(())
    }

    async fn post(&self, body: &serde_json::Value) -> Result<reqwest::Response, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);
        self.client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<serde_json::Value, ProviderError> {
        self.ensure_key()?;

        let body = Self::build_body(&request);
        debug!(provider = "anthropic", model = %request.model, "Sending completion request");

        let response = self.post(&body).await?;
        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| {
                ProviderError::MalformedResponse(format!("Failed to parse Anthropic response: {e}"))
            })
    }

    async fn list_models(&self) -> std::result::Result<Vec<ModelInfo>, ProviderError> {
        // Anthropic doesn't have a models listing endpoint; return known models
        Ok(Self::known_models())
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        self.ensure_key()?;

        // Try a minimal request to verify API key
        let body = Self::build_body(
            &CompletionRequest::new(HEALTH_CHECK_MODEL, "Hello").with_max_tokens(10),
        );
        let response = self.post(&body).await?;

        match response.status().as_u16() {
            200 => Ok(true),
            401 | 403 => Err(ProviderError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            )),
            status => {
                let error_body = response.text().await.unwrap_or_default();
                warn!(status, "Anthropic health check returned unexpected status");
                Err(ProviderError::ApiError {
                    status_code: status,
                    message: error_body,
                })
            }
        }
    }
}
