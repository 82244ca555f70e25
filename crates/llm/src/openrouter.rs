//! OpenRouter Provider
//!
//! OpenAI-compatible chat completions backend. GPT-5 family models are sent
//! with explicit `reasoning`/`text` controls and no temperature; everything
//! else gets the standard low-temperature completion call.

use async_trait::async_trait;
use tracing::{error, warn};

use super::catalog::model_catalog;
use super::family::{call_path, CallPath};
use super::http_client::build_http_client;
use super::openai::{decode_chat_completion, resolve_base_url};
use super::provider::{missing_api_key_error, missing_model_error, parse_http_error, LlmProvider};
use super::types::{
    GenerateOutcome, LlmError, LlmResult, ModelInfo, ProviderConfig, ProviderType,
    PROMPT_PLACEHOLDER, REDACTED_PLACEHOLDER,
};

const OPENROUTER_DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

const COMPLETION_TEMPERATURE: f64 = 0.1;
const REASONING_EFFORT: &str = "medium";
const TEXT_VERBOSITY: &str = "high";

/// OpenRouter provider
pub struct OpenRouterProvider {
    config: ProviderConfig,
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider with the given configuration.
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let api_key = config
            .trimmed_api_key()
            .ok_or_else(|| missing_api_key_error("openrouter"))?
            .to_string();
        if config.model.trim().is_empty() {
            return Err(missing_model_error("openrouter"));
        }

        let base_url = resolve_base_url(config.trimmed_base_url(), OPENROUTER_DEFAULT_BASE_URL)?;

        Ok(Self {
            client: build_http_client(),
            config,
            api_key,
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_body(&self, prompt: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        match call_path(&self.config.model) {
            CallPath::Reasoning => {
                body["reasoning"] = serde_json::json!({ "effort": REASONING_EFFORT });
                body["text"] = serde_json::json!({ "verbosity": TEXT_VERBOSITY });
            }
            CallPath::Completion => {
                body["temperature"] = serde_json::json!(COMPLETION_TEMPERATURE);
            }
        }

        body
    }

    fn debug_record(&self, mut body: serde_json::Value) -> super::types::RequestDebug {
        if let Some(messages) = body.get_mut("messages").and_then(|m| m.as_array_mut()) {
            for message in messages {
                message["content"] = serde_json::json!(PROMPT_PLACEHOLDER);
            }
        }

        super::types::RequestDebug {
            provider: self.name().to_string(),
            model: self.config.model.clone(),
            endpoint: self.endpoint(),
            method: "POST".to_string(),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", REDACTED_PLACEHOLDER),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }

    async fn execute(&self, body: &serde_json::Value) -> LlmResult<String> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(model = %self.config.model, "openrouter chat request failed: {}", e);
                LlmError::NetworkError {
                    message: e.to_string(),
                }
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if !(200..300).contains(&status) {
            error!(
                model = %self.config.model,
                status,
                "openrouter chat returned non-2xx status"
            );
            return Err(parse_http_error(status, &body_text, "openrouter"));
        }

        decode_chat_completion(&body_text, "openrouter")
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn list_models(&self) -> Vec<ModelInfo> {
        model_catalog(ProviderType::OpenRouter)
    }

    async fn generate(&self, prompt: &str) -> GenerateOutcome {
        let body = self.build_body(prompt);
        let debug = self.debug_record(body.clone());
        GenerateOutcome::new(self.execute(&body).await, debug)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
