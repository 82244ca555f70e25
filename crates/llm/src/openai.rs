//! OpenAI Provider
//!
//! Implementation of the LlmProvider trait for OpenAI's API. Non-reasoning
//! models go through chat completions with a low fixed temperature; GPT-5
//! family models go through the Responses API with explicit reasoning
//! controls and no sampling parameters.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, warn};

use super::catalog::model_catalog;
use super::family::{call_path, CallPath};
use super::http_client::build_http_client;
use super::provider::{missing_api_key_error, missing_model_error, parse_http_error, LlmProvider};
use super::types::{
    GenerateOutcome, LlmError, LlmResult, ModelInfo, ProviderConfig, ProviderType,
    PROMPT_PLACEHOLDER, REDACTED_PLACEHOLDER,
};

/// Official default for OpenAI HTTP APIs.
const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Fixed sampling temperature for standard completion calls.
const COMPLETION_TEMPERATURE: f64 = 0.1;

/// Fixed controls for the Responses API. The GPT-5 family rejects or ignores
/// temperature/top_p, so those are never sent on this path.
const REASONING_EFFORT: &str = "medium";
const TEXT_VERBOSITY: &str = "high";
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// OpenAI provider
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given configuration.
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let api_key = config
            .trimmed_api_key()
            .ok_or_else(|| missing_api_key_error("openai"))?
            .to_string();
        if config.model.trim().is_empty() {
            return Err(missing_model_error("openai"));
        }

        let base_url = resolve_base_url(config.trimmed_base_url(), OPENAI_DEFAULT_BASE_URL)?;

        Ok(Self {
            client: build_http_client(),
            config,
            api_key,
            base_url,
        })
    }

    fn completions_endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn responses_endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    fn build_completion_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": COMPLETION_TEMPERATURE,
        })
    }

    fn build_reasoning_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "input": prompt,
            "reasoning": { "effort": REASONING_EFFORT },
            "text": { "verbosity": TEXT_VERBOSITY },
            "max_output_tokens": MAX_OUTPUT_TOKENS,
        })
    }

    /// Build the sanitized debug record for a call. The prompt-bearing field
    /// is replaced before the record exists, so the raw prompt never lands in
    /// a debug representation.
    fn debug_record(
        &self,
        endpoint: &str,
        mut body: serde_json::Value,
        extra_headers: &[(&str, &str)],
    ) -> super::types::RequestDebug {
        if body.get("input").is_some() {
            body["input"] = serde_json::json!(PROMPT_PLACEHOLDER);
        }
        if let Some(messages) = body.get_mut("messages").and_then(|m| m.as_array_mut()) {
            for message in messages {
                message["content"] = serde_json::json!(PROMPT_PLACEHOLDER);
            }
        }

        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", REDACTED_PLACEHOLDER),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        for (name, value) in extra_headers {
            headers.push((name.to_string(), value.to_string()));
        }

        super::types::RequestDebug {
            provider: self.name().to_string(),
            model: self.config.model.clone(),
            endpoint: endpoint.to_string(),
            method: "POST".to_string(),
            headers,
            body,
        }
    }

    async fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
        extra_headers: &[(&str, &str)],
    ) -> LlmResult<String> {
        let mut request = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }

        let response = request.json(body).send().await.map_err(|e| {
            warn!(model = %self.config.model, "openai request failed: {}", e);
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
                "openai API returned non-2xx status"
            );
            return Err(parse_http_error(status, &body_text, "openai"));
        }

        Ok(body_text)
    }

    async fn generate_via_completions(&self, prompt: &str) -> LlmResult<String> {
        let body = self.build_completion_body(prompt);
        let response = self.post_json(&self.completions_endpoint(), &body, &[]).await?;
        decode_chat_completion(&response, "openai")
    }

    async fn generate_via_responses_api(&self, prompt: &str) -> LlmResult<String> {
        let body = self.build_reasoning_body(prompt);
        let response = self
            .post_json(&self.responses_endpoint(), &body, RESPONSES_HEADERS)
            .await?;
        decode_responses_output(&response)
    }
}

/// The Responses API may expect an explicit beta header; sending it is safe
/// and explicit.
const RESPONSES_HEADERS: &[(&str, &str)] = &[("OpenAI-Beta", "responses=v1")];

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn list_models(&self) -> Vec<ModelInfo> {
        model_catalog(ProviderType::OpenAI)
    }

    async fn generate(&self, prompt: &str) -> GenerateOutcome {
        match call_path(&self.config.model) {
            CallPath::Reasoning => {
                let debug = self.debug_record(
                    &self.responses_endpoint(),
                    self.build_reasoning_body(prompt),
                    RESPONSES_HEADERS,
                );
                GenerateOutcome::new(self.generate_via_responses_api(prompt).await, debug)
            }
            CallPath::Completion => {
                let debug = self.debug_record(
                    &self.completions_endpoint(),
                    self.build_completion_body(prompt),
                    &[],
                );
                GenerateOutcome::new(self.generate_via_completions(prompt).await, debug)
            }
        }
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Resolve and validate the effective base URL, trailing slash stripped.
pub(crate) fn resolve_base_url(configured: Option<&str>, default: &str) -> LlmResult<String> {
    let base = configured.unwrap_or(default);
    url::Url::parse(base).map_err(|e| LlmError::InvalidRequest {
        message: format!("invalid base URL {}: {}", base, e),
    })?;
    Ok(base.trim_end_matches('/').to_string())
}

/// Chat completions response format (shared with OpenRouter).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Decode a chat completions body into non-empty text output.
pub(crate) fn decode_chat_completion(body: &str, provider: &str) -> LlmResult<String> {
    let decoded: ChatResponse = serde_json::from_str(body).map_err(|e| LlmError::ParseError {
        message: format!("failed to decode {} chat payload: {}", provider, e),
    })?;

    let choice = decoded
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::EmptyOutput {
            message: format!("{} chat response did not contain any choices", provider),
        })?;

    let text = choice.message.content.unwrap_or_default().trim().to_string();
    if text.is_empty() {
        return Err(LlmError::EmptyOutput {
            message: format!("{} chat response did not contain text output", provider),
        });
    }
    Ok(text)
}

// Responses API decoding.
//
// Two observed output shapes, tried in order:
//   1. flat: `output: [{"output_text": {"text": "..."}}]`
//   2. nested: `output: [{"type": "message", "content": [{"text": "..."}]}]`

#[derive(Debug, Deserialize)]
struct FlatResponse {
    #[serde(default)]
    output: Vec<FlatItem>,
}

#[derive(Debug, Deserialize)]
struct FlatItem {
    #[serde(default)]
    output_text: Option<TextBlock>,
}

#[derive(Debug, Deserialize)]
struct TextBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct NestedResponse {
    #[serde(default)]
    output: Vec<NestedItem>,
}

#[derive(Debug, Deserialize)]
struct NestedItem {
    #[serde(default)]
    content: Vec<TextBlock>,
}

/// Matcher for the flat shape: first non-empty `output_text.text`.
fn match_flat_output(body: &str) -> Option<String> {
    let decoded: FlatResponse = serde_json::from_str(body).ok()?;
    decoded
        .output
        .into_iter()
        .filter_map(|item| item.output_text)
        .map(|block| block.text.trim().to_string())
        .find(|text| !text.is_empty())
}

/// Matcher for the nested message shape: first non-empty content text.
fn match_nested_output(body: &str) -> Option<String> {
    let decoded: NestedResponse = serde_json::from_str(body).ok()?;
    decoded
        .output
        .into_iter()
        .flat_map(|item| item.content)
        .map(|block| block.text.trim().to_string())
        .find(|text| !text.is_empty())
}

/// Decode a Responses API body, trying each shape matcher in order.
pub(crate) fn decode_responses_output(body: &str) -> LlmResult<String> {
    // Reject outright garbage before shape matching so the caller sees a
    // parse failure rather than "no output".
    serde_json::from_str::<serde_json::Value>(body).map_err(|e| LlmError::ParseError {
        message: format!("failed to decode openai responses payload: {}", e),
    })?;

    if let Some(text) = match_flat_output(body) {
        return Ok(text);
    }
    if let Some(text) = match_nested_output(body) {
        return Ok(text);
    }

    Err(LlmError::EmptyOutput {
        message: "openai responses API response did not contain text output".to_string(),
    })
}
