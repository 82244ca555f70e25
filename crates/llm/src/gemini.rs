//! Gemini Provider
//!
//! Google Gemini backend via the `generateContent` REST API, single user
//! prompt with a low fixed temperature.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, warn};

use super::catalog::model_catalog;
use super::http_client::build_http_client;
use super::openai::resolve_base_url;
use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    GenerateOutcome, LlmError, LlmResult, ModelInfo, ProviderConfig, ProviderType,
    PROMPT_PLACEHOLDER, REDACTED_PLACEHOLDER,
};

const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when the configuration leaves the model blank.
const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";

const COMPLETION_TEMPERATURE: f64 = 0.1;

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration.
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let api_key = config
            .trimmed_api_key()
            .ok_or_else(|| missing_api_key_error("gemini"))?
            .to_string();

        let model = match config.model.trim() {
            "" => GEMINI_DEFAULT_MODEL.to_string(),
            m => m.to_string(),
        };

        let base_url = resolve_base_url(config.trimmed_base_url(), GEMINI_DEFAULT_BASE_URL)?;

        Ok(Self {
            client: build_http_client(),
            config,
            api_key,
            base_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": { "temperature": COMPLETION_TEMPERATURE },
        })
    }

    fn debug_record(&self, mut body: serde_json::Value) -> super::types::RequestDebug {
        if let Some(contents) = body.get_mut("contents").and_then(|c| c.as_array_mut()) {
            for content in contents {
                content["parts"] = serde_json::json!([{ "text": PROMPT_PLACEHOLDER }]);
            }
        }

        super::types::RequestDebug {
            provider: self.name().to_string(),
            model: self.model.clone(),
            endpoint: self.endpoint(),
            method: "POST".to_string(),
            headers: vec![
                ("x-goog-api-key".to_string(), REDACTED_PLACEHOLDER.to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }

    async fn execute(&self, body: &serde_json::Value) -> LlmResult<String> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(model = %self.model, "gemini request failed: {}", e);
                LlmError::NetworkError {
                    message: e.to_string(),
                }
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if !(200..300).contains(&status) {
            error!(model = %self.model, status, "gemini API returned non-2xx status");
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        decode_generate_content(&body_text)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn list_models(&self) -> Vec<ModelInfo> {
        model_catalog(ProviderType::Gemini)
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

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

fn decode_generate_content(body: &str) -> LlmResult<String> {
    let decoded: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError {
            message: format!("failed to decode gemini payload: {}", e),
        })?;

    let text: String = decoded
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(LlmError::EmptyOutput {
            message: "gemini response did not contain text output".to_string(),
        });
    }
    Ok(text)
}
