//! LLM Provider Trait
//!
//! Defines the common interface for all LLM providers and the factory that
//! maps a configuration to a concrete backend.

use std::sync::Arc;

use async_trait::async_trait;

use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::openrouter::OpenRouterProvider;
use super::types::{GenerateOutcome, LlmError, LlmResult, ModelInfo, ProviderConfig, ProviderType};

/// Trait that all LLM providers must implement.
///
/// Provides a unified interface for:
/// - Listing the static model catalog (no network call)
/// - Executing a single prompt (`generate`)
///
/// `generate` is the only operation that touches the network. The returned
/// future is cancel-safe: dropping it aborts the underlying HTTP request.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Returns the static, vendor-curated model catalog for this provider.
    fn list_models(&self) -> Vec<ModelInfo>;

    /// Execute the prompt with the configured model.
    ///
    /// Every call, success or failure, produces a sanitized debug record of
    /// the outbound request (no API key, no raw prompt) alongside the result.
    async fn generate(&self, prompt: &str) -> GenerateOutcome;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Build a provider implementation for the given configuration.
///
/// Construction validates the configuration up front (non-empty API key,
/// model where required) and fails before any network setup.
pub fn build_provider(config: &ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
    match config.provider {
        ProviderType::OpenAI => Ok(Arc::new(OpenAIProvider::new(config.clone())?)),
        ProviderType::OpenRouter => Ok(Arc::new(OpenRouterProvider::new(config.clone())?)),
        ProviderType::Gemini => Ok(Arc::new(GeminiProvider::new(config.clone())?)),
    }
}

/// Helper function to create an error for a missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("{} provider requires an API key", provider),
    }
}

/// Helper function to create an error for a missing model name
pub fn missing_model_error(provider: &str) -> LlmError {
    LlmError::InvalidRequest {
        message: format!("{} provider requires a model", provider),
    }
}

/// Map a non-success HTTP status to a typed error. The body is truncated so
/// vendor error pages cannot blow up logs.
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    let snippet: String = body.chars().take(4096).collect();
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: access denied", provider),
        },
        400 => LlmError::InvalidRequest {
            message: format!("{}: {}", provider, snippet),
        },
        _ => LlmError::ServerError {
            message: format!("{}: {}", provider, snippet),
            status: Some(status),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_error() {
        let err = missing_api_key_error("openai");
        match err {
            LlmError::AuthenticationFailed { message } => {
                assert!(message.contains("openai"));
            }
            _ => panic!("Expected AuthenticationFailed"),
        }
    }

    #[test]
    fn test_parse_http_error() {
        let err = parse_http_error(401, "unauthorized", "openai");
        assert!(matches!(err, LlmError::AuthenticationFailed { .. }));

        let err = parse_http_error(400, "bad request", "openrouter");
        assert!(matches!(err, LlmError::InvalidRequest { .. }));

        let err = parse_http_error(500, "internal error", "gemini");
        assert!(matches!(err, LlmError::ServerError { status: Some(500), .. }));
    }

    #[test]
    fn test_factory_rejects_missing_key() {
        let config = ProviderConfig::new(ProviderType::OpenAI, "gpt-5");
        assert!(matches!(
            build_provider(&config),
            Err(LlmError::AuthenticationFailed { .. })
        ));
    }

    #[test]
    fn test_factory_rejects_missing_model() {
        let mut config = ProviderConfig::new(ProviderType::OpenRouter, "");
        config.api_key = Some("sk-test".to_string());
        assert!(matches!(
            build_provider(&config),
            Err(LlmError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_factory_builds_each_provider() {
        for (provider, model) in [
            (ProviderType::OpenAI, "gpt-4o"),
            (ProviderType::OpenRouter, "openai/gpt-5"),
            (ProviderType::Gemini, "gemini-2.5-pro"),
        ] {
            let mut config = ProviderConfig::new(provider, model);
            config.api_key = Some("sk-test".to_string());
            let built = build_provider(&config).unwrap();
            assert_eq!(built.name(), provider.to_string());
        }
    }
}
