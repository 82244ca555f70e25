//! Settings Models
//!
//! LLM settings (active provider, model, per-provider keys) and the
//! application configuration wrapper persisted by the storage layer.
//! JSON field names keep the `activeProvider`/`openAIKey` style the settings
//! file has always used.

use serde::{Deserialize, Serialize};
use tracing::warn;

use promptpack_llm::{ProviderConfig, ProviderType};

use crate::utils::error::{AppError, AppResult};

/// LLM provider settings. All fields are stored trimmed; empty string means
/// unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,
    pub model: String,
    #[serde(rename = "openAIKey")]
    pub openai_key: String,
    #[serde(rename = "openRouterKey")]
    pub openrouter_key: String,
    #[serde(rename = "geminiKey")]
    pub gemini_key: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
}

/// Default model used when a provider is activated without an explicit model.
pub fn default_model_for_provider(provider: ProviderType) -> &'static str {
    match provider {
        ProviderType::OpenAI => "gpt-5",
        ProviderType::OpenRouter => "openai/gpt-5",
        ProviderType::Gemini => "gemini-2.5-pro",
    }
}

impl LlmSettings {
    /// The active provider, if one is configured and recognized.
    pub fn active_provider(&self) -> Option<ProviderType> {
        ProviderType::parse(&self.active_provider).ok()
    }

    /// The stored API key for a provider, trimmed; `None` when blank.
    pub fn key_for_provider(&self, provider: ProviderType) -> Option<&str> {
        let key = match provider {
            ProviderType::OpenAI => self.openai_key.trim(),
            ProviderType::OpenRouter => self.openrouter_key.trim(),
            ProviderType::Gemini => self.gemini_key.trim(),
        };
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// Whether an active provider with a usable key is configured.
    pub fn has_active_key(&self) -> bool {
        self.active_provider()
            .and_then(|p| self.key_for_provider(p))
            .is_some()
    }

    /// Trim every field, drop unrecognized provider names, deactivate a
    /// provider that has no key, and fill in the default model.
    pub fn normalize(&mut self) {
        self.model = self.model.trim().to_string();
        self.base_url = self.base_url.trim().to_string();
        self.openai_key = self.openai_key.trim().to_string();
        self.openrouter_key = self.openrouter_key.trim().to_string();
        self.gemini_key = self.gemini_key.trim().to_string();

        self.active_provider = match self.active_provider() {
            Some(provider) => provider.to_string(),
            None => String::new(),
        };

        if let Some(provider) = self.active_provider() {
            if self.key_for_provider(provider).is_none() {
                warn!("Active LLM provider is missing an API key; disabling auto-context.");
                self.active_provider = String::new();
                self.model = String::new();
            } else if self.model.is_empty() {
                self.model = default_model_for_provider(provider).to_string();
            }
        }
    }

    /// Build the provider configuration for the active provider, falling back
    /// to the provider's default model when none is set.
    pub fn provider_config(&self) -> AppResult<ProviderConfig> {
        let provider = self
            .active_provider()
            .ok_or_else(|| AppError::config("no active LLM provider configured"))?;
        let api_key = self
            .key_for_provider(provider)
            .ok_or_else(|| AppError::config("active LLM provider has no API key"))?;

        let model = match self.model.trim() {
            "" => default_model_for_provider(provider).to_string(),
            m => m.to_string(),
        };

        Ok(ProviderConfig {
            provider,
            model,
            api_key: Some(api_key.to_string()),
            base_url: match self.base_url.trim() {
                "" => None,
                url => Some(url.to_string()),
            },
        })
    }
}

/// Application configuration persisted as `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmSettings,
}

impl AppConfig {
    /// Validate the configuration before it is saved or after it is loaded.
    pub fn validate(&self) -> Result<(), String> {
        let provider = self.llm.active_provider.trim();
        if !provider.is_empty() && ProviderType::parse(provider).is_err() {
            return Err(format!("unknown LLM provider: {}", provider));
        }
        Ok(())
    }
}
