//! LLM Settings Service
//!
//! Mutates the persisted LLM settings and keeps the provider cache honest:
//! every change that could affect which provider instance should serve the
//! next request invalidates the cache.

use std::sync::{Arc, Mutex};

use tracing::info;

use promptpack_llm::{model_catalog, ModelInfo, ProviderCache, ProviderType};

use crate::models::settings::LlmSettings;
use crate::storage::ConfigService;
use crate::utils::error::{AppError, AppResult};

/// Service over the persisted LLM settings.
pub struct LlmSettingsService {
    config: Mutex<ConfigService>,
    cache: Arc<ProviderCache>,
}

impl LlmSettingsService {
    pub fn new(config: ConfigService, cache: Arc<ProviderCache>) -> Self {
        Self {
            config: Mutex::new(config),
            cache,
        }
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> AppResult<LlmSettings> {
        let config = self.lock()?;
        Ok(config.get_config().llm.clone())
    }

    /// Whether the active provider has a usable API key.
    pub fn has_active_key(&self) -> AppResult<bool> {
        Ok(self.settings()?.has_active_key())
    }

    /// Curated model list for a provider. No network call involved.
    pub fn list_models(&self, provider: ProviderType) -> Vec<ModelInfo> {
        model_catalog(provider)
    }

    /// Store an API key for a provider.
    pub fn set_api_key(&self, provider: ProviderType, key: &str) -> AppResult<()> {
        self.mutate(|settings| {
            let slot = match provider {
                ProviderType::OpenAI => &mut settings.openai_key,
                ProviderType::OpenRouter => &mut settings.openrouter_key,
                ProviderType::Gemini => &mut settings.gemini_key,
            };
            *slot = key.trim().to_string();
            Ok(())
        })
    }

    /// Switch the active provider. The provider must already have a key.
    /// An explicitly chosen model is kept; only a blank model picks up the
    /// provider default.
    pub fn set_provider(&self, provider: ProviderType) -> AppResult<()> {
        self.mutate(|settings| {
            if settings.key_for_provider(provider).is_none() {
                return Err(AppError::validation(format!(
                    "set API key for {} before activating it",
                    provider
                )));
            }
            settings.active_provider = provider.to_string();
            info!(provider = %provider, "active LLM provider changed");
            Ok(())
        })
    }

    /// Deactivate the current provider: clears the active provider and model
    /// and drops the cached provider instance.
    pub fn clear_provider(&self) -> AppResult<()> {
        self.mutate(|settings| {
            settings.active_provider = String::new();
            settings.model = String::new();
            info!("active LLM provider cleared");
            Ok(())
        })
    }

    /// Set the model for the active provider.
    pub fn set_model(&self, model: &str) -> AppResult<()> {
        self.mutate(|settings| {
            settings.model = model.trim().to_string();
            Ok(())
        })
    }

    /// Set or clear the base URL override.
    pub fn set_base_url(&self, base_url: &str) -> AppResult<()> {
        self.mutate(|settings| {
            settings.base_url = base_url.trim().to_string();
            Ok(())
        })
    }

    fn mutate(&self, apply: impl FnOnce(&mut LlmSettings) -> AppResult<()>) -> AppResult<()> {
        let mut config = self.lock()?;
        apply(&mut config.get_config_mut().llm)?;
        config.get_config_mut().llm.normalize();
        config.save()?;
        self.cache.invalidate();
        Ok(())
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, ConfigService>> {
        self.config
            .lock()
            .map_err(|_| AppError::internal("settings lock poisoned"))
    }
}
