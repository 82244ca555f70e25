//! Prompt Execution
//!
//! Runs an already-assembled prompt against the active provider and records
//! the execution, success or failure, in the prompt history. This is the
//! entry point for direct prompt runs that do not go through the
//! auto-context pipeline.

use std::sync::Arc;

use tracing::info;

use promptpack_llm::ProviderCache;

use crate::models::history::PromptHistoryItem;
use crate::services::history::HistoryService;
use crate::services::settings::LlmSettingsService;
use crate::utils::error::AppResult;

/// Executes prompts with the currently configured provider.
pub struct PromptRunner {
    settings: Arc<LlmSettingsService>,
    cache: Arc<ProviderCache>,
    history: Arc<HistoryService>,
}

impl PromptRunner {
    pub fn new(
        settings: Arc<LlmSettingsService>,
        cache: Arc<ProviderCache>,
        history: Arc<HistoryService>,
    ) -> Self {
        Self {
            settings,
            cache,
            history,
        }
    }

    /// Execute `prompt` with the active provider. The returned history item
    /// is also recorded; a generate failure is recorded too, then surfaced.
    pub async fn run_prompt(&self, task: &str, prompt: &str) -> AppResult<PromptHistoryItem> {
        let config = self.settings.settings()?.provider_config()?;
        let provider = self.cache.get_or_build(&config)?;
        info!(
            provider = provider.name(),
            model = provider.model(),
            "executing prompt"
        );

        let outcome = provider.generate(prompt).await;
        let response = match &outcome.result {
            Ok(text) => text.clone(),
            Err(err) => format!("ERROR during prompt execution: {}", err),
        };
        let item = PromptHistoryItem::new(
            task,
            prompt,
            response,
            Some(outcome.debug.to_pretty_json()),
        );
        self.history.add_item(item.clone());

        outcome.result?;
        Ok(item)
    }
}
