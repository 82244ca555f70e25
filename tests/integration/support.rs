//! Shared test fixtures: a scripted mock provider and a sample project tree.

use std::fs::{create_dir_all, write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use promptpack_llm::{
    GenerateOutcome, LlmError, LlmProvider, LlmResult, ModelInfo, ProviderCache, ProviderConfig,
    ProviderType, RequestDebug, PROMPT_PLACEHOLDER, REDACTED_PLACEHOLDER,
};

/// Provider that returns a scripted result and records the prompt it saw.
pub struct MockProvider {
    config: ProviderConfig,
    script: LlmResult<String>,
    pub prompts: std::sync::Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(config: ProviderConfig, script: LlmResult<String>) -> Self {
        Self {
            config,
            script,
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn list_models(&self) -> Vec<ModelInfo> {
        vec![]
    }

    async fn generate(&self, prompt: &str) -> GenerateOutcome {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        GenerateOutcome::new(
            self.script.clone(),
            RequestDebug {
                provider: "mock".to_string(),
                model: self.config.model.clone(),
                endpoint: "mock://generate".to_string(),
                method: "POST".to_string(),
                headers: vec![(
                    "Authorization".to_string(),
                    format!("Bearer {}", REDACTED_PLACEHOLDER),
                )],
                body: serde_json::json!({ "input": PROMPT_PLACEHOLDER }),
            },
        )
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Cache whose factory hands out a shared scripted provider and counts builds.
pub fn scripted_cache(
    provider: Arc<MockProvider>,
) -> (Arc<ProviderCache>, Arc<AtomicUsize>) {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = builds.clone();
    let cache = Arc::new(ProviderCache::with_factory(move |_config| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(provider.clone() as Arc<dyn LlmProvider>)
    }));
    (cache, builds)
}

pub fn provider_config() -> ProviderConfig {
    ProviderConfig {
        provider: ProviderType::OpenAI,
        model: "gpt-5".to_string(),
        api_key: Some("sk-secret-key".to_string()),
        base_url: None,
    }
}

pub fn failing_script(message: &str) -> LlmResult<String> {
    Err(LlmError::ServerError {
        message: message.to_string(),
        status: Some(500),
    })
}

/// A small project directory for resolution tests.
pub fn sample_project() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    create_dir_all(tmp.path().join("src/api")).expect("mkdir");
    create_dir_all(tmp.path().join("docs")).expect("mkdir");
    write(tmp.path().join("src/main.rs"), "fn main() {}").expect("write");
    write(tmp.path().join("src/api/routes.rs"), "").expect("write");
    write(tmp.path().join("docs/guide.md"), "").expect("write");
    write(tmp.path().join("Cargo.toml"), "[package]").expect("write");
    tmp
}
