//! Direct prompt execution tests.

use std::sync::Arc;

use promptpack_llm::ProviderType;

use promptpack_desktop::{
    AppError, ConfigService, HistoryService, LlmSettingsService, PromptRunner,
};

use crate::support::{failing_script, provider_config, scripted_cache, MockProvider};

fn runner_with(
    script: promptpack_llm::LlmResult<String>,
    tmp: &tempfile::TempDir,
) -> (PromptRunner, Arc<HistoryService>) {
    let provider = Arc::new(MockProvider::new(provider_config(), script));
    let (cache, _builds) = scripted_cache(provider);

    let config = ConfigService::at_path(tmp.path().join("config.json")).unwrap();
    let settings = Arc::new(LlmSettingsService::new(config, cache.clone()));
    settings
        .set_api_key(ProviderType::OpenAI, "sk-secret-key")
        .unwrap();
    settings.set_provider(ProviderType::OpenAI).unwrap();

    let history = Arc::new(HistoryService::at_path(tmp.path().join("history.json")).unwrap());
    (
        PromptRunner::new(settings, cache, history.clone()),
        history,
    )
}

#[tokio::test]
async fn test_run_prompt_records_and_returns_item() {
    let tmp = tempfile::tempdir().unwrap();
    let (runner, history) = runner_with(Ok("the answer".to_string()), &tmp);

    let item = runner.run_prompt("summarize", "full prompt text").await.unwrap();
    assert_eq!(item.user_task, "summarize");
    assert_eq!(item.response, "the answer");
    assert!(!item.api_call.as_deref().unwrap().contains("sk-secret-key"));

    let items = history.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, item.id);
}

#[tokio::test]
async fn test_run_prompt_failure_is_recorded_then_surfaced() {
    let tmp = tempfile::tempdir().unwrap();
    let (runner, history) = runner_with(failing_script("quota exceeded"), &tmp);

    let err = runner.run_prompt("summarize", "full prompt text").await.unwrap_err();
    assert!(matches!(err, AppError::Llm(_)));

    let items = history.items();
    assert_eq!(items.len(), 1);
    assert!(items[0]
        .response
        .starts_with("ERROR during prompt execution:"));
    assert!(items[0].response.contains("quota exceeded"));
}

#[tokio::test]
async fn test_run_prompt_requires_active_provider() {
    let tmp = tempfile::tempdir().unwrap();
    let provider = Arc::new(MockProvider::new(
        provider_config(),
        Ok("unused".to_string()),
    ));
    let (cache, _builds) = scripted_cache(provider);

    let config = ConfigService::at_path(tmp.path().join("config.json")).unwrap();
    let settings = Arc::new(LlmSettingsService::new(config, cache.clone()));
    let history = Arc::new(HistoryService::at_path(tmp.path().join("history.json")).unwrap());
    let runner = PromptRunner::new(settings, cache, history.clone());

    let err = runner.run_prompt("task", "prompt").await.unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(history.items().is_empty());
}
