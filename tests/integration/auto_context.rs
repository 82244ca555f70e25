//! End-to-end auto-context pipeline tests.

use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use promptpack_desktop::services::context::prompt::{PromptTemplate, FORMAT_INSTRUCTIONS};
use promptpack_desktop::{AppError, AutoContextRequest, AutoContextService, HistoryService};

use crate::support::{failing_script, provider_config, sample_project, scripted_cache, MockProvider};

const TEMPLATE: &str =
    "Tree:\n{FILE_TREE}\nTask: {USER_TASK}\nUnderstanding: {CURRENT_UNDERSTANDING}";

fn request(root: &std::path::Path) -> AutoContextRequest {
    AutoContextRequest {
        root_dir: root.to_path_buf(),
        task: "wire the new API route".to_string(),
        understanding: "axum-style handlers".to_string(),
        excluded: HashSet::new(),
        config: provider_config(),
    }
}

fn service_with(
    provider: Arc<MockProvider>,
    history: Option<Arc<HistoryService>>,
) -> AutoContextService {
    let (cache, _builds) = scripted_cache(provider);
    AutoContextService::with_parts(PromptTemplate::new(TEMPLATE).unwrap(), cache, history)
}

#[tokio::test]
async fn test_full_pipeline_resolves_files() {
    let project = sample_project();
    let script = Ok(r#"```json
{"files": ["src/main.rs", "src/api", "ghost.rs"], "reasoning": "entry point and routes"}
```"#
        .to_string());
    let provider = Arc::new(MockProvider::new(provider_config(), script));
    let service = service_with(provider.clone(), None);

    let outcome = service.resolve(&request(project.path())).await.unwrap();
    assert_eq!(outcome.files, vec!["src/api/routes.rs", "src/main.rs"]);
    assert_eq!(outcome.reasoning.as_deref(), Some("entry point and routes"));
    assert_eq!(outcome.dropped, 1);

    let prompts = provider.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("wire the new API route"));
    assert!(prompts[0].contains("├── src"));
    assert!(prompts[0].ends_with(FORMAT_INSTRUCTIONS));
}

#[tokio::test]
async fn test_excluded_paths_never_reach_the_model() {
    let project = sample_project();
    let script = Ok(r#"{"files": ["Cargo.toml"]}"#.to_string());
    let provider = Arc::new(MockProvider::new(provider_config(), script));
    let service = service_with(provider.clone(), None);

    let mut req = request(project.path());
    req.excluded.insert("docs".to_string());
    service.resolve(&req).await.unwrap();

    let prompts = provider.prompts.lock().unwrap();
    assert!(!prompts[0].contains("docs"));
    assert!(!prompts[0].contains("guide.md"));
}

#[tokio::test]
async fn test_provider_failure_is_recorded_in_history() {
    let project = sample_project();
    let tmp = tempfile::tempdir().unwrap();
    let history = Arc::new(HistoryService::at_path(tmp.path().join("history.json")).unwrap());
    let provider = Arc::new(MockProvider::new(
        provider_config(),
        failing_script("backend exploded"),
    ));
    let service = service_with(provider, Some(history.clone()));

    let err = service.resolve(&request(project.path())).await.unwrap_err();
    assert!(matches!(err, AppError::Llm(_)));

    let items = history.items();
    assert_eq!(items.len(), 1);
    assert!(items[0]
        .response
        .starts_with("ERROR during prompt execution:"));
    assert!(items[0].response.contains("backend exploded"));
}

#[tokio::test]
async fn test_history_record_never_contains_the_api_key() {
    let project = sample_project();
    let tmp = tempfile::tempdir().unwrap();
    let history = Arc::new(HistoryService::at_path(tmp.path().join("history.json")).unwrap());
    let script = Ok(r#"{"files": ["src/main.rs"]}"#.to_string());
    let provider = Arc::new(MockProvider::new(provider_config(), script));
    let service = service_with(provider, Some(history.clone()));

    let outcome = service.resolve(&request(project.path())).await.unwrap();
    assert!(!outcome.debug.to_pretty_json().contains("sk-secret-key"));

    let items = history.items();
    assert_eq!(items.len(), 1);
    let api_call = items[0].api_call.as_deref().unwrap();
    assert!(!api_call.contains("sk-secret-key"));
    assert!(api_call.contains("[redacted]"));
    assert!(api_call.contains("[request_text]"));
}

#[tokio::test]
async fn test_repeated_requests_reuse_the_cached_provider() {
    let project = sample_project();
    let script = Ok(r#"{"files": ["src/main.rs"]}"#.to_string());
    let provider = Arc::new(MockProvider::new(provider_config(), script));
    let (cache, builds) = scripted_cache(provider);
    let service =
        AutoContextService::with_parts(PromptTemplate::new(TEMPLATE).unwrap(), cache, None);

    service.resolve(&request(project.path())).await.unwrap();
    service.resolve(&request(project.path())).await.unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_response_key_fails_the_pipeline() {
    let project = sample_project();
    let script = Ok(r#"{"files": ["src/main.rs"], "confidence": 1.0}"#.to_string());
    let provider = Arc::new(MockProvider::new(provider_config(), script));
    let service = service_with(provider, None);

    let err = service.resolve(&request(project.path())).await.unwrap_err();
    assert!(matches!(err, AppError::Decode(_)));
}

#[tokio::test]
async fn test_oversized_tree_fails_before_any_provider_call() {
    let project = tempfile::tempdir().unwrap();
    for i in 0..400 {
        std::fs::write(
            project
                .path()
                .join(format!("very_long_component_file_name_number_{:04}.txt", i)),
            "",
        )
        .unwrap();
    }
    let provider = Arc::new(MockProvider::new(
        provider_config(),
        Ok("unused".to_string()),
    ));
    let service = service_with(provider.clone(), None);

    let err = service.resolve(&request(project.path())).await.unwrap_err();
    assert!(matches!(err, AppError::Capacity(_)));
    assert!(provider.prompts.lock().unwrap().is_empty());
}
