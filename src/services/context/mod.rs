//! Auto-Context Resolution
//!
//! The end-to-end pipeline: render a bounded file tree, assemble the
//! context-preparation prompt, send it to the configured provider through
//! the single-slot cache, strictly parse the model's file selection, and
//! resolve it against the real filesystem. Every execution, successful or
//! not, is recorded in the prompt history when a history service is
//! attached.

pub mod parser;
pub mod prompt;
pub mod resolver;
pub mod tree;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use promptpack_llm::{ProviderCache, ProviderConfig, RequestDebug};

use crate::models::history::PromptHistoryItem;
use crate::services::history::HistoryService;
use crate::utils::error::AppResult;

use prompt::{build_prompt, PromptTemplate, DEFAULT_TEMPLATE_PATH};

/// One auto-context request.
#[derive(Debug, Clone)]
pub struct AutoContextRequest {
    /// Absolute path of the project root.
    pub root_dir: PathBuf,
    /// The task the user wants context for.
    pub task: String,
    /// Optional free-form notes about the project.
    pub understanding: String,
    /// Normalized root-relative paths to omit from the tree.
    pub excluded: HashSet<String>,
    /// Provider configuration for this request.
    pub config: ProviderConfig,
}

/// The result of a successful auto-context resolution.
#[derive(Debug)]
pub struct AutoContextOutcome {
    /// Existing root-relative files, sorted and deduplicated.
    pub files: Vec<String>,
    /// The model's stated reasoning, when it offered one.
    pub reasoning: Option<String>,
    /// Model candidates dropped during filesystem resolution.
    pub dropped: usize,
    /// Sanitized record of the provider call.
    pub debug: RequestDebug,
}

/// Orchestrates the auto-context pipeline.
pub struct AutoContextService {
    template: PromptTemplate,
    cache: Arc<ProviderCache>,
    history: Option<Arc<HistoryService>>,
}

impl AutoContextService {
    /// Service with the on-disk template (embedded fallback) and a fresh
    /// provider cache.
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            template: PromptTemplate::load(Path::new(DEFAULT_TEMPLATE_PATH))?,
            cache: Arc::new(ProviderCache::new()),
            history: None,
        })
    }

    /// Service with explicit collaborators. Tests inject a cache built over
    /// a mock provider factory here.
    pub fn with_parts(
        template: PromptTemplate,
        cache: Arc<ProviderCache>,
        history: Option<Arc<HistoryService>>,
    ) -> Self {
        Self {
            template,
            cache,
            history,
        }
    }

    /// Attach a history service; subsequent executions are recorded.
    pub fn with_history(mut self, history: Arc<HistoryService>) -> Self {
        self.history = Some(history);
        self
    }

    /// The provider cache, shared with the settings service so settings
    /// changes invalidate it.
    pub fn cache(&self) -> Arc<ProviderCache> {
        self.cache.clone()
    }

    /// Run the full pipeline for one request.
    pub async fn resolve(&self, request: &AutoContextRequest) -> AppResult<AutoContextOutcome> {
        let file_tree = tree::render_file_tree(&request.root_dir, &request.excluded)?;
        let full_prompt = build_prompt(
            &self.template,
            &file_tree,
            &request.task,
            &request.understanding,
        );

        let provider = self.cache.get_or_build(&request.config)?;
        info!(
            provider = provider.name(),
            model = provider.model(),
            prompt_chars = full_prompt.len(),
            "requesting auto-context selection"
        );

        let outcome = provider.generate(&full_prompt).await;
        let debug = outcome.debug;
        self.record_history(&request.task, &full_prompt, &outcome.result, &debug);

        let raw = outcome.result?;
        let parsed = parser::parse_selection(&raw)?;
        let resolved = resolver::resolve_selection(&request.root_dir, &parsed.files)?;
        if resolved.dropped > 0 {
            warn!(
                dropped = resolved.dropped,
                "model selected paths that do not exist in the project"
            );
        }

        Ok(AutoContextOutcome {
            files: resolved.files,
            reasoning: parsed.reasoning,
            dropped: resolved.dropped,
            debug,
        })
    }

    fn record_history(
        &self,
        task: &str,
        prompt: &str,
        result: &Result<String, promptpack_llm::LlmError>,
        debug: &RequestDebug,
    ) {
        let Some(history) = &self.history else {
            return;
        };
        let response = match result {
            Ok(text) => text.clone(),
            Err(err) => format!("ERROR during prompt execution: {}", err),
        };
        history.add_item(PromptHistoryItem::new(
            task,
            prompt,
            response,
            Some(debug.to_pretty_json()),
        ));
    }
}
