//! Prompt Template and Assembly
//!
//! Loads the context-preparation template, validates its placeholders up
//! front, and assembles the final prompt. Validation happens at construction
//! time so a broken template is reported once, not on every request.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::utils::error::{AppError, AppResult};

/// Placeholder for the rendered file tree.
pub const TREE_PLACEHOLDER: &str = "{FILE_TREE}";
/// Placeholder for the user's task description.
pub const TASK_PLACEHOLDER: &str = "{USER_TASK}";
/// Placeholder for optional notes on the current understanding.
pub const UNDERSTANDING_PLACEHOLDER: &str = "{CURRENT_UNDERSTANDING}";

/// Default on-disk template location, relative to the working directory.
pub const DEFAULT_TEMPLATE_PATH: &str = "assets/prompts/context_preparation.md";

const EMBEDDED_TEMPLATE: &str = include_str!("../../../assets/prompts/context_preparation.md");

/// Output contract appended after the rendered template. Held apart from the
/// template file so editing the prose can never loosen the response schema.
pub const FORMAT_INSTRUCTIONS: &str = "Respond ONLY with a JSON object that matches this schema:\n```\n{\n  \"files\": [\"relative/path/from/project/root\"],\n  \"reasoning\": \"optional short description\"\n}\n```\nNo code fences, commentary, or explanations outside the JSON object.";

/// A validated prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Validate the template text. All three placeholders must be present.
    pub fn new(text: impl Into<String>) -> AppResult<Self> {
        let text = text.into();
        for placeholder in [TREE_PLACEHOLDER, TASK_PLACEHOLDER, UNDERSTANDING_PLACEHOLDER] {
            if !text.contains(placeholder) {
                return Err(AppError::validation(format!(
                    "prompt template is missing the {} placeholder",
                    placeholder
                )));
            }
        }
        Ok(Self { text })
    }

    /// Load the template from `path`, falling back to the embedded copy when
    /// the file is absent or unreadable.
    pub fn load(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::new(text),
            Err(err) => {
                debug!(
                    path = %path.display(),
                    error = %err,
                    "prompt template not readable, using embedded copy"
                );
                Self::new(EMBEDDED_TEMPLATE)
            }
        }
    }

    /// The embedded template shipped with the binary.
    pub fn embedded() -> AppResult<Self> {
        Self::new(EMBEDDED_TEMPLATE)
    }

    /// Substitute the placeholders with the actual request content.
    pub fn render(&self, file_tree: &str, task: &str, understanding: &str) -> String {
        self.text
            .replace(TREE_PLACEHOLDER, file_tree)
            .replace(TASK_PLACEHOLDER, task)
            .replace(UNDERSTANDING_PLACEHOLDER, understanding)
    }
}

/// Assemble the full prompt: rendered template, then the output contract.
pub fn build_prompt(
    template: &PromptTemplate,
    file_tree: &str,
    task: &str,
    understanding: &str,
) -> String {
    let rendered = template.render(file_tree, task, understanding);
    format!("{}\n\n{}", rendered.trim(), FORMAT_INSTRUCTIONS)
}
