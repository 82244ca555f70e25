//! PromptPack Desktop - Rust Backend Library
//!
//! Backend for a desktop tool that assembles LLM prompts from selected
//! project files. The core is the auto-context pipeline: render a bounded
//! file tree, ask the configured LLM provider which files matter for a task,
//! strictly validate its answer, and resolve it against the real filesystem.
//!
//! - Business logic services (`services`)
//! - Storage layer (JSON config) (`storage`)
//! - Data models and utilities (`models`, `utils`)

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::history::{PromptHistory, PromptHistoryItem};
pub use models::settings::{AppConfig, LlmSettings};
pub use services::context::{
    AutoContextOutcome, AutoContextRequest, AutoContextService,
};
pub use services::history::HistoryService;
pub use services::runner::PromptRunner;
pub use services::settings::LlmSettingsService;
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
