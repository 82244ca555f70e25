//! PromptPack LLM
//!
//! Provides a unified interface for executing a single prompt against
//! multiple LLM providers:
//! - OpenAI (chat completions + Responses API for the GPT-5 family)
//! - OpenRouter (OpenAI-compatible chat completions)
//! - Google Gemini
//!
//! Also includes the single-slot provider cache and the HTTP client factory.

pub mod cache;
pub mod catalog;
pub mod family;
pub mod gemini;
pub mod http_client;
pub mod openai;
pub mod openrouter;
pub mod provider;
pub mod types;

// Re-export main types
pub use cache::ProviderCache;
pub use catalog::model_catalog;
pub use family::{call_path, is_reasoning_family, CallPath};
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use openrouter::OpenRouterProvider;
pub use provider::{build_provider, LlmProvider};
pub use types::*;
