//! PromptPack Core
//!
//! Foundational path utilities for the PromptPack Desktop workspace. This
//! crate has zero dependencies on application-level code (LLM providers,
//! storage, etc.).
//!
//! ## Module Organization
//!
//! - `paths` - Root-relative path normalization shared across the pipeline

pub mod paths;

pub use paths::normalize_relative_path;
