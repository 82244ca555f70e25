//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the PromptPack directory (~/.promptpack/)
pub fn promptpack_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".promptpack"))
}

/// Get the config file path (~/.promptpack/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(promptpack_dir()?.join("config.json"))
}

/// Get the prompt history file path (~/.promptpack/prompt_history.json)
pub fn history_path() -> AppResult<PathBuf> {
    Ok(promptpack_dir()?.join("prompt_history.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the PromptPack directory, creating if it doesn't exist
pub fn ensure_promptpack_dir() -> AppResult<PathBuf> {
    let path = promptpack_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
