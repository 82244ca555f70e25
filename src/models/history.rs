//! Prompt History Models
//!
//! Records of executed prompts, newest first. The on-disk JSON keeps the
//! camelCase field names of the existing `prompt_history.json` format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One executed prompt and its response (or error summary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptHistoryItem {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_task: String,
    pub constructed_prompt: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_call: Option<String>,
}

impl PromptHistoryItem {
    pub fn new(
        user_task: impl Into<String>,
        constructed_prompt: impl Into<String>,
        response: impl Into<String>,
        api_call: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user_task: user_task.into(),
            constructed_prompt: constructed_prompt.into(),
            response: response.into(),
            api_call,
        }
    }
}

/// The full history file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptHistory {
    #[serde(default)]
    pub items: Vec<PromptHistoryItem>,
}
