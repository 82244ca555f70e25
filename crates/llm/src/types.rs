//! LLM Types
//!
//! Core types for LLM provider interactions.

use serde::{Deserialize, Serialize};

/// Placeholder written into debug records in place of the API key.
pub const REDACTED_PLACEHOLDER: &str = "[redacted]";

/// Placeholder written into debug records in place of the outgoing prompt.
pub const PROMPT_PLACEHOLDER: &str = "[request_text]";

/// Supported LLM provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAI,
    OpenRouter,
    Gemini,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::OpenAI => write!(f, "openai"),
            ProviderType::OpenRouter => write!(f, "openrouter"),
            ProviderType::Gemini => write!(f, "gemini"),
        }
    }
}

impl ProviderType {
    /// Parse a provider identifier. Empty or unknown identifiers fail
    /// immediately, before any client setup.
    pub fn parse(name: &str) -> LlmResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderType::OpenAI),
            "openrouter" => Ok(ProviderType::OpenRouter),
            "gemini" => Ok(ProviderType::Gemini),
            "" | "none" => Err(LlmError::UnsupportedProvider {
                name: "provider is not configured".to_string(),
            }),
            other => Err(LlmError::UnsupportedProvider {
                name: format!("provider {} is not supported", other),
            }),
        }
    }
}

/// Configuration for an LLM provider.
///
/// Equality over all four fields is the provider cache key: two configs are
/// identical iff provider, model, API key, and base URL all match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The provider type
    pub provider: ProviderType,
    /// Model name to use
    pub model: String,
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(provider: ProviderType, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: None,
            base_url: None,
        }
    }

    /// API key with surrounding whitespace removed; `None` when unset or blank.
    pub fn trimmed_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Base URL with surrounding whitespace removed; `None` when unset or blank.
    pub fn trimmed_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

/// Provider-specific model metadata. Catalog entries are curated in code;
/// listing them never requires a network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

/// Errors from LLM provider construction and generation.
#[derive(Debug, Clone)]
pub enum LlmError {
    /// Authentication failed (missing or invalid API key)
    AuthenticationFailed { message: String },
    /// Unknown or unconfigured provider identifier
    UnsupportedProvider { name: String },
    /// Invalid request (bad parameters, missing model)
    InvalidRequest { message: String },
    /// Non-success HTTP status from the provider
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error
    NetworkError { message: String },
    /// Response parsing error
    ParseError { message: String },
    /// The provider returned no usable text output
    EmptyOutput { message: String },
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            LlmError::UnsupportedProvider { name } => {
                write!(f, "Unsupported provider: {}", name)
            }
            LlmError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            LlmError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            LlmError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            LlmError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            LlmError::EmptyOutput { message } => {
                write!(f, "Empty output: {}", message)
            }
            LlmError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Sanitized description of an outbound provider call.
///
/// Safe to log or display: the API key value and the outgoing prompt body
/// are replaced with fixed placeholders before this record is built.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDebug {
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

impl RequestDebug {
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// The outcome of a single generate call. The debug record is produced for
/// every call, success or failure.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub result: LlmResult<String>,
    pub debug: RequestDebug,
}

impl GenerateOutcome {
    pub fn new(result: LlmResult<String>, debug: RequestDebug) -> Self {
        Self { result, debug }
    }
}
