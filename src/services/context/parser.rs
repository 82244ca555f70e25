//! Strict LLM Response Parsing
//!
//! Decodes the model's file-selection answer. The schema is deliberately
//! rigid: exactly a `files` array plus an optional `reasoning` string, with
//! unknown keys rejected outright. Models that wrap the JSON in Markdown
//! code fences are tolerated; everything else fails loudly so a drifting
//! model surface is caught immediately instead of silently selecting the
//! wrong files.

use serde::Deserialize;

use promptpack_core::normalize_relative_path;

use crate::utils::error::{AppError, AppResult};

/// The exact shape the model must answer with.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AutoContextResult {
    files: Vec<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// The validated selection extracted from a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelection {
    /// Normalized candidate paths, order preserved, duplicates removed.
    pub files: Vec<String>,
    pub reasoning: Option<String>,
}

/// Parse a raw model response into a [`ParsedSelection`].
pub fn parse_selection(raw: &str) -> AppResult<ParsedSelection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::empty_result("empty response from LLM"));
    }

    let body = strip_code_fences(trimmed);
    let decoded: AutoContextResult = serde_json::from_str(body)
        .map_err(|err| AppError::decode(format!("unexpected LLM response shape: {}", err)))?;

    let mut files = Vec::new();
    for entry in &decoded.files {
        let normalized = normalize_relative_path(entry);
        if normalized.is_empty() || files.contains(&normalized) {
            continue;
        }
        files.push(normalized);
    }

    if files.is_empty() {
        return Err(AppError::empty_result(
            "response did not include any valid files",
        ));
    }

    Ok(ParsedSelection {
        files,
        reasoning: decoded
            .reasoning
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()),
    })
}

/// Strip a surrounding Markdown code fence, with or without a `json` tag.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let rest = match rest.rfind("```") {
        Some(end) => &rest[..end],
        None => rest,
    };
    rest.trim()
}
