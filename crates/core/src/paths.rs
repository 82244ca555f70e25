//! Root-Relative Path Normalization
//!
//! Every path that crosses a component boundary in the auto-context pipeline
//! (tree renderer exclusions, parsed LLM candidates, resolved selections) is
//! normalized through [`normalize_relative_path`] so that comparisons and
//! dedup work the same on every platform.

/// Normalize a root-relative path to the canonical pipeline form:
/// trimmed, forward slashes only, no leading `./` or `/`.
///
/// Returns an empty string for inputs that normalize to nothing (empty,
/// whitespace, or `.`), which callers treat as "drop this entry".
pub fn normalize_relative_path(raw: &str) -> String {
    let rel = raw.trim();
    if rel.is_empty() || rel == "." {
        return String::new();
    }

    let rel = rel.strip_prefix("./").unwrap_or(rel);
    let rel = rel.replace('\\', "/");
    rel.trim_start_matches('/').to_string()
}

/// Whether a normalized relative path tries to walk out of its root.
///
/// Paths with `..` components are not a supported input anywhere in the
/// pipeline; callers skip them instead of following them.
pub fn escapes_root(normalized: &str) -> bool {
    normalized.split('/').any(|component| component == "..")
}
