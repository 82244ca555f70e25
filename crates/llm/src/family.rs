//! Reasoning Model Family Classification
//!
//! Detects models that belong to the GPT-5 reasoning family by name prefix.
//! The classification is a pure function so the dispatch decision can be
//! tested in isolation from any network code; providers turn it into a
//! [`CallPath`] that selects the calling convention.

/// Name prefix shared by the reasoning-optimized model family.
const REASONING_FAMILY_PREFIX: &str = "gpt-5";

/// Which calling convention a generate call takes for a given model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPath {
    /// Standard single-prompt completion with a low fixed temperature.
    Completion,
    /// Vendor reasoning API: fixed reasoning effort and verbosity,
    /// no sampling controls.
    Reasoning,
}

/// Reports whether the given model name belongs to the GPT-5 family.
/// Matches plain names like `gpt-5.1` as well as vendor-prefixed names like
/// `openrouter/gpt-5`. An empty vendor prefix (`/gpt-5`) does not match.
pub fn is_reasoning_family(model: &str) -> bool {
    let m = model.trim().to_lowercase();
    if m.is_empty() {
        return false;
    }

    if m.starts_with(REASONING_FAMILY_PREFIX) {
        return true;
    }

    match m.find('/') {
        Some(slash) if slash > 0 && slash + 1 < m.len() => {
            m[slash + 1..].starts_with(REASONING_FAMILY_PREFIX)
        }
        _ => false,
    }
}

/// Classify a model name into the call path its provider should take.
pub fn call_path(model: &str) -> CallPath {
    if is_reasoning_family(model) {
        CallPath::Reasoning
    } else {
        CallPath::Completion
    }
}
