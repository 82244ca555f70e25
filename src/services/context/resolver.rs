//! Filesystem Resolution
//!
//! Turns the model's candidate paths into the set of real files under the
//! project root. Candidates that do not exist, escape the root, or cannot be
//! inspected are skipped rather than failing the whole selection; the count
//! of skipped candidates travels with the result so the caller can surface
//! it. Directories expand to every file beneath them.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use ignore::WalkBuilder;
use tracing::debug;

use promptpack_core::paths::escapes_root;

use crate::utils::error::{AppError, AppResult};

/// The resolved selection: existing files, sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    /// Root-relative file paths with forward slashes, lexicographic order.
    pub files: Vec<String>,
    /// Candidates dropped because they were missing, escaped the root, or
    /// could not be inspected.
    pub dropped: usize,
}

/// Resolve normalized candidate paths against the project root.
pub fn resolve_selection(root_dir: &Path, candidates: &[String]) -> AppResult<ResolvedSelection> {
    if candidates.is_empty() {
        return Err(AppError::empty_result("no candidate paths provided"));
    }

    let mut files = BTreeSet::new();
    let mut dropped = 0usize;

    for candidate in candidates {
        if escapes_root(candidate) {
            debug!(path = %candidate, "dropping candidate that escapes the project root");
            dropped += 1;
            continue;
        }

        let absolute = root_dir.join(candidate);
        let metadata = match fs::metadata(&absolute) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!(path = %candidate, error = %err, "dropping unresolvable candidate");
                dropped += 1;
                continue;
            }
        };

        if metadata.is_dir() {
            collect_directory(root_dir, &absolute, &mut files);
        } else {
            files.insert(candidate.clone());
        }
    }

    if files.is_empty() {
        return Err(AppError::empty_result(
            "no existing files matched the model selection",
        ));
    }

    Ok(ResolvedSelection {
        files: files.into_iter().collect(),
        dropped,
    })
}

/// Add every file under `dir` to the set, as root-relative slash paths.
fn collect_directory(root_dir: &Path, dir: &Path, files: &mut BTreeSet<String>) {
    let walker = WalkBuilder::new(dir).standard_filters(false).build();
    for entry in walker.flatten() {
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root_dir) {
            files.insert(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}
