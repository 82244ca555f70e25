//! Bounded File Tree Rendering
//!
//! Renders a project directory as an ASCII tree with box-drawing connectors,
//! the same layout the prompt template was written for. The render is
//! strictly bounded: it fails as soon as the accumulated text would exceed
//! the budget, rather than silently truncating and handing the model a
//! misleading picture of the project.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use promptpack_core::normalize_relative_path;

use crate::utils::error::{AppError, AppResult};

/// Upper bound on the rendered tree, in characters.
pub const MAX_TREE_CHARS: usize = 15_000;

/// Render the directory under `root_dir` as a connector-drawn tree.
///
/// Paths whose normalized root-relative form appears in `excluded` are
/// omitted entirely, including everything beneath an excluded directory.
/// Returns a capacity error when the rendered text would exceed
/// [`MAX_TREE_CHARS`].
pub fn render_file_tree(root_dir: &Path, excluded: &HashSet<String>) -> AppResult<String> {
    let root_name = root_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root_dir.to_string_lossy().into_owned());

    let mut out = String::new();
    append_bounded(&mut out, &format!("{}/\n", root_name))?;
    render_children(root_dir, root_dir, "", excluded, &mut out)?;
    Ok(out)
}

fn append_bounded(out: &mut String, text: &str) -> AppResult<()> {
    if out.len() + text.len() > MAX_TREE_CHARS {
        return Err(AppError::capacity(format!(
            "file tree exceeds {} characters; exclude more paths and retry",
            MAX_TREE_CHARS
        )));
    }
    out.push_str(text);
    Ok(())
}

fn render_children(
    root_dir: &Path,
    dir: &Path,
    prefix: &str,
    excluded: &HashSet<String>,
    out: &mut String,
) -> AppResult<()> {
    let mut entries: Vec<(String, bool)> = Vec::new();
    let read = fs::read_dir(dir).map_err(|err| {
        AppError::internal(format!("cannot read directory {}: {}", dir.display(), err))
    })?;
    for entry in read {
        let entry = entry.map_err(|err| {
            AppError::internal(format!("cannot read directory {}: {}", dir.display(), err))
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.path().is_dir();

        let rel = entry
            .path()
            .strip_prefix(root_dir)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| name.clone());
        if excluded.contains(&normalize_relative_path(&rel)) {
            continue;
        }
        entries.push((name, is_dir));
    }

    // Directories first, then case-insensitive by name. The sort is stable,
    // so same-name-different-case entries keep their read order.
    entries.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase()))
    });

    let count = entries.len();
    for (index, (name, is_dir)) in entries.into_iter().enumerate() {
        let last = index + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        append_bounded(out, &format!("{}{}{}\n", prefix, connector, name))?;

        if is_dir {
            let child_prefix = if last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            render_children(root_dir, &dir.join(&name), &child_prefix, excluded, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};

    fn sample_project() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        create_dir_all(tmp.path().join("src")).unwrap();
        create_dir_all(tmp.path().join("docs")).unwrap();
        write(tmp.path().join("README.md"), "readme").unwrap();
        write(tmp.path().join("src/main.rs"), "fn main() {}").unwrap();
        write(tmp.path().join("docs/guide.md"), "guide").unwrap();
        tmp
    }

    #[test]
    fn test_renders_dirs_first_with_connectors() {
        let tmp = sample_project();
        let tree = render_file_tree(tmp.path(), &HashSet::new()).unwrap();
        let lines: Vec<&str> = tree.lines().collect();

        assert!(lines[0].ends_with('/'));
        assert_eq!(lines[1], "├── docs");
        assert_eq!(lines[2], "│   └── guide.md");
        assert_eq!(lines[3], "├── src");
        assert_eq!(lines[4], "│   └── main.rs");
        assert_eq!(lines[5], "└── README.md");
    }

    #[test]
    fn test_excluded_directory_is_omitted_entirely() {
        let tmp = sample_project();
        let mut excluded = HashSet::new();
        excluded.insert("docs".to_string());
        let tree = render_file_tree(tmp.path(), &excluded).unwrap();
        assert!(!tree.contains("docs"));
        assert!(!tree.contains("guide.md"));
        assert!(tree.contains("main.rs"));
    }

    #[test]
    fn test_excluded_file_is_omitted() {
        let tmp = sample_project();
        let mut excluded = HashSet::new();
        excluded.insert("src/main.rs".to_string());
        let tree = render_file_tree(tmp.path(), &excluded).unwrap();
        assert!(tree.contains("├── src"));
        assert!(!tree.contains("main.rs"));
    }

    #[test]
    fn test_budget_overflow_is_a_capacity_error() {
        let tmp = tempfile::tempdir().unwrap();
        // Enough long names to push the render past the character budget.
        for i in 0..400 {
            write(
                tmp.path()
                    .join(format!("very_long_component_file_name_number_{:04}.txt", i)),
                "",
            )
            .unwrap();
        }
        let result = render_file_tree(tmp.path(), &HashSet::new());
        assert!(matches!(result, Err(AppError::Capacity(_))));
    }

    #[test]
    fn test_unreadable_directory_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("gone");
        let err = render_file_tree(&missing, &HashSet::new()).unwrap_err();
        assert!(err.to_string().contains("gone"));
    }
}
