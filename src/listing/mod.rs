//! Recursive directory listing for agents.
//!
//! Lists every regular file under a directory, relative to it, skipping
//! hidden entries and anything matched by the root's `.gitignore` or
//! `.dockerignore`. Ignored directories are not descended into.

mod rules;

pub use rules::{IGNORE_FILES, IgnoreRules};

use crate::error::{GateError, Result};
use ignore::WalkBuilder;
use std::path::Path;

/// List non-ignored files under `directory`, sorted, `/`-separated.
pub fn list_files(directory: &Path) -> Result<Vec<String>> {
    if !directory.is_dir() {
        return Err(GateError::UserError(format!(
            "directory '{}' does not exist or is not a directory",
            directory.display()
        )));
    }
    let root = std::fs::canonicalize(directory).map_err(|e| {
        GateError::IoError(format!(
            "failed to resolve directory '{}': {}",
            directory.display(),
            e
        ))
    })?;

    let rules = IgnoreRules::load(&root)?;

    // Only the root's own ignore files apply, so every built-in filter is off.
    let mut builder = WalkBuilder::new(&root);
    builder
        .standard_filters(false)
        .parents(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            entry.depth() == 0
                || !rules.is_ignored(
                    entry.path(),
                    entry.file_type().is_some_and(|ft| ft.is_dir()),
                )
        });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        // Follows symlinks, like a plain `is_file` check on the path.
        if !entry.path().is_file() {
            continue;
        }

        let Some(rel) = relative_path(&root, entry.path()) else {
            continue;
        };
        if has_hidden_parent(&rel) {
            continue;
        }
        files.push(rel);
    }

    files.sort();
    tracing::debug!(directory = %root.display(), count = files.len(), "listed files");
    Ok(files)
}

/// Render a listing as the text block handed back to an agent.
pub fn render_listing(files: &[String]) -> String {
    let mut out = String::from("File paths:");
    for file in files {
        out.push_str("\n- ");
        out.push_str(file);
    }
    out
}

fn relative_path(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

fn has_hidden_parent(rel: &str) -> bool {
    let mut parts: Vec<&str> = rel.split('/').collect();
    parts.pop();
    parts.iter().any(|part| part.starts_with('.'))
}
