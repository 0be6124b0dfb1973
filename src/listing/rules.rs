//! Ignore rules for a listing root.
//!
//! The hidden-entry pattern `.*` comes first, followed by the lines of the
//! root's `.gitignore` and `.dockerignore`. All of them are read with
//! gitignore semantics, so a later `!pattern` can re-include an entry.

use crate::error::{GateError, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Ignore files read from the listing root, in order.
pub const IGNORE_FILES: &[&str] = &[".gitignore", ".dockerignore"];

const HIDDEN_PATTERN: &str = ".*";

/// Compiled ignore rules anchored at a listing root.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Build the rules for `base` from the hidden-entry pattern and every
    /// ignore file that exists there.
    ///
    /// Unreadable files and invalid lines are skipped with a warning, the
    /// remaining lines still apply.
    pub fn load(base: &Path) -> Result<Self> {
        let mut builder = hidden_builder(base)?;

        for name in IGNORE_FILES {
            let path = base.join(name);
            if !path.is_file() {
                continue;
            }
            if let Some(e) = builder.add(&path) {
                tracing::warn!(path = %path.display(), error = %e, "skipping invalid ignore rules");
            }
        }

        build(&builder)
    }

    /// Build rules for `base` from explicit pattern lines.
    pub fn from_patterns<S: AsRef<str>>(base: &Path, lines: &[S]) -> Result<Self> {
        let mut builder = hidden_builder(base)?;
        for line in lines {
            let line = line.as_ref();
            builder.add_line(None, line).map_err(|e| {
                GateError::UserError(format!("invalid ignore pattern '{}': {}", line, e))
            })?;
        }
        build(&builder)
    }

    /// Whether `path` (relative to the root, or under it) is ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.matcher.matched(path, is_dir).is_ignore()
    }

    /// Number of compiled patterns, including the hidden-entry pattern.
    pub fn len(&self) -> usize {
        self.matcher.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }
}

fn hidden_builder(base: &Path) -> Result<GitignoreBuilder> {
    let mut builder = GitignoreBuilder::new(base);
    builder
        .add_line(None, HIDDEN_PATTERN)
        .map_err(|e| GateError::UserError(format!("invalid ignore pattern: {}", e)))?;
    Ok(builder)
}

fn build(builder: &GitignoreBuilder) -> Result<IgnoreRules> {
    let matcher = builder
        .build()
        .map_err(|e| GateError::UserError(format!("failed to compile ignore rules: {}", e)))?;
    Ok(IgnoreRules { matcher })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(lines: &[&str]) -> IgnoreRules {
        IgnoreRules::from_patterns(Path::new("/project"), lines).unwrap()
    }

    fn ignored(rules: &IgnoreRules, path: &str, is_dir: bool) -> bool {
        rules.is_ignored(Path::new(path), is_dir)
    }

    #[test]
    fn test_comments_and_blanks_are_skipped() {
        let rules = rules(&["# comment", "", "*.log"]);
        assert_eq!(rules.len(), 2);
        assert!(!ignored(&rules, "# comment", false));
    }

    #[test]
    fn test_unanchored_pattern_matches_any_depth() {
        let rules = rules(&["*.log"]);
        assert!(ignored(&rules, "debug.log", false));
        assert!(ignored(&rules, "logs/app/debug.log", false));
        assert!(!ignored(&rules, "debug.txt", false));
    }

    #[test]
    fn test_leading_slash_anchors_to_root() {
        let rules = rules(&["/build"]);
        assert!(ignored(&rules, "build", true));
        assert!(!ignored(&rules, "src/build", true));
    }

    #[test]
    fn test_trailing_slash_matches_directories_only() {
        let rules = rules(&["target/"]);
        assert!(ignored(&rules, "target", true));
        assert!(!ignored(&rules, "target", false));
    }

    #[test]
    fn test_negation_reincludes() {
        let rules = rules(&["*.log", "!keep.log"]);
        assert!(ignored(&rules, "a.log", false));
        assert!(!ignored(&rules, "keep.log", false));
    }

    #[test]
    fn test_hidden_entries_are_ignored_by_default() {
        let rules = rules(&[]);
        assert!(ignored(&rules, ".env", false));
        assert!(ignored(&rules, "config/.secrets", false));
        assert!(!ignored(&rules, "config/settings.toml", false));
    }

    #[test]
    fn test_paths_under_the_root_are_matched() {
        let rules = rules(&["*.log"]);
        assert!(ignored(&rules, "/project/logs/run.log", false));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = IgnoreRules::from_patterns(Path::new("/project"), &["[unclosed"]).unwrap_err();
        assert!(err.to_string().contains("invalid ignore pattern"));
    }
}
