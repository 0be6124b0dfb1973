//! Lenient path resolution for directory policy.
//!
//! Paths are made absolute, normalized lexically, and the longest existing
//! ancestor is canonicalized. The path itself does not need to exist.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` to an absolute, symlink-free form where possible.
pub fn resolve_lenient(path: &Path) -> io::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty path"));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    canonicalize_best_effort(&normalize(&absolute))
}

/// Drop `.` components and fold `..` into its parent, without touching the
/// filesystem. `..` at the root stays at the root.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn canonicalize_best_effort(path: &Path) -> io::Result<PathBuf> {
    let mut missing_suffix: Vec<OsString> = Vec::new();
    let mut cursor = path;

    loop {
        match std::fs::canonicalize(cursor) {
            Ok(mut canonical) => {
                for component in missing_suffix.iter().rev() {
                    canonical.push(component);
                }
                return Ok(canonical);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(file_name) = cursor.file_name() {
                    missing_suffix.push(file_name.to_os_string());
                }
                cursor = match cursor.parent() {
                    Some(parent) => parent,
                    None => return Err(e),
                };
            }
            Err(e) => return Err(e),
        }
    }
}
