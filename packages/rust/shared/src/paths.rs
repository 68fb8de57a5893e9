//! Lexical path helpers.
//!
//! Exclusion and self-exclusion checks compare paths for equality, so every
//! path entering the scanner goes through [`resolve_against`] first. Nothing
//! here touches the filesystem; symlinks are not resolved.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and trailing separators,
/// fold `name/..` pairs. `..` above a root is discarded; `..` at the start of
/// a relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve `path` against `base` (unless already absolute) and normalize.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    normalize(&base.join(path))
}
