//! Core domain types for an aggregation run.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Section key for files located directly in the scan root.
pub const ROOT_SECTION_KEY: &str = ".";

// ---------------------------------------------------------------------------
// CandidateFile
// ---------------------------------------------------------------------------

/// A Markdown file selected for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute, normalized path.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub relative: String,
    /// Directory of the file relative to the root, `/`-separated, or
    /// [`ROOT_SECTION_KEY`] for root-level files.
    pub section_key: String,
}

impl CandidateFile {
    /// Build a candidate from an absolute path under `root`.
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let rel = path.strip_prefix(root).unwrap_or(&path);
        let relative = join_components(rel);
        let section_key = match rel.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => join_components(parent),
            _ => ROOT_SECTION_KEY.to_string(),
        };

        Self {
            path,
            relative,
            section_key,
        }
    }

    /// Base name of the file.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Join the normal components of a relative path with `/`, independent of
/// the platform separator.
fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// Files sharing one immediate parent directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Relative directory key (`.` for the root).
    pub key: String,
    /// Files in scan order.
    pub files: Vec<CandidateFile>,
}

impl Section {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            files: Vec::new(),
        }
    }

    /// Whether this section holds the root-level files.
    pub fn is_root(&self) -> bool {
        self.key == ROOT_SECTION_KEY
    }
}

/// Sections keyed by relative directory, iterated in ascending key order.
pub type SectionMap = BTreeMap<String, Section>;

// ---------------------------------------------------------------------------
// AggregateReport
// ---------------------------------------------------------------------------

/// Summary of a completed aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    /// Path of the written document.
    pub output: PathBuf,
    /// Number of candidate files emitted (including unreadable ones).
    pub file_count: usize,
    /// Number of distinct sections emitted.
    pub section_count: usize,
    /// Files replaced by an error placeholder.
    pub unreadable_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}
