//! Markdown file discovery.
//!
//! Walks the root recursively, pruning excluded directories before they are
//! entered, and returns candidates sorted by absolute path so output order
//! never depends on the order the filesystem lists entries in.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use mdaggregate_shared::{CandidateFile, MdAggregateError, Result, resolve_against};

/// Resolved inputs for a scan. All paths are absolute and normalized.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Traversal boundary.
    pub root: PathBuf,
    /// Output document path, never picked up as a candidate.
    pub output: PathBuf,
    /// Files and directories to skip, with all their descendants.
    pub exclude: HashSet<PathBuf>,
}

impl ScanOptions {
    /// Resolve `root` and `output` against the current directory and each
    /// exclusion against `root`.
    pub fn new<P: AsRef<Path>>(root: &Path, output: &Path, exclude: &[P]) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| MdAggregateError::io(".", e))?;
        Ok(Self::resolve(&cwd, root, output, exclude))
    }

    /// Same as [`ScanOptions::new`] with an explicit working directory.
    pub fn resolve<P: AsRef<Path>>(cwd: &Path, root: &Path, output: &Path, exclude: &[P]) -> Self {
        let root = resolve_against(cwd, root);
        let output = resolve_against(cwd, output);
        let exclude = exclude
            .iter()
            .map(|p| resolve_against(&root, p.as_ref()))
            .collect();

        Self {
            root,
            output,
            exclude,
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.contains(path)
    }
}

/// Collect every candidate Markdown file under the root.
///
/// Fails if the root is missing, is not a directory, or any part of the tree
/// cannot be walked. An empty result is not an error.
#[instrument(skip_all, fields(root = %opts.root.display(), excludes = opts.exclude.len()))]
pub fn scan(opts: &ScanOptions) -> Result<Vec<CandidateFile>> {
    let meta = std::fs::metadata(&opts.root).map_err(|e| MdAggregateError::io(&opts.root, e))?;
    if !meta.is_dir() {
        return Err(MdAggregateError::NotADirectory(opts.root.clone()));
    }

    let walker = WalkDir::new(&opts.root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if opts.is_excluded(entry.path()) {
                debug!(path = %entry.path().display(), "pruned excluded path");
                return false;
            }
            true
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(opts.root.as_path()).to_path_buf();
            MdAggregateError::traversal(path, e.to_string())
        })?;

        if entry.file_type().is_dir() {
            continue;
        }
        // Links to directories are listed but never descended into.
        if entry.path_is_symlink() && entry.path().is_dir() {
            continue;
        }
        if !is_markdown_name(entry.file_name()) {
            continue;
        }
        if entry.path() == opts.output {
            debug!(path = %entry.path().display(), "skipping output file");
            continue;
        }

        debug!(path = %entry.path().display(), "found markdown file");
        paths.push(entry.into_path());
    }

    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    info!(count = paths.len(), "scan complete");

    Ok(paths
        .into_iter()
        .map(|path| CandidateFile::new(&opts.root, path))
        .collect())
}

/// Whether a file name ends in `.md`, ignoring case.
pub fn is_markdown_name(name: &OsStr) -> bool {
    name.to_string_lossy().to_lowercase().ends_with(".md")
}
