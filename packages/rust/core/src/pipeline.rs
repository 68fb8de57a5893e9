//! End-to-end aggregation pipeline: scan → group → rewrite → write.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use mdaggregate_shared::{AggregateReport, Result};

use crate::grouper;
use crate::scanner::{self, ScanOptions};
use crate::writer;

/// Configuration for the `aggregate` pipeline.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Directory to scan, relative to the working directory or absolute.
    pub root: PathBuf,
    /// Output document path, relative to the working directory or absolute.
    pub output: PathBuf,
    /// Paths relative to `root` to prune from the scan.
    pub exclude: Vec<PathBuf>,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each file block is written.
    fn file_written(&self, path: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &AggregateReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_written(&self, _path: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &AggregateReport) {}
}

/// Run the full aggregation.
///
/// 1. Scan: collect and sort candidate Markdown files
/// 2. Group: partition by immediate parent directory
/// 3. Write: render every section, rewriting headings per file
#[instrument(skip_all, fields(root = %config.root.display(), output = %config.output.display()))]
pub fn aggregate(
    config: &AggregateConfig,
    progress: &dyn ProgressReporter,
) -> Result<AggregateReport> {
    let start = Instant::now();

    progress.phase("Scanning for Markdown files");
    let opts = ScanOptions::new(&config.root, &config.output, config.exclude.as_slice())?;
    let files = scanner::scan(&opts)?;

    progress.phase("Grouping into sections");
    let sections = grouper::group(files);

    progress.phase("Writing aggregated document");
    let stats = writer::write_document(&opts.output, &sections, progress)?;

    let report = AggregateReport {
        output: opts.output,
        file_count: stats.files_written,
        section_count: stats.sections_written,
        unreadable_count: stats.unreadable,
        elapsed: start.elapsed(),
    };

    info!(
        files = report.file_count,
        sections = report.section_count,
        unreadable = report.unreadable_count,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "aggregation complete"
    );

    progress.done(&report);
    Ok(report)
}
