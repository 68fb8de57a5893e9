//! CLI definition, config merging, tracing setup, and the run entry point.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use mdaggregate_core::pipeline::{AggregateConfig, ProgressReporter, aggregate};
use mdaggregate_shared::{AggregateReport, AppConfig, load_config, load_config_from};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// mdaggregate: aggregate Markdown files into a single document.
#[derive(Parser, Debug)]
#[command(
    name = "mdaggregate",
    version,
    about = "Aggregate markdown files into a single document.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Directory to search for markdown files [default: .]
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Output file path [default: aggregated_markdown.md]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directories or files to exclude, relative to the directory.
    #[arg(short, long, num_args = 1..)]
    pub exclude: Vec<PathBuf>,

    /// Config file (defaults to ~/.mdaggregate/mdaggregate.toml).
    #[arg(short, long, env = "MDAGGREGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hide the progress spinner.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Log output format.
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout only
/// carries the summary lines.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "mdaggregate=warn",
        1 => "mdaggregate=info",
        2 => "mdaggregate=debug",
        _ => "mdaggregate=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Config merging
// ---------------------------------------------------------------------------

/// Load the config file named on the command line, or the default one.
fn load_app_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge CLI flags over config file values. Exclusions accumulate: config
/// entries first, then CLI entries.
fn build_aggregate_config(cli: &Cli, config: &AppConfig) -> AggregateConfig {
    let defaults = &config.defaults;

    let root = cli
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from(&defaults.directory));
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&defaults.output));
    let exclude = defaults
        .exclude
        .iter()
        .map(PathBuf::from)
        .chain(cli.exclude.iter().cloned())
        .collect();

    AggregateConfig {
        root,
        output,
        exclude,
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run the aggregation and print the summary.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let app_config = load_app_config(cli.config.as_deref())?;
    let config = build_aggregate_config(&cli, &app_config);

    info!(
        directory = %config.root.display(),
        output = %config.output.display(),
        excludes = config.exclude.len(),
        "aggregating markdown"
    );

    let reporter = CliProgress::new(cli.quiet);
    let report = aggregate(&config, &reporter)?;

    if report.unreadable_count > 0 {
        warn!(
            count = report.unreadable_count,
            "some files could not be read; see error blocks in the output"
        );
    }

    println!(
        "Aggregated {} markdown files into {}",
        report.file_count,
        config.output.display()
    );
    println!(
        "Files were organized into {} sections",
        report.section_count
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new(quiet: bool) -> Self {
        if quiet {
            return Self {
                spinner: ProgressBar::hidden(),
            };
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_written(&self, path: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Writing [{current}/{total}] {path}"));
    }

    fn done(&self, _report: &AggregateReport) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    // Fatal errors skip `done`; the spinner must not be left on the terminal.
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
