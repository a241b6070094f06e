//! Shared helpers for CLI commands.
//!
//! Opening the repository from the global flags, logging setup, and the
//! stderr progress reporter used by `compile` and `summarize`.

use std::io::Write;
use std::path::{Path, PathBuf};

use belrepo_repository::{DocumentOutcome, DocumentRef, GraphsReport, Progress, Repository, RepositoryBuilder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::GlobalArgs;

/// Installs the stderr log subscriber for the `belrepo*` crates.
///
/// `RUST_LOG`-style filtering is fixed by the flags: `error` with `--quiet`,
/// `debug` with `--verbose`, `info` otherwise.
pub fn init_logging(global: &GlobalArgs) {
    let level = if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "info"
    };
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("belrepo={level}")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(global.color)
                .with_target(false),
        )
        .try_init();
}

/// Resolves `path` against the current directory when relative.
fn absolute(path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Opens the repository named by the global flags.
///
/// With `--config`, that file must exist; otherwise `bel-repository.toml` in
/// the repository directory is used when present. `--output-directory`
/// overrides the configured output directory.
pub fn open_repository(global: &GlobalArgs) -> Result<Repository, Box<dyn std::error::Error>> {
    let root = absolute(&global.directory)?;
    if !root.is_dir() {
        return Err(format!("{} is not a directory", root.display()).into());
    }

    let config = match &global.config {
        Some(path) => belrepo_config::load_config_file(path)?,
        None => belrepo_config::load_config(&root)?,
    };
    let mut builder = RepositoryBuilder::from_config(&root, &config)?;
    if let Some(dir) = &global.output_directory {
        builder = builder.output_directory(absolute(dir)?);
    }
    Ok(builder.build())
}

/// Prints one line per document to stderr as a pass runs.
pub struct StderrProgress {
    root: PathBuf,
    index: usize,
}

impl StderrProgress {
    /// Creates a reporter printing paths relative to `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            index: 0,
        }
    }
}

impl Progress for StderrProgress {
    fn on_document(&mut self, index: usize, _doc: &DocumentRef) {
        self.index = index + 1;
    }

    fn on_outcome(&mut self, doc: &DocumentRef, outcome: &DocumentOutcome) {
        let status = match outcome {
            DocumentOutcome::Cached => "cached",
            DocumentOutcome::Compiled => "compiled",
            DocumentOutcome::Skipped(_) => "skipped",
        };
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "  [{:>4}] {status:<8} {}",
            self.index,
            doc.relative_to(&self.root).display()
        );
    }

    fn on_finish(&mut self, report: &GraphsReport) {
        eprintln!(
            "   Loaded {} document(s): {} cached, {} compiled, {} skipped",
            report.outcomes.len(),
            report.cached_count(),
            report.compiled_count(),
            report.skipped().len()
        );
    }
}

/// Prints the skipped documents of a pass, if any.
pub fn print_skipped(report: &GraphsReport, root: &Path) {
    let skipped = report.skipped();
    if skipped.is_empty() {
        return;
    }
    eprintln!("warning: {} document(s) skipped", skipped.len());
    for (doc, reason) in skipped {
        eprintln!("  {}: {reason}", doc.relative_to(root).display());
    }
}
