//! belrepo: the command-line interface for BEL document repositories.
//!
//! Provides `belrepo ls` to inspect cache state, `belrepo compile` to build
//! the aggregate graph, `belrepo summarize` for the per-document statistics
//! table, and the `uncache` family to delete cache files.

#![warn(missing_docs)]

mod compile;
mod ls;
mod pipeline;
mod summarize;
mod uncache;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Cache and compile a directory of BEL documents.
#[derive(Parser, Debug)]
#[command(name = "belrepo", version, about = "BEL repository cache manager")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// The repository root.
    #[arg(short, long, global = true, default_value = ".")]
    pub directory: PathBuf,

    /// Where to write the aggregate cache and summary table.
    #[arg(long, global = true)]
    pub output_directory: Option<PathBuf>,

    /// Path to a `bel-repository.toml` outside the repository root.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the repository's documents and their caches.
    Ls,
    /// Delete the aggregate and per-document caches.
    Uncache(ConfirmArgs),
    /// Delete the aggregate cache only.
    UncacheGlobal(ConfirmArgs),
    /// Delete the per-document caches only.
    UncacheLocal(ConfirmArgs),
    /// Build the aggregate graph and print its summary.
    Compile(CompileArgs),
    /// Write and print the per-document summary table.
    Summarize(SummarizeArgs),
}

/// Confirmation for destructive commands.
#[derive(Parser, Debug)]
pub struct ConfirmArgs {
    /// Confirm the deletion.
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `belrepo compile` subcommand.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Clear every cache and recompile all documents.
    #[arg(long)]
    pub reload: bool,

    /// Do not print a line per document.
    #[arg(long)]
    pub no_progress: bool,

    /// Print the warnings of every compiled document.
    #[arg(long)]
    pub show_warnings: bool,
}

/// Arguments for the `belrepo summarize` subcommand.
#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// Serve documents from their caches where possible.
    #[arg(long)]
    pub use_cached: bool,

    /// Also write the table to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
#[derive(Debug)]
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// The repository root.
    pub directory: PathBuf,
    /// Override for the aggregate output directory.
    pub output_directory: Option<PathBuf>,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        directory: cli.directory,
        output_directory: cli.output_directory,
        config: cli.config,
    };
    pipeline::init_logging(&global);

    let result = match cli.command {
        Command::Ls => ls::run(&global),
        Command::Uncache(ref args) => uncache::run(args, uncache::Scope::All, &global),
        Command::UncacheGlobal(ref args) => uncache::run(args, uncache::Scope::Aggregate, &global),
        Command::UncacheLocal(ref args) => uncache::run(args, uncache::Scope::Documents, &global),
        Command::Compile(ref args) => compile::run(args, &global),
        Command::Summarize(ref args) => summarize::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_ls_defaults() {
        let cli = Cli::parse_from(["belrepo", "ls"]);
        assert!(matches!(cli.command, Command::Ls));
        assert_eq!(cli.directory, PathBuf::from("."));
        assert!(cli.output_directory.is_none());
        assert!(cli.config.is_none());
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "belrepo",
            "compile",
            "--directory",
            "corpus",
            "--output-directory",
            "build",
            "--config",
            "ci.toml",
            "--quiet",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.directory, PathBuf::from("corpus"));
        assert_eq!(cli.output_directory, Some(PathBuf::from("build")));
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    }

    #[test]
    fn parse_compile_flags() {
        let cli = Cli::parse_from([
            "belrepo",
            "compile",
            "--reload",
            "--no-progress",
            "--show-warnings",
        ]);
        match cli.command {
            Command::Compile(ref args) => {
                assert!(args.reload);
                assert!(args.no_progress);
                assert!(args.show_warnings);
            }
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_compile_defaults() {
        let cli = Cli::parse_from(["belrepo", "compile"]);
        match cli.command {
            Command::Compile(ref args) => {
                assert!(!args.reload);
                assert!(!args.no_progress);
                assert!(!args.show_warnings);
            }
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_uncache_variants() {
        let cli = Cli::parse_from(["belrepo", "uncache", "--yes"]);
        assert!(matches!(cli.command, Command::Uncache(ConfirmArgs { yes: true })));
        let cli = Cli::parse_from(["belrepo", "uncache-global"]);
        assert!(matches!(
            cli.command,
            Command::UncacheGlobal(ConfirmArgs { yes: false })
        ));
        let cli = Cli::parse_from(["belrepo", "uncache-local", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::UncacheLocal(ConfirmArgs { yes: true })
        ));
    }

    #[test]
    fn parse_summarize() {
        let cli = Cli::parse_from(["belrepo", "summarize", "--use-cached", "-o", "table.tsv"]);
        match cli.command {
            Command::Summarize(ref args) => {
                assert!(args.use_cached);
                assert_eq!(args.output, Some(PathBuf::from("table.tsv")));
            }
            _ => panic!("expected Summarize command"),
        }
    }

    #[test]
    fn parse_color_never_and_verbose() {
        let cli = Cli::parse_from(["belrepo", "-v", "--color", "never", "ls"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["belrepo", "upload"]).is_err());
    }

    #[test]
    fn command_tree_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
