//! `belrepo summarize`: the per-document statistics table.

use belrepo_cache::summary_table;
use belrepo_repository::GraphRequest;

use crate::pipeline::{open_repository, print_skipped, StderrProgress};
use crate::{GlobalArgs, SummarizeArgs};

/// Runs the `belrepo summarize` command.
///
/// The table is always written next to the aggregate cache; `--output`
/// writes a copy elsewhere. The TSV is printed to stdout.
pub fn run(args: &SummarizeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let repo = open_repository(global)?;
    let request = GraphRequest {
        use_cached: args.use_cached,
        ..GraphRequest::default()
    };

    let report = if global.quiet {
        repo.get_graphs(&request)?
    } else {
        repo.get_graphs_with_progress(&request, &mut StderrProgress::new(repo.root()))?
    };
    let table = summary_table(&report.summary_rows(repo.root()));

    if let Some(path) = &args.output {
        table.write(path)?;
        tracing::info!(path = %path.display(), "wrote summary table");
    }
    print!("{}", table.to_tsv());

    if !global.quiet {
        eprintln!(
            "   Summary table: {}",
            repo.aggregate_cache().summary_table_path().display()
        );
        print_skipped(&report, repo.root());
    }
    Ok(0)
}
