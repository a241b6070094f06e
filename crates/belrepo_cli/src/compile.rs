//! `belrepo compile`: build the aggregate graph and report on it.

use std::path::{Path, PathBuf};

use belrepo_cache::CacheError;
use belrepo_diagnostics::{TerminalRenderer, WarningRenderer};
use belrepo_graph::{BelGraph, SummaryRecord};
use belrepo_repository::{GraphRequest, NoProgress, Progress, Repository};

use crate::pipeline::{open_repository, print_skipped, StderrProgress};
use crate::{CompileArgs, GlobalArgs};

/// Runs the `belrepo compile` command.
///
/// Skipped documents are reported but do not change the exit code.
pub fn run(args: &CompileArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let repo = open_repository(global)?;

    let request = if args.reload {
        let removed = repo.clear_all()?;
        tracing::debug!(removed, "cleared caches before reload");
        GraphRequest::reload()
    } else {
        GraphRequest::default()
    };

    let mut stderr_progress;
    let mut silent = NoProgress;
    let progress: &mut dyn Progress = if args.no_progress || global.quiet {
        &mut silent
    } else {
        stderr_progress = StderrProgress::new(repo.root());
        &mut stderr_progress
    };

    let aggregate = repo.get_graph_with_progress(&request, progress)?;

    if !global.quiet {
        println!("{}", summary_text(&aggregate.graph));
    }

    match aggregate.documents {
        Some(report) => {
            if args.show_warnings {
                print_warnings(&report.graphs, repo.root(), global.color);
            }
            if !global.quiet {
                print_skipped(&report, repo.root());
            }
        }
        None if args.show_warnings => {
            print_warnings(&cached_graphs(&repo)?, repo.root(), global.color);
        }
        None => {}
    }
    Ok(0)
}

/// Graphs already in the per-document caches, in discovery order.
///
/// Nothing is compiled or written; documents without a cache are left out.
fn cached_graphs(repo: &Repository) -> Result<Vec<(PathBuf, BelGraph)>, CacheError> {
    let mut graphs = Vec::new();
    for doc in repo.documents() {
        if let Some(graph) = repo.document_cache().read(&doc)? {
            graphs.push((doc.path(), graph));
        }
    }
    Ok(graphs)
}

fn print_warnings(graphs: &[(PathBuf, BelGraph)], root: &Path, color: bool) {
    let renderer = TerminalRenderer::new(color, 80);
    let mut total = 0;
    for (path, graph) in graphs {
        let rel = path.strip_prefix(root).unwrap_or(path.as_path());
        let shown = rel.display().to_string();
        for warning in &graph.warnings {
            eprintln!("{}", renderer.render(&shown, warning));
        }
        total += graph.number_of_warnings();
    }
    if total > 0 {
        eprintln!("   Result: {total} warning(s)");
    }
}

/// Aligned `column: value` lines for a graph's statistics.
pub fn summary_text(graph: &BelGraph) -> String {
    let record = SummaryRecord::from_graph(graph);
    let columns = &SummaryRecord::COLUMNS[1..];
    let width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    columns
        .iter()
        .zip(record.values())
        .map(|(column, value)| format!("{column:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use belrepo_graph::{EdgeData, Function, Node, Relation};

    #[test]
    fn cached_graphs_leave_caches_alone() {
        let dir = tempfile::tempdir().unwrap();
        let doc = "SET DOCUMENT Name = \"A\"\nDEFINE NAMESPACE HGNC AS URL \"u\"\np(HGNC:A) isA p(HGNC:B)\n";
        std::fs::write(dir.path().join("a.bel"), doc).unwrap();
        let repo = Repository::open(dir.path()).unwrap();
        repo.get_graph(&GraphRequest::default()).unwrap();

        let table_path = repo.aggregate_cache().summary_table_path();
        let table_before = std::fs::read_to_string(&table_path).unwrap();
        std::fs::write(dir.path().join("b.bel"), doc).unwrap();

        let graphs = cached_graphs(&repo).unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].0, dir.path().join("a.bel"));
        assert!(!dir.path().join("b.bel.bincode").exists());
        assert_eq!(std::fs::read_to_string(&table_path).unwrap(), table_before);
    }

    #[test]
    fn summary_lists_every_statistic() {
        let mut g = BelGraph::new();
        g.document.name = "Corpus".to_string();
        g.add_edge(
            Node::new(Function::Protein, "HGNC", "A"),
            Relation::Increases,
            Node::new(Function::Protein, "HGNC", "B"),
            EdgeData::default(),
        );
        let text = summary_text(&g);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), SummaryRecord::COLUMNS.len() - 1);
        assert!(lines[0].starts_with("Title"));
        assert!(lines[0].ends_with("Corpus"));
        assert!(text.contains("Number of Nodes"));
        assert!(lines.iter().any(|l| l.starts_with("Number of Edges") && l.ends_with(" 1")));
    }
}
