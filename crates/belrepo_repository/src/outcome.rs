//! Per-document outcomes and the report of a repository pass.

use std::fmt;
use std::path::{Path, PathBuf};

use belrepo_cache::DocumentRef;
use belrepo_compiler::CompileError;
use belrepo_graph::{BelGraph, SummaryRecord};

/// Why a document produced no graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The document could not be read.
    Io(String),
    /// The document could not be parsed.
    Parse {
        /// 1-based line of the failure, 0 for document-level problems.
        line_number: usize,
        /// Description of the failure.
        message: String,
    },
    /// An external resource needed by the compiler failed.
    Resource(String),
    /// The enricher rejected the compiled graph.
    Enrichment(String),
}

impl SkipReason {
    /// Classifies a compiler failure.
    pub fn from_compile(err: &CompileError) -> Self {
        match err {
            CompileError::Io { source, .. } => SkipReason::Io(source.to_string()),
            CompileError::Parse {
                line_number,
                message,
                ..
            } => SkipReason::Parse {
                line_number: *line_number,
                message: message.clone(),
            },
            CompileError::Resource { message } => SkipReason::Resource(message.clone()),
        }
    }

    /// Classifies an enricher failure.
    pub fn from_enrichment(err: &CompileError) -> Self {
        SkipReason::Enrichment(err.to_string())
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Io(msg) => write!(f, "I/O error: {msg}"),
            SkipReason::Parse {
                line_number,
                message,
            } => write!(f, "parse error at line {line_number}: {message}"),
            SkipReason::Resource(msg) => write!(f, "resource error: {msg}"),
            SkipReason::Enrichment(msg) => write!(f, "enrichment failed: {msg}"),
        }
    }
}

/// What happened to one document during a pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Served from the per-document cache.
    Cached,
    /// Compiled and written to the per-document cache.
    Compiled,
    /// No graph was produced.
    Skipped(SkipReason),
}

/// Result of a pass over every document.
#[derive(Debug, Default)]
pub struct GraphsReport {
    /// Graphs with their absolute document path, in discovery order.
    pub graphs: Vec<(PathBuf, BelGraph)>,
    /// Outcome per document, in discovery order.
    pub outcomes: Vec<(DocumentRef, DocumentOutcome)>,
}

impl GraphsReport {
    /// The graph compiled or loaded for the document at `path`.
    pub fn get(&self, path: &Path) -> Option<&BelGraph> {
        self.graphs
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, graph)| graph)
    }

    /// The graphs alone, in discovery order.
    pub fn values(&self) -> impl Iterator<Item = &BelGraph> {
        self.graphs.iter().map(|(_, graph)| graph)
    }

    /// Records the graph of a document.
    ///
    /// A path seen before is replaced in place, so the later graph wins.
    pub fn insert(&mut self, path: PathBuf, graph: BelGraph) {
        match self.graphs.iter_mut().find(|(p, _)| *p == path) {
            Some(slot) => slot.1 = graph,
            None => self.graphs.push((path, graph)),
        }
    }

    /// Documents that produced no graph, with the reason.
    pub fn skipped(&self) -> Vec<(&DocumentRef, &SkipReason)> {
        self.outcomes
            .iter()
            .filter_map(|(doc, outcome)| match outcome {
                DocumentOutcome::Skipped(reason) => Some((doc, reason)),
                _ => None,
            })
            .collect()
    }

    /// Number of documents served from cache.
    pub fn cached_count(&self) -> usize {
        self.count(|o| matches!(o, DocumentOutcome::Cached))
    }

    /// Number of documents compiled in this pass.
    pub fn compiled_count(&self) -> usize {
        self.count(|o| matches!(o, DocumentOutcome::Compiled))
    }

    /// Total warnings over all graphs.
    pub fn warning_count(&self) -> usize {
        self.values().map(BelGraph::number_of_warnings).sum()
    }

    /// One summary row per graph in discovery order, keyed by path relative to `root`.
    pub fn summary_rows(&self, root: &Path) -> Vec<(PathBuf, SummaryRecord)> {
        self.graphs
            .iter()
            .map(|(path, graph)| {
                let rel = path.strip_prefix(root).unwrap_or(path.as_path()).to_path_buf();
                (rel, SummaryRecord::from_graph(graph))
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&DocumentOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> GraphsReport {
        let mut r = GraphsReport::default();
        r.insert(PathBuf::from("/repo/a.bel"), BelGraph::new());
        r.insert(PathBuf::from("/repo/sub/b.bel"), BelGraph::new());
        r.outcomes = vec![
            (DocumentRef::new("/repo", "a.bel"), DocumentOutcome::Cached),
            (DocumentRef::new("/repo/sub", "b.bel"), DocumentOutcome::Compiled),
            (
                DocumentRef::new("/repo", "c.bel"),
                DocumentOutcome::Skipped(SkipReason::Resource("offline".to_string())),
            ),
        ];
        r
    }

    #[test]
    fn counts() {
        let r = report();
        assert_eq!(r.cached_count(), 1);
        assert_eq!(r.compiled_count(), 1);
        let skipped = r.skipped();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0.file_name, "c.bel");
    }

    #[test]
    fn summary_rows_are_relative() {
        let rows = report().summary_rows(Path::new("/repo"));
        let paths: Vec<&Path> = rows.iter().map(|(p, _)| p.as_path()).collect();
        assert_eq!(paths, vec![Path::new("a.bel"), Path::new("sub/b.bel")]);
    }

    #[test]
    fn rows_follow_insertion_not_path_order() {
        let mut r = GraphsReport::default();
        r.insert(PathBuf::from("/repo/z.bel"), BelGraph::new());
        r.insert(PathBuf::from("/repo/a/y.bel"), BelGraph::new());
        let rows = r.summary_rows(Path::new("/repo"));
        let paths: Vec<&Path> = rows.iter().map(|(p, _)| p.as_path()).collect();
        assert_eq!(paths, vec![Path::new("z.bel"), Path::new("a/y.bel")]);
    }

    #[test]
    fn insert_replaces_same_path() {
        let mut r = GraphsReport::default();
        r.insert(PathBuf::from("/repo/a.bel"), BelGraph::new());
        let mut named = BelGraph::new();
        named.document.name = "second".to_string();
        r.insert(PathBuf::from("/repo/a.bel"), named);
        assert_eq!(r.graphs.len(), 1);
        assert_eq!(
            r.get(Path::new("/repo/a.bel")).map(|g| g.document.name.as_str()),
            Some("second")
        );
    }

    #[test]
    fn classify_compile_errors() {
        let parse = CompileError::Parse {
            path: PathBuf::from("a.bel"),
            line_number: 3,
            message: "bad".to_string(),
        };
        assert_eq!(
            SkipReason::from_compile(&parse),
            SkipReason::Parse {
                line_number: 3,
                message: "bad".to_string()
            }
        );
        let io = CompileError::Io {
            path: PathBuf::from("a.bel"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(matches!(SkipReason::from_compile(&io), SkipReason::Io(_)));
        let enrich = CompileError::Resource {
            message: "service down".to_string(),
        };
        assert!(matches!(
            SkipReason::from_enrichment(&enrich),
            SkipReason::Enrichment(_)
        ));
    }

    #[test]
    fn reason_display() {
        let r = SkipReason::Parse {
            line_number: 4,
            message: "naked name".to_string(),
        };
        assert_eq!(r.to_string(), "parse error at line 4: naked name");
    }
}
