//! The compilation and enrichment seams used by the repository.

use crate::error::CompileError;
use crate::options::CompileOptions;
use belrepo_graph::BelGraph;
use std::path::Path;

/// Turns one document into a graph.
///
/// Implementations must not write anything next to the document; caching is
/// the caller's job. Closures with the matching signature implement this
/// trait, which keeps test doubles short.
pub trait Compiler {
    /// Compiles the document at `path`.
    fn compile(&self, path: &Path, options: &CompileOptions) -> Result<BelGraph, CompileError>;
}

impl<F> Compiler for F
where
    F: Fn(&Path, &CompileOptions) -> Result<BelGraph, CompileError>,
{
    fn compile(&self, path: &Path, options: &CompileOptions) -> Result<BelGraph, CompileError> {
        self(path, options)
    }
}

/// Post-processes a freshly compiled graph, e.g. filling in citation details.
pub trait Enricher {
    /// Enriches `graph` in place.
    fn enrich(&self, graph: &mut BelGraph) -> Result<(), CompileError>;
}

impl<F> Enricher for F
where
    F: Fn(&mut BelGraph) -> Result<(), CompileError>,
{
    fn enrich(&self, graph: &mut BelGraph) -> Result<(), CompileError> {
        self(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_compiler() {
        let compiler = |path: &Path, _: &CompileOptions| {
            let mut g = BelGraph::new();
            g.document.name = path.display().to_string();
            Ok::<_, CompileError>(g)
        };
        let g = compiler
            .compile(Path::new("x.bel"), &CompileOptions::default())
            .unwrap();
        assert_eq!(g.document.name, "x.bel");
    }

    #[test]
    fn closure_is_an_enricher() {
        let enricher = |g: &mut BelGraph| {
            g.document.version = "2".to_string();
            Ok::<_, CompileError>(())
        };
        let mut g = BelGraph::new();
        enricher.enrich(&mut g).unwrap();
        assert_eq!(g.document.version, "2");
    }
}
