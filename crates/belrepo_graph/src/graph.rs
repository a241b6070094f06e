//! The compiled BEL graph and graph union.

use crate::descriptor::{Definitions, Descriptor};
use crate::model::{EdgeData, EdgeKey, Node, Relation};
use crate::nodelink::NodeLink;
use belrepo_diagnostics::CompilationWarning;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// The compiled form of one BEL document (or of a whole repository).
///
/// Nodes form a set and edges a map keyed by [`EdgeKey`], so inserting a
/// duplicate node is a no-op and inserting a duplicate edge merges its
/// [`EdgeData`]. Serialized through [`NodeLink`] so every format sees the
/// same document shape.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "NodeLink", try_from = "NodeLink")]
pub struct BelGraph {
    /// Document metadata.
    pub document: Descriptor,
    /// Namespace and annotation definitions.
    pub definitions: Definitions,
    /// Warnings collected while compiling.
    pub warnings: Vec<CompilationWarning>,
    /// Path of the source document relative to the repository root.
    pub provenance: Option<PathBuf>,
    nodes: BTreeSet<Node>,
    edges: BTreeMap<EdgeKey, EdgeData>,
}

impl std::fmt::Debug for BelGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BelGraph")
            .field("name", &self.document.name)
            .field("node_count", &self.nodes.len())
            .field("edge_count", &self.edges.len())
            .field("warnings", &self.warnings.len())
            .finish()
    }
}

impl BelGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: Node) -> bool {
        self.nodes.insert(node)
    }

    /// Adds an edge, inserting both endpoints.
    ///
    /// If an edge with the same key exists, `data` is merged into it.
    pub fn add_edge(&mut self, source: Node, relation: Relation, target: Node, data: EdgeData) {
        self.nodes.insert(source.clone());
        self.nodes.insert(target.clone());
        let key = EdgeKey {
            source,
            relation,
            target,
        };
        self.merge_edge(key, &data);
    }

    fn merge_edge(&mut self, key: EdgeKey, data: &EdgeData) {
        match self.edges.get_mut(&key) {
            Some(existing) => existing.merge(data),
            None => {
                self.edges.insert(key, data.clone());
            }
        }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over nodes in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterates over edges in key order.
    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, &EdgeData)> {
        self.edges.iter()
    }

    /// Returns `true` if the node is in the graph.
    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    /// Looks up the attributes of an edge.
    pub fn edge(&self, key: &EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    /// Number of compilation warnings carried by this graph.
    pub fn number_of_warnings(&self) -> usize {
        self.warnings.len()
    }

    /// All distinct citations referenced by any edge.
    pub fn citations(&self) -> BTreeSet<&str> {
        self.edges
            .values()
            .flat_map(|d| d.citations.iter().map(String::as_str))
            .collect()
    }

    /// Merges another graph's nodes, edges and definitions into this one.
    ///
    /// Descriptor, warnings and provenance of `self` are left as they are.
    pub fn merge(&mut self, other: &BelGraph) {
        self.nodes.extend(other.nodes.iter().cloned());
        for (key, data) in &other.edges {
            self.merge_edge(key.clone(), data);
        }
        self.definitions.merge(&other.definitions);
    }
}

/// Computes the union of a sequence of graphs.
///
/// Node sets are unioned, duplicate edges have their attributes merged, and
/// definitions are merged with later graphs winning on conflicting entries.
/// The result takes its descriptor from the first graph and carries no
/// warnings or provenance of its own.
pub fn union<'a, I>(graphs: I) -> BelGraph
where
    I: IntoIterator<Item = &'a BelGraph>,
{
    let mut iter = graphs.into_iter();
    let mut result = BelGraph::new();
    if let Some(first) = iter.next() {
        result.document = first.document.clone();
        result.merge(first);
    }
    for graph in iter {
        result.merge(graph);
    }
    result
}

pub(crate) fn from_parts(
    document: Descriptor,
    definitions: Definitions,
    warnings: Vec<CompilationWarning>,
    provenance: Option<PathBuf>,
    nodes: BTreeSet<Node>,
    edges: BTreeMap<EdgeKey, EdgeData>,
) -> BelGraph {
    BelGraph {
        document,
        definitions,
        warnings,
        provenance,
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Function;

    fn p(name: &str) -> Node {
        Node::new(Function::Protein, "HGNC", name)
    }

    fn cited(citation: &str) -> EdgeData {
        let mut data = EdgeData::default();
        data.citations.insert(citation.to_string());
        data
    }

    #[test]
    fn add_edge_inserts_endpoints() {
        let mut g = BelGraph::new();
        g.add_edge(p("EGF"), Relation::Increases, p("EGFR"), EdgeData::default());
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_node(&p("EGF")));
    }

    #[test]
    fn duplicate_edge_merges_attributes() {
        let mut g = BelGraph::new();
        g.add_edge(p("EGF"), Relation::Increases, p("EGFR"), cited("PubMed:1"));
        g.add_edge(p("EGF"), Relation::Increases, p("EGFR"), cited("PubMed:2"));
        assert_eq!(g.edge_count(), 1);
        let key = EdgeKey {
            source: p("EGF"),
            relation: Relation::Increases,
            target: p("EGFR"),
        };
        assert_eq!(g.edge(&key).unwrap().citations.len(), 2);
        assert_eq!(g.citations().len(), 2);
    }

    #[test]
    fn duplicate_node_is_noop() {
        let mut g = BelGraph::new();
        assert!(g.add_node(p("A")));
        assert!(!g.add_node(p("A")));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn union_of_disjoint_graphs() {
        let mut a = BelGraph::new();
        a.document.name = "A".to_string();
        a.add_edge(p("A1"), Relation::Increases, p("A2"), EdgeData::default());
        a.add_edge(p("A2"), Relation::Decreases, p("A3"), EdgeData::default());

        let mut b = BelGraph::new();
        b.document.name = "B".to_string();
        b.add_edge(p("B1"), Relation::Association, p("B2"), EdgeData::default());

        let u = union([&a, &b]);
        assert_eq!(u.node_count(), 5);
        assert_eq!(u.edge_count(), 3);
        assert_eq!(u.document.name, "A");
        assert!(u.warnings.is_empty());
        assert!(u.provenance.is_none());
    }

    #[test]
    fn union_contains_every_input_node() {
        let mut a = BelGraph::new();
        a.add_edge(p("X"), Relation::Increases, p("Y"), cited("PubMed:1"));
        let mut b = BelGraph::new();
        b.add_edge(p("X"), Relation::Increases, p("Y"), cited("PubMed:2"));
        b.add_node(p("Z"));

        let u = union([&a, &b]);
        for g in [&a, &b] {
            assert!(g.nodes().all(|n| u.contains_node(n)));
        }
        assert_eq!(u.edge_count(), 1);
        assert_eq!(u.citations().len(), 2);
    }

    #[test]
    fn union_of_nothing_is_empty() {
        let u = union(std::iter::empty::<&BelGraph>());
        assert!(u.is_empty());
        assert_eq!(u.edge_count(), 0);
    }

    #[test]
    fn debug_is_compact() {
        let g = BelGraph::new();
        let s = format!("{g:?}");
        assert!(s.contains("node_count"));
    }
}
