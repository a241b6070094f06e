//! Node-link document form of a graph.
//!
//! This is the shape written by every graph format: graph-level data, a node
//! list, and links that reference nodes by index. It avoids structured map
//! keys, which JSON cannot represent.

use crate::descriptor::{Definitions, Descriptor};
use crate::error::GraphError;
use crate::graph::{self, BelGraph};
use crate::model::{EdgeData, EdgeKey, Node, Relation};
use belrepo_diagnostics::CompilationWarning;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

/// Serializable node-link document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeLink {
    /// Graph-level attributes.
    pub graph: GraphData,
    /// Nodes, in sorted order.
    pub nodes: Vec<Node>,
    /// Edges referencing `nodes` by index.
    pub links: Vec<Link>,
}

/// Graph-level attributes of a node-link document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Document metadata.
    pub document: Descriptor,
    /// Namespace and annotation definitions.
    pub definitions: Definitions,
    /// Compilation warnings.
    pub warnings: Vec<CompilationWarning>,
    /// Source path relative to the repository root.
    pub provenance: Option<PathBuf>,
}

/// One edge of a node-link document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Index of the subject node.
    pub source: usize,
    /// Index of the object node.
    pub target: usize,
    /// The relationship.
    pub relation: Relation,
    /// Edge attributes.
    pub data: EdgeData,
}

impl From<BelGraph> for NodeLink {
    fn from(graph: BelGraph) -> Self {
        let nodes: Vec<Node> = graph.nodes().cloned().collect();
        let index: HashMap<&Node, usize> = nodes.iter().enumerate().map(|(i, n)| (n, i)).collect();

        let links = graph
            .edges()
            .map(|(key, data)| Link {
                source: index[&key.source],
                target: index[&key.target],
                relation: key.relation,
                data: data.clone(),
            })
            .collect();

        NodeLink {
            graph: GraphData {
                document: graph.document.clone(),
                definitions: graph.definitions.clone(),
                warnings: graph.warnings.clone(),
                provenance: graph.provenance.clone(),
            },
            nodes,
            links,
        }
    }
}

impl TryFrom<NodeLink> for BelGraph {
    type Error = GraphError;

    fn try_from(doc: NodeLink) -> Result<Self, Self::Error> {
        let node_count = doc.nodes.len();
        let lookup = |link: usize, index: usize| {
            doc.nodes.get(index).cloned().ok_or(GraphError::DanglingLink {
                link,
                index,
                nodes: node_count,
            })
        };

        let mut edges: BTreeMap<EdgeKey, EdgeData> = BTreeMap::new();
        for (i, link) in doc.links.iter().enumerate() {
            let key = EdgeKey {
                source: lookup(i, link.source)?,
                relation: link.relation,
                target: lookup(i, link.target)?,
            };
            edges.entry(key).or_default().merge(&link.data);
        }

        let nodes: BTreeSet<Node> = doc.nodes.iter().cloned().collect();
        Ok(graph::from_parts(
            doc.graph.document,
            doc.graph.definitions,
            doc.graph.warnings,
            doc.graph.provenance,
            nodes,
            edges,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Function;
    use belrepo_diagnostics::WarningKind;

    fn sample() -> BelGraph {
        let mut g = BelGraph::new();
        g.document.name = "EGF".to_string();
        g.provenance = Some(PathBuf::from("signaling/egf.bel"));
        let mut data = EdgeData::default();
        data.citations.insert("PubMed:1".to_string());
        g.add_edge(
            Node::new(Function::Protein, "HGNC", "EGF"),
            Relation::Increases,
            Node::new(Function::Protein, "HGNC", "EGFR"),
            data,
        );
        g.add_node(Node::naked(Function::Rna, "lonely"));
        g.warnings.push(CompilationWarning::new(
            WarningKind::NakedName,
            4,
            "r(lonely)",
            "naked name 'lonely'",
        ));
        g
    }

    #[test]
    fn links_reference_sorted_nodes() {
        let doc = NodeLink::from(sample());
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.links.len(), 1);
        let link = &doc.links[0];
        assert_eq!(doc.nodes[link.source].name, "EGF");
        assert_eq!(doc.nodes[link.target].name, "EGFR");
    }

    #[test]
    fn json_roundtrip_preserves_graph() {
        let g = sample();
        let json = serde_json::to_string(&g).unwrap();
        let back: BelGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
        assert_eq!(back.provenance, Some(PathBuf::from("signaling/egf.bel")));
        assert_eq!(back.number_of_warnings(), 1);
    }

    #[test]
    fn dangling_link_rejected() {
        let mut doc = NodeLink::from(sample());
        doc.links[0].target = 42;
        let err = BelGraph::try_from(doc).unwrap_err();
        assert!(matches!(err, GraphError::DanglingLink { index: 42, .. }));
    }
}
