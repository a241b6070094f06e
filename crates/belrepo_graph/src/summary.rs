//! Flat descriptive statistics of a graph.

use crate::graph::BelGraph;
use crate::model::Node;
use petgraph::algo::connected_components;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptive statistics of one graph, as written to `summary.json` and to
/// one row of the summary table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Document name.
    #[serde(rename = "Title")]
    pub title: String,
    /// Authors as written in the descriptor.
    #[serde(rename = "Authors")]
    pub authors: String,
    /// Namespaces defined by URL.
    #[serde(rename = "Number of URL Namespaces")]
    pub url_namespaces: usize,
    /// Namespaces defined by pattern.
    #[serde(rename = "Number of Regex Namespaces")]
    pub regex_namespaces: usize,
    /// Annotations defined by URL.
    #[serde(rename = "Number of URL Annotations")]
    pub url_annotations: usize,
    /// Annotations defined by pattern.
    #[serde(rename = "Number of Regex Annotations")]
    pub regex_annotations: usize,
    /// Annotations defined by a local list.
    #[serde(rename = "Number of Local Annotations")]
    pub local_annotations: usize,
    /// Node count.
    #[serde(rename = "Number of Nodes")]
    pub nodes: usize,
    /// Edge count.
    #[serde(rename = "Number of Edges")]
    pub edges: usize,
    /// Distinct citations over all edges.
    #[serde(rename = "Number of Citations")]
    pub citations: usize,
    /// Distinct authors in the descriptor.
    #[serde(rename = "Number of Authors")]
    pub number_of_authors: usize,
    /// Directed density `e / (n * (n - 1))`, zero for fewer than two nodes.
    #[serde(rename = "Network Density")]
    pub density: f64,
    /// Weakly connected components.
    #[serde(rename = "Number of Components")]
    pub components: usize,
    /// Compilation warnings.
    #[serde(rename = "Number of Warnings")]
    pub warnings: usize,
}

impl SummaryRecord {
    /// Column headers of the summary table, `Path` first.
    pub const COLUMNS: [&'static str; 15] = [
        "Path",
        "Title",
        "Authors",
        "Number of URL Namespaces",
        "Number of Regex Namespaces",
        "Number of URL Annotations",
        "Number of Regex Annotations",
        "Number of Local Annotations",
        "Number of Nodes",
        "Number of Edges",
        "Number of Citations",
        "Number of Authors",
        "Network Density",
        "Number of Components",
        "Number of Warnings",
    ];

    /// Computes the statistics of a graph.
    pub fn from_graph(graph: &BelGraph) -> Self {
        let n = graph.node_count();
        let e = graph.edge_count();
        let density = if n < 2 {
            0.0
        } else {
            e as f64 / (n as f64 * (n as f64 - 1.0))
        };

        Self {
            title: graph.document.name.clone(),
            authors: graph.document.authors.clone(),
            url_namespaces: graph.definitions.namespace_url.len(),
            regex_namespaces: graph.definitions.namespace_pattern.len(),
            url_annotations: graph.definitions.annotation_url.len(),
            regex_annotations: graph.definitions.annotation_pattern.len(),
            local_annotations: graph.definitions.annotation_list.len(),
            nodes: n,
            edges: e,
            citations: graph.citations().len(),
            number_of_authors: graph.document.author_list().len(),
            density,
            components: count_components(graph),
            warnings: graph.number_of_warnings(),
        }
    }

    /// Table cells in [`Self::COLUMNS`] order, after the `Path` column.
    pub fn values(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.authors.clone(),
            self.url_namespaces.to_string(),
            self.regex_namespaces.to_string(),
            self.url_annotations.to_string(),
            self.regex_annotations.to_string(),
            self.local_annotations.to_string(),
            self.nodes.to_string(),
            self.edges.to_string(),
            self.citations.to_string(),
            self.number_of_authors.to_string(),
            format!("{:.4}", self.density),
            self.components.to_string(),
            self.warnings.to_string(),
        ]
    }
}

fn count_components(graph: &BelGraph) -> usize {
    let mut g: DiGraph<(), ()> = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    let index: HashMap<&Node, NodeIndex> = graph.nodes().map(|n| (n, g.add_node(()))).collect();
    for (key, _) in graph.edges() {
        g.add_edge(index[&key.source], index[&key.target], ());
    }
    connected_components(&g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeData, Function, Relation};

    fn p(name: &str) -> Node {
        Node::new(Function::Protein, "HGNC", name)
    }

    #[test]
    fn empty_graph_statistics() {
        let s = SummaryRecord::from_graph(&BelGraph::new());
        assert_eq!(s.nodes, 0);
        assert_eq!(s.components, 0);
        assert_eq!(s.density, 0.0);
    }

    #[test]
    fn counts_components_ignoring_direction() {
        let mut g = BelGraph::new();
        g.add_edge(p("A"), Relation::Increases, p("B"), EdgeData::default());
        g.add_edge(p("C"), Relation::Decreases, p("B"), EdgeData::default());
        g.add_edge(p("X"), Relation::Association, p("Y"), EdgeData::default());
        g.add_node(p("Lonely"));
        let s = SummaryRecord::from_graph(&g);
        assert_eq!(s.nodes, 6);
        assert_eq!(s.edges, 3);
        assert_eq!(s.components, 3);
        assert!((s.density - 3.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn counts_definitions_and_authors() {
        let mut g = BelGraph::new();
        g.document.name = "EGF".to_string();
        g.document.authors = "Jane Doe, John Roe".to_string();
        g.definitions
            .namespace_url
            .insert("HGNC".to_string(), "http://x".to_string());
        g.definitions
            .annotation_list
            .insert("Confidence".to_string(), ["High".to_string()].into());
        let s = SummaryRecord::from_graph(&g);
        assert_eq!(s.title, "EGF");
        assert_eq!(s.url_namespaces, 1);
        assert_eq!(s.local_annotations, 1);
        assert_eq!(s.number_of_authors, 2);
        assert_eq!(s.values().len(), SummaryRecord::COLUMNS.len() - 1);
    }

    #[test]
    fn json_uses_table_headers() {
        let s = SummaryRecord::from_graph(&BelGraph::new());
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"Number of Nodes\""));
        assert!(json.contains("\"Network Density\""));
    }
}
