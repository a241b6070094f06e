//! Error types for graph reconstruction.

/// Errors raised when rebuilding a graph from its node-link form.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A link refers to a node index past the end of the node list.
    #[error("link {link} references missing node index {index} ({nodes} nodes)")]
    DanglingLink {
        /// Position of the link in the link list.
        link: usize,
        /// The out-of-range node index.
        index: usize,
        /// Number of nodes in the document.
        nodes: usize,
    },
}
