//! Error types for document compilation.

use std::path::PathBuf;

/// Errors that prevent a document from producing a graph.
///
/// Recoverable problems are not errors; they are recorded as warnings on
/// the graph instead.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The document could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The document path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document could not be parsed (or a warning was raised in strict mode).
    #[error("{path}:{line_number}: {message}")]
    Parse {
        /// The document path.
        path: PathBuf,
        /// 1-based line of the failure, 0 for document-level problems.
        line_number: usize,
        /// Description of the failure.
        message: String,
    },

    /// An external resource (namespace, annotation, enrichment service) failed.
    #[error("resource error: {message}")]
    Resource {
        /// Description of the failure.
        message: String,
    },
}
