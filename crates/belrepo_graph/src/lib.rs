//! The compiled BEL graph and the operations the cache layers need on it.
//!
//! A [`BelGraph`] is the in-memory result of compiling one document: a set of
//! [`Node`]s, a map of edges keyed by [`EdgeKey`] with mergeable
//! [`EdgeData`], the document [`Descriptor`], namespace and annotation
//! [`Definitions`], compilation warnings, and a provenance tag. Graphs from a
//! repository are merged with [`union`], repository metadata is layered on
//! with [`MetadataOverlay::apply`], and [`SummaryRecord`] flattens a graph
//! into descriptive statistics.

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod graph;
pub mod model;
pub mod nodelink;
pub mod summary;

pub use descriptor::{serialize_authors, Definitions, Descriptor, MetadataOverlay};
pub use error::GraphError;
pub use graph::{union, BelGraph};
pub use model::{EdgeData, EdgeKey, Function, Node, Relation};
pub use nodelink::{GraphData, Link, NodeLink};
pub use summary::SummaryRecord;
