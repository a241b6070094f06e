//! Compilation of BEL documents into [`BelGraph`](belrepo_graph::BelGraph)s.
//!
//! The repository layer only sees the [`Compiler`] and [`Enricher`] traits:
//! compilation is an opaque, fallible step. [`BelCompiler`] is the default
//! implementation, a line-oriented reader for a practical subset of BEL v2.
//!
//! # Architecture
//!
//! - **Source** ([`source`]): joins continuation lines and drops comments.
//! - **Values** ([`value`]): quoted strings and `{...}` lists.
//! - **Terms** ([`term`]): `fn(NS:name)` terms.
//! - **Parser** ([`parser`]): the control-statement state machine and the
//!   statement reader that builds the graph.

#![warn(missing_docs)]

pub mod compiler;
pub mod error;
pub mod options;
pub mod parser;
pub mod source;
pub mod term;
pub mod value;

pub use compiler::{Compiler, Enricher};
pub use error::CompileError;
pub use options::{CompileOptions, CompileOverrides};
pub use parser::{parse_document, BelCompiler};
