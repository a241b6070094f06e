//! Per-document and aggregate graph caches.
//!
//! Compiled graphs are persisted next to their source documents in every
//! configured [`Format`], and the union of a repository's graphs is persisted
//! under a single base name in the output directory. A cache file that exists
//! is valid; there is no timestamp comparison. Every file is written through
//! a temporary file and renamed into place.
//!
//! - [`FormatRegistry`] orders the formats: read precedence and write fan-out.
//! - [`CacheStore`] reads, writes and invalidates one `(directory, base_name)` key.
//! - [`DocumentCache`] adds the warnings table for a [`DocumentRef`].
//! - [`AggregateCache`] adds the summary table for the whole repository.

#![warn(missing_docs)]

pub mod aggregate;
pub mod artifact;
pub mod atomic;
pub mod codec;
pub mod document;
pub mod error;
pub mod format;
pub mod hash;
pub mod settings;
pub mod store;
pub mod table;

pub use aggregate::{summary_table, AggregateCache};
pub use document::{DocumentCache, DocumentRef};
pub use error::CacheError;
pub use format::{Format, FormatRegistry, WriteOptions};
pub use hash::ContentHash;
pub use settings::CacheSettings;
pub use store::CacheStore;
pub use table::Table;
