//! Discovery of BEL documents and synchronization of their caches.
//!
//! A [`Repository`] walks its root with a [`Discoverer`], serves each
//! document from its per-document cache or compiles it, and merges the
//! results into an aggregate graph that is itself cached. Documents that
//! fail to compile are skipped and reported, never fatal.

#![warn(missing_docs)]

pub mod discover;
pub mod error;
pub mod outcome;
pub mod progress;
pub mod repository;

pub use belrepo_cache::DocumentRef;
pub use discover::{Discoverer, Documents};
pub use error::RepositoryError;
pub use outcome::{DocumentOutcome, GraphsReport, SkipReason};
pub use progress::{NoProgress, Progress};
pub use repository::{AggregateReport, DocumentStatus, GraphRequest, Repository, RepositoryBuilder};
