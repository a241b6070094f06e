//! Observation of a repository pass.

use belrepo_cache::DocumentRef;

use crate::outcome::{DocumentOutcome, GraphsReport};

/// Receives notifications while documents are processed.
///
/// Purely observational: implementations cannot change what is compiled
/// or cached.
pub trait Progress {
    /// A document is about to be processed. `index` counts from 0.
    fn on_document(&mut self, _index: usize, _doc: &DocumentRef) {}

    /// A document has been processed.
    fn on_outcome(&mut self, _doc: &DocumentRef, _outcome: &DocumentOutcome) {}

    /// Every document has been processed.
    fn on_finish(&mut self, _report: &GraphsReport) {}
}

/// A [`Progress`] that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}
