//! Per-document cache files stored beside each source document.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use belrepo_graph::{BelGraph, SummaryRecord};

use crate::atomic::remove_if_exists;
use crate::error::CacheError;
use crate::format::Format;
use crate::settings::CacheSettings;
use crate::store::CacheStore;
use crate::table::Table;

/// Columns of a document's warnings table.
pub const WARNING_COLUMNS: [&str; 5] = ["Line Number", "Position", "Line", "Error", "Message"];

/// A source document: the directory containing it and its file name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentRef {
    /// Directory containing the document.
    pub directory: PathBuf,
    /// File name, including the `.bel` suffix.
    pub file_name: String,
}

impl DocumentRef {
    /// Creates a reference.
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Full path of the document.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Path relative to `root`, or the full path if it lies outside `root`.
    pub fn relative_to(&self, root: &Path) -> PathBuf {
        let path = self.path();
        match path.strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path,
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// Cache of compiled graphs for individual documents.
///
/// Files are named after the document: `egf.bel` is cached as
/// `egf.bel.bincode`, `egf.bel.nodelink.json` and so on, with an
/// `egf.bel.warnings.tsv` table when the compile produced warnings.
#[derive(Clone, Debug, Default)]
pub struct DocumentCache {
    store: CacheStore,
    clear_stale_warnings: bool,
}

impl DocumentCache {
    /// Creates a document cache from settings.
    pub fn new(settings: &CacheSettings) -> Self {
        Self {
            store: CacheStore::new(settings.formats.clone(), settings.write_options),
            clear_stale_warnings: settings.clear_stale_warnings,
        }
    }

    /// Reads the cached graph of a document, if any.
    pub fn read(&self, doc: &DocumentRef) -> Result<Option<BelGraph>, CacheError> {
        self.store.read(&doc.directory, &doc.file_name)
    }

    /// Writes a document's graph in every format, plus its warnings table.
    ///
    /// A warning-free write leaves an existing warnings table in place unless
    /// `clear_stale_warnings` is set.
    pub fn write(&self, doc: &DocumentRef, graph: &BelGraph) -> Result<(), CacheError> {
        self.store.write(&doc.directory, &doc.file_name, graph)?;

        let warnings_path = self.warnings_path(doc);
        if !graph.warnings.is_empty() {
            warnings_table(graph).write(&warnings_path)?;
            tracing::debug!(
                path = %warnings_path.display(),
                count = graph.number_of_warnings(),
                "wrote warnings table"
            );
        } else if self.clear_stale_warnings && remove_if_exists(&warnings_path)? {
            tracing::debug!(path = %warnings_path.display(), "removed stale warnings table");
        }
        Ok(())
    }

    /// Deletes every cache file of a document, including its warnings table.
    ///
    /// Returns the number of files removed. The source is never touched.
    pub fn invalidate(&self, doc: &DocumentRef) -> Result<usize, CacheError> {
        let mut removed = self.store.invalidate(&doc.directory, &doc.file_name)?;
        if remove_if_exists(&self.warnings_path(doc))? {
            removed += 1;
        }
        Ok(removed)
    }

    /// Formats with a cache file for this document.
    pub fn available_formats(&self, doc: &DocumentRef) -> BTreeSet<Format> {
        self.store.available_formats(&doc.directory, &doc.file_name)
    }

    /// Path of the document's warnings table.
    pub fn warnings_path(&self, doc: &DocumentRef) -> PathBuf {
        doc.directory.join(format!("{}.warnings.tsv", doc.file_name))
    }

    /// Returns `true` if a warnings table exists for this document.
    pub fn has_warnings(&self, doc: &DocumentRef) -> bool {
        self.warnings_path(doc).is_file()
    }

    /// Reads the cached statistics of a document.
    ///
    /// Uses the `summary.json` file when present, otherwise computes the
    /// record from a cached graph. `Ok(None)` if neither exists.
    pub fn read_summary(&self, doc: &DocumentRef) -> Result<Option<SummaryRecord>, CacheError> {
        self.store.read_summary(&doc.directory, &doc.file_name)
    }
}

fn warnings_table(graph: &BelGraph) -> Table {
    let mut table = Table::new(&WARNING_COLUMNS);
    for w in &graph.warnings {
        table.push(vec![
            w.line_number.to_string(),
            w.position.to_string(),
            w.line.clone(),
            w.kind.class_name().to_string(),
            w.message.clone(),
        ]);
    }
    table
}
