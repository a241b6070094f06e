//! The repository-wide aggregate cache and summary table.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use belrepo_graph::{BelGraph, SummaryRecord};

use crate::error::CacheError;
use crate::format::Format;
use crate::settings::CacheSettings;
use crate::store::CacheStore;
use crate::table::Table;

/// Cache of the merged graph of a whole repository.
///
/// Files live in the output directory under the configured cache name, e.g.
/// `_cache.bel.bincode`, next to the summary table `_cache.bel.summary.tsv`.
#[derive(Clone, Debug)]
pub struct AggregateCache {
    store: CacheStore,
    directory: PathBuf,
    cache_name: String,
}

impl AggregateCache {
    /// Creates an aggregate cache in `directory`.
    pub fn new(settings: &CacheSettings, directory: impl Into<PathBuf>) -> Self {
        Self {
            store: CacheStore::new(settings.formats.clone(), settings.write_options),
            directory: directory.into(),
            cache_name: settings.cache_name.clone(),
        }
    }

    /// The output directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The base name of the aggregate files.
    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// Reads the cached aggregate graph, if any.
    pub fn read(&self) -> Result<Option<BelGraph>, CacheError> {
        self.store.read(&self.directory, &self.cache_name)
    }

    /// Writes the aggregate graph in every format.
    ///
    /// Creates the output directory if needed.
    pub fn write(&self, graph: &BelGraph) -> Result<(), CacheError> {
        self.ensure_dir()?;
        self.store.write(&self.directory, &self.cache_name, graph)?;
        tracing::info!(
            directory = %self.directory.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "wrote aggregate cache"
        );
        Ok(())
    }

    /// Deletes the aggregate cache files. The summary table is kept.
    pub fn invalidate(&self) -> Result<usize, CacheError> {
        let removed = self.store.invalidate(&self.directory, &self.cache_name)?;
        tracing::info!(removed, "cleared aggregate cache");
        Ok(removed)
    }

    /// Reads the aggregate statistics, preferring `{cache_name}.summary.json`.
    pub fn read_summary(&self) -> Result<Option<SummaryRecord>, CacheError> {
        self.store.read_summary(&self.directory, &self.cache_name)
    }

    /// Formats with an aggregate cache file.
    pub fn available_formats(&self) -> BTreeSet<Format> {
        self.store.available_formats(&self.directory, &self.cache_name)
    }

    /// Path of the summary table.
    pub fn summary_table_path(&self) -> PathBuf {
        self.directory.join(format!("{}.summary.tsv", self.cache_name))
    }

    /// Overwrites the summary table with one row per document.
    ///
    /// Returns the path written.
    pub fn write_summary_table(&self, rows: &[(PathBuf, SummaryRecord)]) -> Result<PathBuf, CacheError> {
        self.ensure_dir()?;
        let path = self.summary_table_path();
        summary_table(rows).write(&path)?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "wrote summary table");
        Ok(path)
    }

    fn ensure_dir(&self) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.directory).map_err(|e| CacheError::io(&self.directory, e))
    }
}

/// Builds the summary table: a `Path` column followed by the record columns.
pub fn summary_table(rows: &[(PathBuf, SummaryRecord)]) -> Table {
    let mut table = Table::new(&SummaryRecord::COLUMNS);
    for (path, record) in rows {
        let mut row = vec![path.display().to_string()];
        row.extend(record.values());
        table.push(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use belrepo_graph::{EdgeData, Function, Node, Relation};

    fn graph() -> BelGraph {
        let mut g = BelGraph::new();
        g.document.name = "Corpus".to_string();
        g.add_edge(
            Node::new(Function::Protein, "HGNC", "A"),
            Relation::Increases,
            Node::new(Function::Protein, "HGNC", "B"),
            EdgeData::default(),
        );
        g
    }

    #[test]
    fn roundtrip_in_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("build");
        let cache = AggregateCache::new(&CacheSettings::default(), &out);
        assert!(cache.read().unwrap().is_none());

        cache.write(&graph()).unwrap();
        assert!(out.join("_cache.bel.bincode").is_file());
        assert_eq!(cache.read().unwrap(), Some(graph()));
        assert_eq!(cache.available_formats().len(), 3);
    }

    #[test]
    fn summary_prefers_summary_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AggregateCache::new(&CacheSettings::default(), dir.path());
        assert!(cache.read_summary().unwrap().is_none());
        cache.write(&graph()).unwrap();

        // A corrupt graph file is never opened while the summary file exists.
        std::fs::write(dir.path().join("_cache.bel.bincode"), b"garbage").unwrap();
        let summary = cache.read_summary().unwrap().unwrap();
        assert_eq!(summary.title, "Corpus");
        assert_eq!((summary.nodes, summary.edges), (2, 1));
    }

    #[test]
    fn custom_cache_name() {
        let dir = tempfile::tempdir().unwrap();
        let settings = CacheSettings {
            cache_name: "_corpus.bel".to_string(),
            ..CacheSettings::default()
        };
        let cache = AggregateCache::new(&settings, dir.path());
        cache.write(&graph()).unwrap();
        assert!(dir.path().join("_corpus.bel.nodelink.json").is_file());
        assert_eq!(
            cache.summary_table_path(),
            dir.path().join("_corpus.bel.summary.tsv")
        );
    }

    #[test]
    fn invalidate_keeps_summary_table() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AggregateCache::new(&CacheSettings::default(), dir.path());
        cache.write(&graph()).unwrap();
        let rows = vec![(PathBuf::from("a.bel"), SummaryRecord::from_graph(&graph()))];
        cache.write_summary_table(&rows).unwrap();

        assert_eq!(cache.invalidate().unwrap(), 3);
        assert!(cache.read().unwrap().is_none());
        assert!(cache.summary_table_path().is_file());
    }

    #[test]
    fn summary_table_layout() {
        let rows = vec![
            (PathBuf::from("a.bel"), SummaryRecord::from_graph(&graph())),
            (PathBuf::from("sub/b.bel"), SummaryRecord::from_graph(&BelGraph::new())),
        ];
        let table = summary_table(&rows);
        assert_eq!(table.header[0], "Path");
        assert_eq!(table.header.len(), SummaryRecord::COLUMNS.len());
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1][0], "sub/b.bel");
        assert!(table.rows.iter().all(|r| r.len() == table.header.len()));
    }
}
