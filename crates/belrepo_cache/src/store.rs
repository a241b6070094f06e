//! Multi-format persistence for one `(directory, base_name)` key.

use std::collections::BTreeSet;
use std::path::Path;

use belrepo_graph::{BelGraph, SummaryRecord};

use crate::atomic::remove_if_exists;
use crate::error::CacheError;
use crate::format::{Format, FormatRegistry, WriteOptions};

/// Reads, writes and invalidates graphs stored under a base name.
///
/// Shared by [`DocumentCache`](crate::DocumentCache), keyed by a document's
/// directory and file name, and [`AggregateCache`](crate::AggregateCache),
/// keyed by the output directory and the configured cache name.
#[derive(Clone, Debug, Default)]
pub struct CacheStore {
    registry: FormatRegistry,
    options: WriteOptions,
}

impl CacheStore {
    /// Creates a store over the given formats.
    pub fn new(registry: FormatRegistry, options: WriteOptions) -> Self {
        Self { registry, options }
    }

    /// Reads the first cached graph in registry order.
    ///
    /// Formats whose file does not exist are skipped. `Ok(None)` means no
    /// readable cache file exists. A file that exists but fails to decode is
    /// an error, not a miss.
    pub fn read(&self, directory: &Path, base_name: &str) -> Result<Option<BelGraph>, CacheError> {
        for format in self.registry.readable() {
            let path = format.path(directory, base_name);
            if !path.is_file() {
                continue;
            }
            if let Some(graph) = format.read(&path)? {
                tracing::debug!(path = %path.display(), %format, "cache hit");
                return Ok(Some(graph));
            }
        }
        Ok(None)
    }

    /// Reads the statistics stored under `base_name`.
    ///
    /// Uses the `summary.json` file when present, otherwise computes the
    /// record from a cached graph. `Ok(None)` if neither exists.
    pub fn read_summary(&self, directory: &Path, base_name: &str) -> Result<Option<SummaryRecord>, CacheError> {
        let path = Format::SummaryJson.path(directory, base_name);
        if path.is_file() {
            let raw = std::fs::read(&path).map_err(|e| CacheError::io(&path, e))?;
            let record = serde_json::from_slice(&raw).map_err(|e| CacheError::Serialization {
                reason: format!("{}: {e}", path.display()),
            })?;
            return Ok(Some(record));
        }
        Ok(self
            .read(directory, base_name)?
            .map(|g| SummaryRecord::from_graph(&g)))
    }

    /// Writes `graph` in every registered format, overwriting existing files.
    pub fn write(&self, directory: &Path, base_name: &str, graph: &BelGraph) -> Result<(), CacheError> {
        for format in self.registry.iter() {
            let path = format.path(directory, base_name);
            format.write(graph, &path, &self.options)?;
            tracing::debug!(path = %path.display(), %format, "wrote cache");
        }
        Ok(())
    }

    /// Deletes the cache file of every known format. Returns how many were removed.
    ///
    /// Formats no longer in the registry are removed too, so a changed
    /// format list cannot leave readable leftovers behind.
    pub fn invalidate(&self, directory: &Path, base_name: &str) -> Result<usize, CacheError> {
        let mut removed = 0;
        for format in Format::ALL {
            if remove_if_exists(&format.path(directory, base_name))? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Formats whose cache file currently exists.
    pub fn available_formats(&self, directory: &Path, base_name: &str) -> BTreeSet<Format> {
        Format::ALL
            .into_iter()
            .filter(|f| f.path(directory, base_name).is_file())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use belrepo_graph::{Function, Node};

    fn graph(name: &str) -> BelGraph {
        let mut g = BelGraph::new();
        g.document.name = name.to_string();
        g.add_node(Node::new(Function::Protein, "HGNC", name));
        g
    }

    #[test]
    fn write_fans_out_to_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::default();
        store.write(dir.path(), "a.bel", &graph("A")).unwrap();
        let formats = store.available_formats(dir.path(), "a.bel");
        assert_eq!(
            formats,
            BTreeSet::from([Format::Bincode, Format::NodeLinkJson, Format::SummaryJson])
        );
    }

    #[test]
    fn read_miss_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::default();
        assert!(store.read(dir.path(), "a.bel").unwrap().is_none());
    }

    #[test]
    fn read_follows_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::default();
        let opts = WriteOptions::default();
        Format::NodeLinkJson
            .write(&graph("json"), &Format::NodeLinkJson.path(dir.path(), "a.bel"), &opts)
            .unwrap();
        assert_eq!(
            store.read(dir.path(), "a.bel").unwrap().unwrap().document.name,
            "json"
        );

        Format::Bincode
            .write(&graph("binary"), &Format::Bincode.path(dir.path(), "a.bel"), &opts)
            .unwrap();
        assert_eq!(
            store.read(dir.path(), "a.bel").unwrap().unwrap().document.name,
            "binary"
        );
    }

    #[test]
    fn corrupt_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::default();
        std::fs::write(Format::Bincode.path(dir.path(), "a.bel"), b"junk").unwrap();
        assert!(store.read(dir.path(), "a.bel").is_err());
    }

    #[test]
    fn summary_only_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::default();
        Format::SummaryJson
            .write(
                &graph("A"),
                &Format::SummaryJson.path(dir.path(), "a.bel"),
                &WriteOptions::default(),
            )
            .unwrap();
        assert!(store.read(dir.path(), "a.bel").unwrap().is_none());
    }

    #[test]
    fn invalidate_then_read_misses() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::default();
        store.write(dir.path(), "a.bel", &graph("A")).unwrap();
        assert_eq!(store.invalidate(dir.path(), "a.bel").unwrap(), 3);
        assert!(store.read(dir.path(), "a.bel").unwrap().is_none());
        assert!(store.available_formats(dir.path(), "a.bel").is_empty());
        assert_eq!(store.invalidate(dir.path(), "a.bel").unwrap(), 0);
    }
}
