//! Serialization formats and their ordered registry.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use belrepo_graph::{BelGraph, SummaryRecord};

use crate::atomic::write_atomic;
use crate::codec;
use crate::error::CacheError;

/// Per-call serialization settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indent JSON output.
    pub pretty: bool,
    /// Gzip level, 0 to 9.
    pub compression: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            compression: 6,
        }
    }
}

/// A named serialization of a graph.
///
/// The identifier doubles as the file extension: a graph cached under base
/// name `egf.bel` in format `nodelink.json` lives at `egf.bel.nodelink.json`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Format {
    /// Framed bincode snapshot of the node-link document.
    Bincode,
    /// Node-link JSON.
    NodeLinkJson,
    /// Gzip-compressed node-link JSON.
    NodeLinkJsonGz,
    /// JSON [`SummaryRecord`]; cannot be read back into a graph.
    SummaryJson,
}

impl Format {
    /// Every known format.
    pub const ALL: [Format; 4] = [
        Format::Bincode,
        Format::NodeLinkJson,
        Format::NodeLinkJsonGz,
        Format::SummaryJson,
    ];

    /// The configuration identifier and file extension.
    pub fn id(self) -> &'static str {
        match self {
            Format::Bincode => "bincode",
            Format::NodeLinkJson => "nodelink.json",
            Format::NodeLinkJsonGz => "nodelink.json.gz",
            Format::SummaryJson => "summary.json",
        }
    }

    /// Looks a format up by identifier.
    pub fn from_id(id: &str) -> Result<Self, CacheError> {
        Self::ALL
            .into_iter()
            .find(|f| f.id() == id)
            .ok_or_else(|| CacheError::UnknownFormat { id: id.to_string() })
    }

    /// Returns `true` if a graph can be read back from this format.
    pub fn is_readable(self) -> bool {
        !matches!(self, Format::SummaryJson)
    }

    /// Cache file path for `base_name` in `directory`.
    pub fn path(self, directory: &Path, base_name: &str) -> PathBuf {
        directory.join(format!("{base_name}.{}", self.id()))
    }

    /// Writes `graph` to `path` atomically.
    pub fn write(self, graph: &BelGraph, path: &Path, options: &WriteOptions) -> Result<(), CacheError> {
        let bytes = match self {
            Format::Bincode => codec::encode_binary(graph)?,
            Format::NodeLinkJson => codec::encode_json(graph, options.pretty)?,
            Format::NodeLinkJsonGz => {
                codec::gzip(&codec::encode_json(graph, false)?, options.compression)?
            }
            Format::SummaryJson => {
                codec::encode_json(&SummaryRecord::from_graph(graph), options.pretty)?
            }
        };
        write_atomic(path, &bytes)
    }

    /// Reads a graph from `path`.
    ///
    /// Returns `Ok(None)` for write-only formats. A missing file is an I/O
    /// error here; callers check existence first.
    pub fn read(self, path: &Path) -> Result<Option<BelGraph>, CacheError> {
        if !self.is_readable() {
            return Ok(None);
        }
        let raw = std::fs::read(path).map_err(|e| CacheError::io(path, e))?;
        let graph = match self {
            Format::Bincode => codec::decode_binary(path, &raw)?,
            Format::NodeLinkJson => codec::decode_json(&raw)?,
            Format::NodeLinkJsonGz => codec::decode_json(&codec::gunzip(path, &raw)?)?,
            Format::SummaryJson => return Ok(None),
        };
        Ok(Some(graph))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The ordered list of formats in use.
///
/// Order is read precedence; every entry is written on each cache write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatRegistry {
    formats: Vec<Format>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self {
            formats: vec![Format::Bincode, Format::NodeLinkJson, Format::SummaryJson],
        }
    }
}

impl FormatRegistry {
    /// Builds a registry, rejecting empty lists, duplicates and lists with
    /// no readable format.
    pub fn new(formats: Vec<Format>) -> Result<Self, CacheError> {
        let invalid = |reason: String| CacheError::InvalidRegistry { reason };
        if formats.is_empty() {
            return Err(invalid("no formats configured".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = formats.iter().find(|f| !seen.insert(**f)) {
            return Err(invalid(format!("format '{dup}' listed more than once")));
        }
        if !formats.iter().any(|f| f.is_readable()) {
            return Err(invalid("at least one readable format is required".to_string()));
        }
        Ok(Self { formats })
    }

    /// Builds a registry from configuration identifiers.
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Result<Self, CacheError> {
        let formats = ids
            .iter()
            .map(|id| Format::from_id(id.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(formats)
    }

    /// All formats in order.
    pub fn iter(&self) -> impl Iterator<Item = Format> + '_ {
        self.formats.iter().copied()
    }

    /// Readable formats in precedence order.
    pub fn readable(&self) -> impl Iterator<Item = Format> + '_ {
        self.iter().filter(|f| f.is_readable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use belrepo_diagnostics::{CompilationWarning, WarningKind};
    use belrepo_graph::{EdgeData, Function, Node, Relation};

    fn sample() -> BelGraph {
        let mut g = BelGraph::new();
        g.document.name = "EGF".to_string();
        g.document.authors = "Jane Doe".to_string();
        g.definitions
            .namespace_url
            .insert("HGNC".to_string(), "https://example.org/hgnc".to_string());
        let mut data = EdgeData::default();
        data.citations.insert("PubMed:1".to_string());
        data.annotations
            .entry("Species".to_string())
            .or_default()
            .insert("9606".to_string());
        g.add_edge(
            Node::new(Function::Protein, "HGNC", "EGF"),
            Relation::Increases,
            Node::new(Function::Protein, "HGNC", "EGFR"),
            data,
        );
        g.add_node(Node::naked(Function::Rna, "orphan"));
        g.warnings.push(CompilationWarning::new(
            WarningKind::NakedName,
            9,
            "r(orphan)",
            "naked name 'orphan'",
        ));
        g.provenance = Some(PathBuf::from("sub/egf.bel"));
        g
    }

    #[test]
    fn ids_roundtrip() {
        for f in Format::ALL {
            assert_eq!(Format::from_id(f.id()).unwrap(), f);
        }
        assert!(matches!(
            Format::from_id("graphml"),
            Err(CacheError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn path_rule() {
        let p = Format::NodeLinkJsonGz.path(Path::new("/repo/sub"), "egf.bel");
        assert_eq!(p, PathBuf::from("/repo/sub/egf.bel.nodelink.json.gz"));
    }

    #[test]
    fn every_readable_format_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let g = sample();
        for format in Format::ALL.into_iter().filter(|f| f.is_readable()) {
            let path = format.path(dir.path(), "egf.bel");
            format.write(&g, &path, &WriteOptions::default()).unwrap();
            let back = format.read(&path).unwrap().unwrap();
            assert_eq!(back, g, "format {format}");
            assert_eq!(back.node_count(), 3);
            assert_eq!(back.edge_count(), 1);
            assert_eq!(back.warnings, g.warnings);
            assert_eq!(back.document, g.document);
        }
    }

    #[test]
    fn summary_is_write_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = Format::SummaryJson.path(dir.path(), "egf.bel");
        Format::SummaryJson
            .write(&sample(), &path, &WriteOptions::default())
            .unwrap();
        assert!(path.exists());
        assert!(Format::SummaryJson.read(&path).unwrap().is_none());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Number of Nodes\": 3"));
    }

    #[test]
    fn corrupt_binary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = Format::Bincode.path(dir.path(), "egf.bel");
        std::fs::write(&path, b"not a snapshot").unwrap();
        assert!(Format::Bincode.read(&path).is_err());
    }

    #[test]
    fn default_registry_order() {
        let ids: Vec<&str> = FormatRegistry::default().iter().map(Format::id).collect();
        assert_eq!(ids, vec!["bincode", "nodelink.json", "summary.json"]);
    }

    #[test]
    fn registry_validation() {
        assert!(FormatRegistry::from_ids(&["summary.json"]).is_err());
        assert!(FormatRegistry::from_ids::<&str>(&[]).is_err());
        assert!(FormatRegistry::from_ids(&["bincode", "bincode"]).is_err());
        assert!(matches!(
            FormatRegistry::from_ids(&["yaml"]),
            Err(CacheError::UnknownFormat { .. })
        ));
        let r = FormatRegistry::from_ids(&["nodelink.json.gz", "summary.json"]).unwrap();
        assert_eq!(r.readable().collect::<Vec<_>>(), vec![Format::NodeLinkJsonGz]);
    }
}
