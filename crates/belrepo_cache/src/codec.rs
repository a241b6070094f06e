//! Byte-level encoders and decoders behind each [`Format`](crate::Format).

use std::io::{Read, Write};
use std::path::Path;

use belrepo_graph::BelGraph;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;

use crate::artifact::{decode_artifact, encode_artifact};
use crate::error::CacheError;

fn serialization(e: impl std::fmt::Display) -> CacheError {
    CacheError::Serialization {
        reason: e.to_string(),
    }
}

/// Encodes a graph as a framed bincode snapshot.
pub fn encode_binary(graph: &BelGraph) -> Result<Vec<u8>, CacheError> {
    let payload =
        bincode::serde::encode_to_vec(graph, bincode::config::standard()).map_err(serialization)?;
    encode_artifact(&payload)
}

/// Decodes a framed bincode snapshot read from `path`.
pub fn decode_binary(path: &Path, raw: &[u8]) -> Result<BelGraph, CacheError> {
    let payload = decode_artifact(path, raw)?;
    let (graph, _): (BelGraph, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())
            .map_err(serialization)?;
    Ok(graph)
}

/// Encodes any serializable value as JSON with object keys sorted.
pub fn encode_json<T: Serialize>(value: &T, pretty: bool) -> Result<Vec<u8>, CacheError> {
    // `Value` objects are ordered maps, so keys come out sorted at every level.
    let value = serde_json::to_value(value).map_err(serialization)?;
    let mut bytes = if pretty {
        serde_json::to_vec_pretty(&value)
    } else {
        serde_json::to_vec(&value)
    }
    .map_err(serialization)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decodes a node-link JSON document into a graph.
pub fn decode_json(raw: &[u8]) -> Result<BelGraph, CacheError> {
    serde_json::from_slice(raw).map_err(serialization)
}

/// Gzip-compresses `data` at `level` (0 to 9).
pub fn gzip(data: &[u8], level: u32) -> Result<Vec<u8>, CacheError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level.min(9)));
    encoder.write_all(data).map_err(serialization)?;
    encoder.finish().map_err(serialization)
}

/// Decompresses a gzip stream read from `path`.
pub fn gunzip(path: &Path, raw: &[u8]) -> Result<Vec<u8>, CacheError> {
    let mut decoder = GzDecoder::new(raw);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| CacheError::Decompression {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use belrepo_graph::{EdgeData, Function, Node, Relation};

    fn sample() -> BelGraph {
        let mut g = BelGraph::new();
        g.document.name = "EGF".to_string();
        g.add_edge(
            Node::new(Function::Protein, "HGNC", "EGF"),
            Relation::Increases,
            Node::new(Function::Protein, "HGNC", "EGFR"),
            EdgeData::default(),
        );
        g
    }

    #[test]
    fn binary_roundtrip() {
        let g = sample();
        let raw = encode_binary(&g).unwrap();
        assert_eq!(decode_binary(Path::new("x"), &raw).unwrap(), g);
    }

    #[test]
    fn json_is_node_link() {
        let raw = encode_json(&sample(), true).unwrap();
        let text = String::from_utf8(raw.clone()).unwrap();
        assert!(text.contains("\"links\""));
        assert!(text.contains("\"nodes\""));
        assert_eq!(decode_json(&raw).unwrap(), sample());
    }

    #[test]
    fn json_keys_are_sorted() {
        let raw = encode_json(&sample(), false).unwrap();
        let text = String::from_utf8(raw).unwrap();
        let at = |key: &str| text.find(&format!("\"{key}\"")).unwrap();
        assert!(at("graph") < at("links"));
        assert!(at("links") < at("nodes"));
        assert!(at("definitions") < at("document"));
        assert!(at("document") < at("provenance"));
        assert!(at("provenance") < at("warnings"));
    }

    #[test]
    fn gzip_roundtrip() {
        let data = encode_json(&sample(), false).unwrap();
        let packed = gzip(&data, 9).unwrap();
        assert_eq!(gunzip(Path::new("x.gz"), &packed).unwrap(), data);
    }

    #[test]
    fn gunzip_garbage_is_decompression_error() {
        let err = gunzip(Path::new("x.gz"), b"not gzip").unwrap_err();
        assert!(matches!(err, CacheError::Decompression { .. }));
    }

    #[test]
    fn bad_json_is_serialization_error() {
        let err = decode_json(b"{\"nodes\": 3}").unwrap_err();
        assert!(matches!(err, CacheError::Serialization { .. }));
    }
}
