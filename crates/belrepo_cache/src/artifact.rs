//! Framing of binary snapshots.
//!
//! A snapshot is a 4-byte little-endian header length, a bincode-encoded
//! [`ArtifactHeader`], then the payload. The header carries magic bytes, the
//! framing version and a checksum of the payload, all verified on read.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::hash::ContentHash;

/// Magic bytes identifying a graph snapshot.
pub const ARTIFACT_MAGIC: [u8; 4] = *b"BELG";

/// Current snapshot format version. Increment on breaking changes to the
/// header or payload format.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Header prepended to every binary snapshot for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHeader {
    /// Magic bytes: must be `b"BELG"`.
    pub magic: [u8; 4],

    /// Snapshot format version.
    pub format_version: u32,

    /// Version of the tool that produced this snapshot.
    pub producer_version: String,

    /// Content hash of the payload data.
    pub checksum: ContentHash,
}

impl ArtifactHeader {
    fn for_payload(payload: &[u8]) -> Self {
        Self {
            magic: ARTIFACT_MAGIC,
            format_version: ARTIFACT_FORMAT_VERSION,
            producer_version: env!("CARGO_PKG_VERSION").to_string(),
            checksum: ContentHash::from_bytes(payload),
        }
    }
}

/// Frames a payload with a header.
pub fn encode_artifact(payload: &[u8]) -> Result<Vec<u8>, CacheError> {
    let header = ArtifactHeader::for_payload(payload);
    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    let header_len = header_bytes.len() as u32;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(payload);
    Ok(output)
}

/// Validates the header of a snapshot read from `path` and returns its payload.
pub fn decode_artifact<'a>(path: &Path, raw: &'a [u8]) -> Result<&'a [u8], CacheError> {
    let invalid = |reason: &str| CacheError::InvalidHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let len_bytes: [u8; 4] = raw
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| invalid("file too short for header length"))?;
    let header_len = u32::from_le_bytes(len_bytes) as usize;
    let header_bytes = raw
        .get(4..4 + header_len)
        .ok_or_else(|| invalid("truncated header"))?;

    let (header, _): (ArtifactHeader, usize) =
        bincode::serde::decode_from_slice(header_bytes, bincode::config::standard())
            .map_err(|e| invalid(&e.to_string()))?;

    if header.magic != ARTIFACT_MAGIC {
        return Err(invalid("bad magic bytes"));
    }
    if header.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(CacheError::VersionMismatch {
            path: path.to_path_buf(),
            expected: ARTIFACT_FORMAT_VERSION,
            actual: header.format_version,
        });
    }

    let payload = &raw[4 + header_len..];
    let actual = ContentHash::from_bytes(payload);
    if actual != header.checksum {
        return Err(CacheError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: header.checksum.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(header: &ArtifactHeader, payload: &[u8]) -> Vec<u8> {
        let header_bytes =
            bincode::serde::encode_to_vec(header, bincode::config::standard()).unwrap();
        let mut output = Vec::new();
        output.extend_from_slice(&(header_bytes.len() as u32).to_le_bytes());
        output.extend_from_slice(&header_bytes);
        output.extend_from_slice(payload);
        output
    }

    fn path() -> &'static Path {
        Path::new("doc.bel.bincode")
    }

    #[test]
    fn encode_decode_roundtrip() {
        let raw = encode_artifact(b"graph payload").unwrap();
        assert_eq!(decode_artifact(path(), &raw).unwrap(), b"graph payload");
    }

    #[test]
    fn garbage_is_invalid_header() {
        let err = decode_artifact(path(), b"garbage data").unwrap_err();
        assert!(matches!(err, CacheError::InvalidHeader { .. }));
    }

    #[test]
    fn truncated_length_is_invalid_header() {
        let err = decode_artifact(path(), b"AB").unwrap_err();
        assert!(matches!(err, CacheError::InvalidHeader { .. }));
    }

    #[test]
    fn wrong_magic_is_invalid_header() {
        let header = ArtifactHeader {
            magic: *b"BAAD",
            ..ArtifactHeader::for_payload(b"data")
        };
        let err = decode_artifact(path(), &framed(&header, b"data")).unwrap_err();
        assert!(matches!(err, CacheError::InvalidHeader { .. }));
    }

    #[test]
    fn wrong_version_is_version_mismatch() {
        let header = ArtifactHeader {
            format_version: 999,
            ..ArtifactHeader::for_payload(b"data")
        };
        let err = decode_artifact(path(), &framed(&header, b"data")).unwrap_err();
        assert!(matches!(
            err,
            CacheError::VersionMismatch { actual: 999, .. }
        ));
    }

    #[test]
    fn tampered_payload_is_checksum_mismatch() {
        let header = ArtifactHeader::for_payload(b"data");
        let err = decode_artifact(path(), &framed(&header, b"tampered")).unwrap_err();
        assert!(matches!(err, CacheError::ChecksumMismatch { .. }));
    }

    #[test]
    fn large_payload() {
        let data: Vec<u8> = (0..10_000).map(|i| (i % 256) as u8).collect();
        let raw = encode_artifact(&data).unwrap();
        assert_eq!(decode_artifact(path(), &raw).unwrap(), &data[..]);
    }
}
