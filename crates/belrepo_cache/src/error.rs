//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// A missing cache file is never an error; reads report it as `Ok(None)`.
/// A file that exists but cannot be decoded is reported here so that a
/// corrupt cache is never silently treated as valid or as a miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing cache files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A binary snapshot has an invalid or missing header.
    #[error("invalid artifact header in {path}: {reason}")]
    InvalidHeader {
        /// The artifact file path.
        path: PathBuf,
        /// Description of the header problem.
        reason: String,
    },

    /// The stored checksum does not match the computed checksum of the payload.
    #[error("checksum mismatch in {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The artifact file path.
        path: PathBuf,
        /// The expected checksum from the header.
        expected: String,
        /// The actual checksum computed from the payload.
        actual: String,
    },

    /// The artifact format version does not match the current version.
    #[error("version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The artifact file path.
        path: PathBuf,
        /// The expected format version.
        expected: u32,
        /// The actual format version found in the file.
        actual: u32,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },

    /// A gzip stream could not be decompressed.
    #[error("failed to decompress {path}: {reason}")]
    Decompression {
        /// The compressed file path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A format identifier is not known.
    #[error("unknown cache format '{id}'")]
    UnknownFormat {
        /// The identifier as written in the configuration.
        id: String,
    },

    /// A format registry is unusable (empty, duplicated, or write-only).
    #[error("invalid format list: {reason}")]
    InvalidRegistry {
        /// Description of the problem.
        reason: String,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = CacheError::io(
            "/tmp/repo/egf.bel.bincode",
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("egf.bel.bincode"));
    }

    #[test]
    fn invalid_header_display() {
        let err = CacheError::InvalidHeader {
            path: PathBuf::from("_cache.bel.bincode"),
            reason: "bad magic bytes".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid artifact header"));
        assert!(msg.contains("bad magic bytes"));
    }

    #[test]
    fn checksum_mismatch_display() {
        let err = CacheError::ChecksumMismatch {
            path: PathBuf::from("a.bel.bincode"),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("def456"));
    }

    #[test]
    fn version_mismatch_display() {
        let err = CacheError::VersionMismatch {
            path: PathBuf::from("a.bel.bincode"),
            expected: 1,
            actual: 2,
        };
        assert!(err.to_string().contains("expected 1, got 2"));
    }

    #[test]
    fn unknown_format_display() {
        let err = CacheError::UnknownFormat {
            id: "graphml".to_string(),
        };
        assert_eq!(err.to_string(), "unknown cache format 'graphml'");
    }
}
