//! Error types for repository operations.

use belrepo_cache::CacheError;
use belrepo_config::ConfigError;

/// Errors that abort a repository operation.
///
/// Compilation failures are not among them; they become
/// [`SkipReason`](crate::SkipReason)s in the report.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A cache file could not be read, decoded or written.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The repository configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
