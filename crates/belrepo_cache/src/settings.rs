//! Cache settings shared by the document and aggregate caches.

use crate::format::{FormatRegistry, WriteOptions};

/// Default base name of the aggregate cache.
pub const DEFAULT_CACHE_NAME: &str = "_cache.bel";

/// How and where graphs are cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSettings {
    /// Base name of the aggregate cache files in the output directory.
    pub cache_name: String,
    /// Formats in read-precedence order.
    pub formats: FormatRegistry,
    /// Serialization settings.
    pub write_options: WriteOptions,
    /// Delete a document's warnings table on a warning-free write.
    pub clear_stale_warnings: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            formats: FormatRegistry::default(),
            write_options: WriteOptions::default(),
            clear_stale_warnings: false,
        }
    }
}
