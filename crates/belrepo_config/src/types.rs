//! Configuration types deserialized from `bel-repository.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Default base name of the aggregate cache.
pub const DEFAULT_CACHE_NAME: &str = "_cache.bel";

/// Default format identifiers, in read-precedence order.
pub const DEFAULT_FORMATS: [&str; 3] = ["bincode", "nodelink.json", "summary.json"];

/// The top-level repository configuration parsed from `bel-repository.toml`.
///
/// Every section is optional; an empty file is equivalent to the defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Cache layout settings.
    #[serde(default)]
    pub repository: RepositorySection,
    /// Repository-level metadata layered over the aggregate graph.
    #[serde(default)]
    pub metadata: MetadataSection,
    /// Default compile options.
    #[serde(default)]
    pub compile: CompileSection,
    /// Serialization settings.
    #[serde(default)]
    pub output: OutputSection,
}

/// The `[repository]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RepositorySection {
    /// Base name of the aggregate cache files.
    #[serde(default = "default_cache_name")]
    pub cache_name: String,
    /// Directory for aggregate artifacts, relative to the root when not absolute.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
    /// Format identifiers in read-precedence order.
    #[serde(default = "default_formats", deserialize_with = "deserialize_string_or_vec")]
    pub formats: Vec<String>,
    /// Delete a document's warnings table when it is recompiled without warnings.
    #[serde(default)]
    pub clear_stale_warnings: bool,
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self {
            cache_name: default_cache_name(),
            output_directory: None,
            formats: default_formats(),
            clear_stale_warnings: false,
        }
    }
}

fn default_cache_name() -> String {
    DEFAULT_CACHE_NAME.to_string()
}

fn default_formats() -> Vec<String> {
    DEFAULT_FORMATS.iter().map(|s| s.to_string()).collect()
}

/// The `[metadata]` section. Empty or absent fields do not override.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetadataSection {
    /// Corpus name.
    pub name: Option<String>,
    /// Corpus version.
    pub version: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Authors, either one string or a list.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub authors: Vec<String>,
    /// Contact address.
    pub contact: Option<String>,
    /// License.
    pub license: Option<String>,
    /// Copyright statement.
    pub copyright: Option<String>,
    /// Disclaimer.
    pub disclaimer: Option<String>,
}

/// The `[compile]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CompileSection {
    /// Accept terms without a namespace prefix.
    #[serde(default)]
    pub allow_naked_names: bool,
    /// Accept namespace prefixes with no `DEFINE NAMESPACE`.
    #[serde(default)]
    pub allow_undefined_namespaces: bool,
    /// Turn the first warning of a document into a hard failure.
    #[serde(default)]
    pub strict: bool,
}

/// The `[output]` section.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Indent JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Gzip level, 0 to 9.
    #[serde(default = "default_compression")]
    pub compression: u32,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            compression: default_compression(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

fn default_compression() -> u32 {
    6
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows `authors = "Jane Doe"` as well as `authors = ["Jane Doe", "John Roe"]`.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
