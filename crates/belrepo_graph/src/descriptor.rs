//! Document-level metadata, namespace/annotation definitions, and the
//! repository metadata overlay.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Document metadata set by `SET DOCUMENT` lines.
///
/// Empty strings mean "not set".
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Descriptor {
    /// Document name (the title).
    pub name: String,
    /// Document version.
    pub version: String,
    /// Free-text description.
    pub description: String,
    /// Authors, comma separated.
    pub authors: String,
    /// Contact address.
    pub contact: String,
    /// License text or identifier.
    pub license: String,
    /// Copyright statement.
    pub copyright: String,
    /// Disclaimer text.
    pub disclaimer: String,
}

impl Descriptor {
    /// Returns the individual authors, trimmed, skipping empties.
    pub fn author_list(&self) -> Vec<&str> {
        self.authors
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect()
    }
}

/// Namespace and annotation definitions declared by a document.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Definitions {
    /// `DEFINE NAMESPACE X AS URL "..."`.
    pub namespace_url: BTreeMap<String, String>,
    /// `DEFINE NAMESPACE X AS PATTERN "..."`.
    pub namespace_pattern: BTreeMap<String, String>,
    /// `DEFINE ANNOTATION X AS URL "..."`.
    pub annotation_url: BTreeMap<String, String>,
    /// `DEFINE ANNOTATION X AS PATTERN "..."`.
    pub annotation_pattern: BTreeMap<String, String>,
    /// `DEFINE ANNOTATION X AS LIST {...}`.
    pub annotation_list: BTreeMap<String, BTreeSet<String>>,
}

impl Definitions {
    /// Returns `true` if a namespace with this prefix is defined.
    pub fn has_namespace(&self, prefix: &str) -> bool {
        self.namespace_url.contains_key(prefix) || self.namespace_pattern.contains_key(prefix)
    }

    /// Returns `true` if an annotation with this name is defined.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation_url.contains_key(name)
            || self.annotation_pattern.contains_key(name)
            || self.annotation_list.contains_key(name)
    }

    /// Merges another set of definitions into this one; later entries win.
    pub fn merge(&mut self, other: &Definitions) {
        self.namespace_url.extend(other.namespace_url.clone());
        self.namespace_pattern.extend(other.namespace_pattern.clone());
        self.annotation_url.extend(other.annotation_url.clone());
        self.annotation_pattern.extend(other.annotation_pattern.clone());
        for (name, values) in &other.annotation_list {
            self.annotation_list
                .entry(name.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }
}

/// Repository-level metadata layered over a graph's descriptor.
///
/// Only non-empty fields override; `None` and `Some("")` leave the base
/// value untouched.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MetadataOverlay {
    /// Overrides [`Descriptor::name`].
    pub name: Option<String>,
    /// Overrides [`Descriptor::version`].
    pub version: Option<String>,
    /// Overrides [`Descriptor::description`].
    pub description: Option<String>,
    /// Overrides [`Descriptor::authors`].
    pub authors: Option<String>,
    /// Overrides [`Descriptor::contact`].
    pub contact: Option<String>,
    /// Overrides [`Descriptor::license`].
    pub license: Option<String>,
    /// Overrides [`Descriptor::copyright`].
    pub copyright: Option<String>,
    /// Overrides [`Descriptor::disclaimer`].
    pub disclaimer: Option<String>,
}

impl MetadataOverlay {
    /// Returns `true` if no field would override anything.
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.version,
            &self.description,
            &self.authors,
            &self.contact,
            &self.license,
            &self.copyright,
            &self.disclaimer,
        ]
        .iter()
        .all(|f| f.as_deref().map_or(true, str::is_empty))
    }

    /// Produces a new descriptor with this overlay's non-empty fields applied.
    pub fn apply(&self, base: &Descriptor) -> Descriptor {
        fn pick(overlay: &Option<String>, base: &str) -> String {
            match overlay.as_deref() {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => base.to_string(),
            }
        }

        Descriptor {
            name: pick(&self.name, &base.name),
            version: pick(&self.version, &base.version),
            description: pick(&self.description, &base.description),
            authors: pick(&self.authors, &base.authors),
            contact: pick(&self.contact, &base.contact),
            license: pick(&self.license, &base.license),
            copyright: pick(&self.copyright, &base.copyright),
            disclaimer: pick(&self.disclaimer, &base.disclaimer),
        }
    }
}

/// Sorts authors by last name and joins them with commas.
pub fn serialize_authors<S: AsRef<str>>(authors: &[S]) -> String {
    fn last_name(author: &str) -> &str {
        author.split_whitespace().last().unwrap_or("")
    }

    let mut sorted: Vec<&str> = authors.iter().map(AsRef::as_ref).collect();
    sorted.sort_by(|a, b| last_name(a).cmp(last_name(b)));
    sorted.join(", ")
}
