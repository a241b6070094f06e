//! Enumeration of the BEL documents under a repository root.

use std::path::{Path, PathBuf};

use belrepo_cache::DocumentRef;
use walkdir::WalkDir;

/// Suffix of BEL documents.
pub const DOCUMENT_SUFFIX: &str = ".bel";

/// Prefix marking files that are not documents (e.g. `_cache.bel`).
pub const PRIVATE_PREFIX: char = '_';

/// Finds the documents of a repository.
///
/// Directories are visited in depth-first pre-order with siblings sorted by
/// name; within a directory, documents are sorted by file name. Hidden
/// directories are not entered.
#[derive(Clone, Debug)]
pub struct Discoverer {
    root: PathBuf,
}

impl Discoverer {
    /// Creates a discoverer for `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Starts a fresh walk of the filesystem.
    ///
    /// Each call re-reads the tree. A missing root yields nothing.
    pub fn documents(&self) -> Documents {
        let dirs = if self.root.is_dir() {
            Some(WalkDir::new(&self.root).sort_by_file_name().into_iter())
        } else {
            tracing::warn!(root = %self.root.display(), "repository root is not a directory");
            None
        };
        Documents {
            dirs,
            pending: Vec::new().into_iter(),
        }
    }
}

/// Lazy iterator over [`DocumentRef`]s, one directory at a time.
pub struct Documents {
    dirs: Option<walkdir::IntoIter>,
    pending: std::vec::IntoIter<DocumentRef>,
}

impl Iterator for Documents {
    type Item = DocumentRef;

    fn next(&mut self) -> Option<DocumentRef> {
        loop {
            if let Some(doc) = self.pending.next() {
                return Some(doc);
            }
            let walker = self.dirs.as_mut()?;
            let entry = match walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.depth() > 0 && is_hidden(entry.file_name()) {
                walker.skip_current_dir();
                continue;
            }
            self.pending = documents_in(entry.path()).into_iter();
        }
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with('.'))
}

fn is_document(name: &str) -> bool {
    name.ends_with(DOCUMENT_SUFFIX) && !name.starts_with(PRIVATE_PREFIX)
}

fn documents_in(dir: &Path) -> Vec<DocumentRef> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| is_document(name))
        .collect();
    names.sort();
    names
        .into_iter()
        .map(|name| DocumentRef::new(dir, name))
        .collect()
}
