//! Tab-separated side tables (warnings, summaries).

use std::fmt::Write as _;
use std::path::Path;

use crate::atomic::write_atomic;
use crate::error::CacheError;

/// A header row plus data rows, written as TSV.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names.
    pub header: Vec<String>,
    /// Data rows; each should have one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new<S: AsRef<str>>(header: &[S]) -> Self {
        Self {
            header: header.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as TSV. Tabs and line breaks inside cells become spaces.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for row in std::iter::once(&self.header).chain(&self.rows) {
            let cells: Vec<String> = row.iter().map(|c| clean(c)).collect();
            let _ = writeln!(out, "{}", cells.join("\t"));
        }
        out
    }

    /// Writes the table to `path` atomically, replacing any previous file.
    pub fn write(&self, path: &Path) -> Result<(), CacheError> {
        write_atomic(path, self.to_tsv().as_bytes())
    }

    /// Reads a TSV file whose first line is the header.
    pub fn read(path: &Path) -> Result<Self, CacheError> {
        let text = std::fs::read_to_string(path).map_err(|e| CacheError::io(path, e))?;
        let mut lines = text
            .lines()
            .map(|l| l.split('\t').map(str::to_string).collect::<Vec<String>>());
        Ok(Self {
            header: lines.next().unwrap_or_default(),
            rows: lines.collect(),
        })
    }
}

fn clean(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}
