//! A single recoverable problem found while compiling a document.

use crate::kind::WarningKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable compilation problem tied to one source line.
///
/// The compiler keeps going after emitting a warning; the offending
/// statement is dropped from the graph. Each warning includes:
/// - the 1-based line number and the raw line text
/// - the 0-based character position inside the line
/// - a classification and a human-readable message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationWarning {
    /// 1-based line number in the source document.
    pub line_number: usize,
    /// 0-based character offset of the problem within the line.
    pub position: usize,
    /// The full text of the offending line.
    pub line: String,
    /// The classification of this warning.
    pub kind: WarningKind,
    /// The warning message.
    pub message: String,
}

impl CompilationWarning {
    /// Creates a warning at position 0 of the given line.
    pub fn new(
        kind: WarningKind,
        line_number: usize,
        line: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            position: 0,
            line: line.into(),
            kind,
            message: message.into(),
        }
    }

    /// Sets the character position of this warning.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }
}

impl fmt::Display for CompilationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}:{}: {}",
            self.kind, self.line_number, self.position, self.message
        )
    }
}
