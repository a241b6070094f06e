//! Warning classifications with stable codes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The classification of a compilation warning.
///
/// Each kind has a stable numeric code (displayed as `W1xx`) and a class
/// name used in the `Error` column of warnings tables.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum WarningKind {
    /// A line that is neither a control statement nor a BEL statement.
    MalformedStatement,
    /// A term whose parentheses or namespace qualification cannot be parsed.
    MalformedTerm,
    /// A term using a function name outside the supported set.
    UnknownFunction,
    /// A statement whose relation is not recognized.
    UnknownRelation,
    /// A term argument without a namespace prefix.
    NakedName,
    /// A namespace prefix with no `DEFINE NAMESPACE` in scope.
    UndefinedNamespace,
    /// A `SET` of an annotation that was never defined.
    UndefinedAnnotation,
    /// An annotation value outside the annotation's list or pattern.
    IllegalAnnotationValue,
    /// A `SET DOCUMENT` key that is unknown, or a missing document name.
    InvalidMetadata,
    /// A relation statement made with no citation in scope.
    MissingCitation,
}

impl WarningKind {
    /// Every kind, in code order.
    pub const ALL: [WarningKind; 10] = [
        WarningKind::MalformedStatement,
        WarningKind::MalformedTerm,
        WarningKind::UnknownFunction,
        WarningKind::UnknownRelation,
        WarningKind::NakedName,
        WarningKind::UndefinedNamespace,
        WarningKind::UndefinedAnnotation,
        WarningKind::IllegalAnnotationValue,
        WarningKind::InvalidMetadata,
        WarningKind::MissingCitation,
    ];

    /// Returns the numeric code of this kind.
    pub fn number(self) -> u16 {
        match self {
            WarningKind::MalformedStatement => 101,
            WarningKind::MalformedTerm => 102,
            WarningKind::UnknownFunction => 103,
            WarningKind::UnknownRelation => 104,
            WarningKind::NakedName => 105,
            WarningKind::UndefinedNamespace => 106,
            WarningKind::UndefinedAnnotation => 107,
            WarningKind::IllegalAnnotationValue => 108,
            WarningKind::InvalidMetadata => 109,
            WarningKind::MissingCitation => 110,
        }
    }

    /// Returns the class name, e.g. `NakedNameWarning`.
    pub fn class_name(self) -> &'static str {
        match self {
            WarningKind::MalformedStatement => "MalformedStatementWarning",
            WarningKind::MalformedTerm => "MalformedTermWarning",
            WarningKind::UnknownFunction => "UnknownFunctionWarning",
            WarningKind::UnknownRelation => "UnknownRelationWarning",
            WarningKind::NakedName => "NakedNameWarning",
            WarningKind::UndefinedNamespace => "UndefinedNamespaceWarning",
            WarningKind::UndefinedAnnotation => "UndefinedAnnotationWarning",
            WarningKind::IllegalAnnotationValue => "IllegalAnnotationValueWarning",
            WarningKind::InvalidMetadata => "InvalidMetadataWarning",
            WarningKind::MissingCitation => "MissingCitationWarning",
        }
    }

    /// Returns the display code, e.g. `W105`.
    pub fn code(self) -> String {
        format!("W{:03}", self.number())
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let numbers: HashSet<u16> = WarningKind::ALL.iter().map(|k| k.number()).collect();
        assert_eq!(numbers.len(), WarningKind::ALL.len());
    }

    #[test]
    fn code_format() {
        assert_eq!(WarningKind::MalformedStatement.code(), "W101");
        assert_eq!(WarningKind::MissingCitation.code(), "W110");
    }

    #[test]
    fn display_is_class_name() {
        assert_eq!(format!("{}", WarningKind::NakedName), "NakedNameWarning");
        for kind in WarningKind::ALL {
            assert!(kind.class_name().ends_with("Warning"));
        }
    }

    #[test]
    fn serde_roundtrip() {
        let kind = WarningKind::UndefinedAnnotation;
        let json = serde_json::to_string(&kind).unwrap();
        let back: WarningKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, back);
    }
}
