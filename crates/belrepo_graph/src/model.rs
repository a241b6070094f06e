//! Nodes, relations and edges of a BEL graph.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The BEL function wrapping a term, e.g. `p(...)` for proteins.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Function {
    /// `a()` / `abundance()`.
    Abundance,
    /// `bp()` / `biologicalProcess()`.
    BiologicalProcess,
    /// `complex()` / `complexAbundance()`.
    Complex,
    /// `g()` / `geneAbundance()`.
    Gene,
    /// `m()` / `microRNAAbundance()`.
    MicroRna,
    /// `path()` / `pathology()`.
    Pathology,
    /// `p()` / `proteinAbundance()`.
    Protein,
    /// `r()` / `rnaAbundance()`.
    Rna,
}

impl Function {
    /// Resolves a short or long BEL function name.
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "a" | "abundance" => Function::Abundance,
            "bp" | "biologicalProcess" => Function::BiologicalProcess,
            "complex" | "complexAbundance" => Function::Complex,
            "g" | "geneAbundance" => Function::Gene,
            "m" | "microRNAAbundance" => Function::MicroRna,
            "path" | "pathology" => Function::Pathology,
            "p" | "proteinAbundance" => Function::Protein,
            "r" | "rnaAbundance" => Function::Rna,
            _ => return None,
        };
        Some(function)
    }

    /// Returns the short BEL name used when printing terms.
    pub fn short_name(self) -> &'static str {
        match self {
            Function::Abundance => "a",
            Function::BiologicalProcess => "bp",
            Function::Complex => "complex",
            Function::Gene => "g",
            Function::MicroRna => "m",
            Function::Pathology => "path",
            Function::Protein => "p",
            Function::Rna => "r",
        }
    }
}

/// A BEL term: a function applied to a (possibly namespaced) name.
///
/// Two nodes are the same node exactly when function, namespace and name
/// are equal; this identity drives node-set union across documents.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Node {
    /// The wrapping function.
    pub function: Function,
    /// The namespace prefix, `None` for a naked name.
    pub namespace: Option<String>,
    /// The entity name within the namespace.
    pub name: String,
}

impl Node {
    /// Creates a namespaced node.
    pub fn new(function: Function, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            function,
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Creates a node without a namespace.
    pub fn naked(function: Function, name: impl Into<String>) -> Self {
        Self {
            function,
            namespace: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_quotes = self
            .name
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'));
        let name = if needs_quotes {
            format!("\"{}\"", self.name)
        } else {
            self.name.clone()
        };
        match &self.namespace {
            Some(ns) => write!(f, "{}({ns}:{name})", self.function.short_name()),
            None => write!(f, "{}({name})", self.function.short_name()),
        }
    }
}

/// A BEL relationship between a subject and an object term.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Relation {
    /// `increases`, `->`.
    Increases,
    /// `decreases`, `-|`.
    Decreases,
    /// `directlyIncreases`, `=>`.
    DirectlyIncreases,
    /// `directlyDecreases`, `=|`.
    DirectlyDecreases,
    /// `regulates`, `reg`.
    Regulates,
    /// `causesNoChange`, `cnc`.
    CausesNoChange,
    /// `positiveCorrelation`, `pos`.
    PositiveCorrelation,
    /// `negativeCorrelation`, `neg`.
    NegativeCorrelation,
    /// `association`, `--`.
    Association,
    /// `isA`.
    IsA,
    /// `partOf`.
    PartOf,
    /// `hasComponent`.
    HasComponent,
    /// `hasMember`.
    HasMember,
}

impl Relation {
    /// Resolves a long or short BEL relation name.
    pub fn from_name(name: &str) -> Option<Self> {
        let relation = match name {
            "increases" | "->" => Relation::Increases,
            "decreases" | "-|" => Relation::Decreases,
            "directlyIncreases" | "=>" => Relation::DirectlyIncreases,
            "directlyDecreases" | "=|" => Relation::DirectlyDecreases,
            "regulates" | "reg" => Relation::Regulates,
            "causesNoChange" | "cnc" => Relation::CausesNoChange,
            "positiveCorrelation" | "pos" => Relation::PositiveCorrelation,
            "negativeCorrelation" | "neg" => Relation::NegativeCorrelation,
            "association" | "--" => Relation::Association,
            "isA" => Relation::IsA,
            "partOf" => Relation::PartOf,
            "hasComponent" => Relation::HasComponent,
            "hasMember" => Relation::HasMember,
            _ => return None,
        };
        Some(relation)
    }

    /// Returns the long BEL name.
    pub fn name(self) -> &'static str {
        match self {
            Relation::Increases => "increases",
            Relation::Decreases => "decreases",
            Relation::DirectlyIncreases => "directlyIncreases",
            Relation::DirectlyDecreases => "directlyDecreases",
            Relation::Regulates => "regulates",
            Relation::CausesNoChange => "causesNoChange",
            Relation::PositiveCorrelation => "positiveCorrelation",
            Relation::NegativeCorrelation => "negativeCorrelation",
            Relation::Association => "association",
            Relation::IsA => "isA",
            Relation::PartOf => "partOf",
            Relation::HasComponent => "hasComponent",
            Relation::HasMember => "hasMember",
        }
    }

    /// Returns `true` for relations that require a citation in scope.
    pub fn needs_citation(self) -> bool {
        !matches!(
            self,
            Relation::IsA | Relation::PartOf | Relation::HasComponent | Relation::HasMember
        )
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of an edge: duplicate keys are merged, not repeated.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct EdgeKey {
    /// The subject term.
    pub source: Node,
    /// The relationship.
    pub relation: Relation,
    /// The object term.
    pub target: Node,
}

/// Supporting attributes of an edge.
///
/// When the same [`EdgeKey`] is asserted more than once (in one document or
/// across documents), the attribute sets are merged by union.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct EdgeData {
    /// Citations supporting the edge, as `Type:Reference`.
    pub citations: BTreeSet<String>,
    /// Evidence / supporting text snippets.
    pub evidence: BTreeSet<String>,
    /// Annotation name to the set of values in scope when asserted.
    pub annotations: BTreeMap<String, BTreeSet<String>>,
}

impl EdgeData {
    /// Merges another edge's attributes into this one.
    pub fn merge(&mut self, other: &EdgeData) {
        self.citations.extend(other.citations.iter().cloned());
        self.evidence.extend(other.evidence.iter().cloned());
        for (name, values) in &other.annotations {
            self.annotations
                .entry(name.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }
}
