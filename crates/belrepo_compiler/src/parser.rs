//! The default line-oriented BEL compiler.
//!
//! Control statements (`SET`, `UNSET`, `DEFINE`) update the parser state;
//! every other line is read as a BEL statement and added to the graph with
//! the citation, evidence and annotations currently in scope. Problems are
//! recorded as warnings and the offending line is dropped.

use crate::compiler::Compiler;
use crate::error::CompileError;
use crate::options::CompileOptions;
use crate::source::{logical_lines, LogicalLine};
use crate::term::{parse_term, TermError};
use crate::value::{parse_values, take_word};
use belrepo_diagnostics::{CompilationWarning, WarningKind};
use belrepo_graph::{BelGraph, EdgeData, Node, Relation};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Compiles BEL documents from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct BelCompiler;

impl BelCompiler {
    /// Creates a compiler.
    pub fn new() -> Self {
        Self
    }
}

impl Compiler for BelCompiler {
    fn compile(&self, path: &Path, options: &CompileOptions) -> Result<BelGraph, CompileError> {
        let source = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let graph = parse_document(&source, options);

        if options.strict {
            if let Some(first) = graph.warnings.first() {
                return Err(CompileError::Parse {
                    path: path.to_path_buf(),
                    line_number: first.line_number,
                    message: first.to_string(),
                });
            }
        }

        tracing::debug!(
            path = %path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            warnings = graph.number_of_warnings(),
            "compiled document"
        );
        Ok(graph)
    }
}

/// Compiles document text into a graph, collecting warnings on it.
///
/// Never fails: unreadable statements become warnings. A document without
/// `SET DOCUMENT Name` gets an [`WarningKind::InvalidMetadata`] warning at
/// line 0.
pub fn parse_document(source: &str, options: &CompileOptions) -> BelGraph {
    let mut parser = Parser::new(options);
    for line in logical_lines(source) {
        parser.line(&line);
    }
    parser.finish()
}

struct Parser<'o> {
    options: &'o CompileOptions,
    graph: BelGraph,
    citation: Option<String>,
    evidence: Option<String>,
    annotations: BTreeMap<String, BTreeSet<String>>,
}

/// A warning before it is tied to its line.
struct Problem {
    kind: WarningKind,
    position: usize,
    message: String,
}

impl Problem {
    fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            position: 0,
            message: message.into(),
        }
    }

    fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    fn at_offset(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }
}

impl From<TermError> for Problem {
    fn from(err: TermError) -> Self {
        Problem {
            kind: err.kind,
            position: err.position,
            message: err.message,
        }
    }
}

impl<'o> Parser<'o> {
    fn new(options: &'o CompileOptions) -> Self {
        Self {
            options,
            graph: BelGraph::new(),
            citation: None,
            evidence: None,
            annotations: BTreeMap::new(),
        }
    }

    fn line(&mut self, line: &LogicalLine) {
        let indent = line.text.len() - line.text.trim_start().len();
        let text = line.text.trim();
        let (keyword, rest) = take_word(text);

        let result = match keyword {
            "SET" => self.set(rest),
            "UNSET" => self.unset(rest),
            "DEFINE" => self.define(rest),
            _ => self.statement(text),
        };

        if let Err(problem) = result {
            self.graph.warnings.push(
                CompilationWarning::new(problem.kind, line.number, line.text.clone(), problem.message)
                    .with_position(indent + problem.position),
            );
        }
    }

    fn finish(mut self) -> BelGraph {
        if self.graph.document.name.is_empty() {
            self.graph.warnings.push(CompilationWarning::new(
                WarningKind::InvalidMetadata,
                0,
                "",
                "document has no SET DOCUMENT Name",
            ));
        }
        self.graph
    }

    fn set(&mut self, rest: &str) -> Result<(), Problem> {
        let (first, after) = take_word(rest);
        if first == "DOCUMENT" {
            return self.set_document(after);
        }

        let (name, value) = split_assignment(rest)?;
        match name {
            "Citation" => {
                let malformed = || Problem::new(WarningKind::MalformedStatement, "malformed citation");
                let values = parse_values(value).ok_or_else(malformed)?;
                let citation = match values.as_slice() {
                    [reference] => reference.clone(),
                    [kind, .., reference] => format!("{kind}:{reference}"),
                    [] => return Err(malformed()),
                };
                self.citation = Some(citation);
                self.evidence = None;
                self.annotations.clear();
            }
            "Evidence" | "SupportingText" => {
                let text = single_value(value)?;
                self.evidence = Some(text);
            }
            "STATEMENT_GROUP" => {
                single_value(value)?;
            }
            annotation => self.set_annotation(annotation, value)?,
        }
        Ok(())
    }

    fn set_document(&mut self, rest: &str) -> Result<(), Problem> {
        let (key, value) = split_assignment(rest)?;
        let value = single_value(value)?;
        let document = &mut self.graph.document;
        let field = match key {
            "Name" => &mut document.name,
            "Version" => &mut document.version,
            "Description" => &mut document.description,
            "Authors" => &mut document.authors,
            "ContactInfo" | "Contact" => &mut document.contact,
            "Licenses" | "License" => &mut document.license,
            "Copyright" => &mut document.copyright,
            "Disclaimer" => &mut document.disclaimer,
            other => {
                return Err(Problem::new(
                    WarningKind::InvalidMetadata,
                    format!("unknown document key '{other}'"),
                ))
            }
        };
        *field = value;
        Ok(())
    }

    fn set_annotation(&mut self, name: &str, value: &str) -> Result<(), Problem> {
        let definitions = &self.graph.definitions;
        if !definitions.has_annotation(name) {
            return Err(Problem::new(
                WarningKind::UndefinedAnnotation,
                format!("annotation '{name}' is not defined"),
            ));
        }
        let values = parse_values(value)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Problem::new(WarningKind::MalformedStatement, "malformed annotation value"))?;
        if let Some(allowed) = definitions.annotation_list.get(name) {
            if let Some(bad) = values.iter().find(|v| !allowed.contains(*v)) {
                return Err(Problem::new(
                    WarningKind::IllegalAnnotationValue,
                    format!("'{bad}' is not a value of annotation '{name}'"),
                ));
            }
        }
        self.annotations
            .insert(name.to_string(), values.into_iter().collect());
        Ok(())
    }

    fn unset(&mut self, rest: &str) -> Result<(), Problem> {
        let rest = rest.trim();
        if rest == "ALL" {
            self.citation = None;
            self.evidence = None;
            self.annotations.clear();
            return Ok(());
        }
        let names = parse_values(rest)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Problem::new(WarningKind::MalformedStatement, "malformed UNSET"))?;
        for name in names {
            match name.as_str() {
                "Citation" => self.citation = None,
                "Evidence" | "SupportingText" => self.evidence = None,
                "STATEMENT_GROUP" => {}
                other => {
                    self.annotations.remove(other);
                }
            }
        }
        Ok(())
    }

    fn define(&mut self, rest: &str) -> Result<(), Problem> {
        let (what, rest) = take_word(rest);
        let (name, rest) = take_word(rest);
        let (as_kw, rest) = take_word(rest);
        let (style, value) = take_word(rest);
        if name.is_empty() || as_kw != "AS" {
            return Err(Problem::new(
                WarningKind::MalformedStatement,
                "expected DEFINE <NAMESPACE|ANNOTATION> <name> AS <style> <value>",
            ));
        }
        let malformed = || Problem::new(WarningKind::MalformedStatement, "malformed definition value");
        let definitions = &mut self.graph.definitions;
        let name = name.to_string();

        match (what, style) {
            ("NAMESPACE", "URL") => {
                definitions
                    .namespace_url
                    .insert(name, single_value(value)?);
            }
            ("NAMESPACE", "PATTERN") => {
                definitions
                    .namespace_pattern
                    .insert(name, single_value(value)?);
            }
            ("ANNOTATION", "URL") => {
                definitions
                    .annotation_url
                    .insert(name, single_value(value)?);
            }
            ("ANNOTATION", "PATTERN") => {
                definitions
                    .annotation_pattern
                    .insert(name, single_value(value)?);
            }
            ("ANNOTATION", "LIST") => {
                let values = parse_values(value).ok_or_else(malformed)?;
                definitions
                    .annotation_list
                    .insert(name, values.into_iter().collect());
            }
            _ => {
                return Err(Problem::new(
                    WarningKind::MalformedStatement,
                    format!("unsupported definition '{what} ... AS {style}'"),
                ))
            }
        }
        Ok(())
    }

    fn statement(&mut self, text: &str) -> Result<(), Problem> {
        if !text.contains('(') {
            return Err(Problem::new(
                WarningKind::MalformedStatement,
                "expected a BEL statement",
            ));
        }
        let (subject, end) = parse_term(text)?;
        self.check_node(&subject, 0)?;

        let rest = &text[end..];
        if rest.trim().is_empty() {
            self.graph.add_node(subject);
            return Ok(());
        }

        let relation_at = end + (rest.len() - rest.trim_start().len());
        let (word, object_text) = take_word(rest);
        let relation = Relation::from_name(word).ok_or_else(|| {
            Problem::new(
                WarningKind::UnknownRelation,
                format!("unknown relation '{word}'"),
            )
            .at(relation_at)
        })?;

        let object_at = text.len() - object_text.len();
        let (object, object_end) = parse_term(object_text)
            .map_err(|e| Problem::from(e).at_offset(object_at))?;
        self.check_node(&object, object_at)?;
        if !object_text[object_end..].trim().is_empty() {
            return Err(Problem::new(
                WarningKind::MalformedStatement,
                "unexpected text after statement",
            )
            .at(object_at + object_end));
        }

        if relation.needs_citation() && self.citation.is_none() {
            return Err(Problem::new(
                WarningKind::MissingCitation,
                format!("'{relation}' statement without a citation"),
            ));
        }

        let data = EdgeData {
            citations: self.citation.iter().cloned().collect(),
            evidence: self.evidence.iter().cloned().collect(),
            annotations: self.annotations.clone(),
        };
        self.graph.add_edge(subject, relation, object, data);
        Ok(())
    }

    fn check_node(&self, node: &Node, position: usize) -> Result<(), Problem> {
        match &node.namespace {
            None if !self.options.allow_naked_names => Err(Problem::new(
                WarningKind::NakedName,
                format!("naked name '{}'", node.name),
            )
            .at(position)),
            Some(ns)
                if !self.options.allow_undefined_namespaces
                    && !self.graph.definitions.has_namespace(ns) =>
            {
                Err(Problem::new(
                    WarningKind::UndefinedNamespace,
                    format!("namespace '{ns}' is not defined"),
                )
                .at(position))
            }
            _ => Ok(()),
        }
    }
}

fn split_assignment(text: &str) -> Result<(&str, &str), Problem> {
    text.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| Problem::new(WarningKind::MalformedStatement, "expected '<name> = <value>'"))
}

fn single_value(text: &str) -> Result<String, Problem> {
    match parse_values(text) {
        Some(mut values) if values.len() == 1 && !text.trim_start().starts_with('{') => {
            Ok(values.remove(0))
        }
        _ => Err(Problem::new(
            WarningKind::MalformedStatement,
            "expected a single value",
        )),
    }
}
