//! Reading a single BEL term such as `p(HGNC:EGF)`.

use crate::value::unquote;
use belrepo_diagnostics::WarningKind;
use belrepo_graph::{Function, Node};

/// Why a term could not be read, and where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermError {
    /// Classification for the resulting warning.
    pub kind: WarningKind,
    /// Byte offset of the problem within the text passed to [`parse_term`].
    pub position: usize,
    /// Description of the problem.
    pub message: String,
}

impl TermError {
    fn new(kind: WarningKind, position: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            message: message.into(),
        }
    }
}

/// Reads a term at the start of `text`.
///
/// Returns the node and the byte offset just past its closing parenthesis.
/// Accepts `fn(NS:name)`, `fn(NS:"quoted name")`, `fn(name)` and
/// `fn("quoted name")`. Nested terms are not supported.
pub fn parse_term(text: &str) -> Result<(Node, usize), TermError> {
    let open = text
        .find('(')
        .ok_or_else(|| TermError::new(WarningKind::MalformedTerm, 0, "expected '('"))?;
    let name = &text[..open];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TermError::new(
            WarningKind::MalformedTerm,
            0,
            format!("invalid function name '{name}'"),
        ));
    }
    let function = Function::from_name(name).ok_or_else(|| {
        TermError::new(
            WarningKind::UnknownFunction,
            0,
            format!("unknown function '{name}'"),
        )
    })?;

    let close = find_close(text, open + 1)?;
    let argument = text[open + 1..close].trim();
    let node = parse_argument(function, argument, open + 1)?;
    Ok((node, close + 1))
}

fn find_close(text: &str, start: usize) -> Result<usize, TermError> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => {
                return Err(TermError::new(
                    WarningKind::MalformedTerm,
                    start + i,
                    "nested terms are not supported",
                ))
            }
            ')' if !in_quotes => return Ok(start + i),
            _ => {}
        }
    }
    Err(TermError::new(
        WarningKind::MalformedTerm,
        text.len(),
        "unclosed term",
    ))
}

fn parse_argument(function: Function, argument: &str, offset: usize) -> Result<Node, TermError> {
    let malformed = |msg: &str| TermError::new(WarningKind::MalformedTerm, offset, msg);

    if argument.is_empty() {
        return Err(malformed("empty term"));
    }
    if argument.starts_with('"') {
        let name = unquote(argument).ok_or_else(|| malformed("malformed quoted name"))?;
        return Ok(Node::naked(function, name));
    }

    match argument.split_once(':') {
        Some((namespace, name)) => {
            let namespace = namespace.trim();
            let valid = !namespace.is_empty()
                && namespace
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid {
                return Err(malformed("invalid namespace prefix"));
            }
            let name = unquote(name).ok_or_else(|| malformed("malformed name"))?;
            Ok(Node::new(function, namespace, name))
        }
        None => {
            let name = unquote(argument).ok_or_else(|| malformed("malformed name"))?;
            Ok(Node::naked(function, name))
        }
    }
}
