//! Quoted strings and `{...}` value lists.

/// Parses a value: a quoted string, a bare word, or a `{...}` list of those.
///
/// Returns `None` if the text is malformed (unbalanced quotes or braces, an
/// empty item).
pub fn parse_values(text: &str) -> Option<Vec<String>> {
    let text = text.trim();
    if let Some(inner) = text.strip_prefix('{') {
        let inner = inner.strip_suffix('}')?;
        if inner.trim().is_empty() {
            return Some(Vec::new());
        }
        split_outside_quotes(inner, ',')
            .into_iter()
            .map(unquote)
            .collect()
    } else {
        unquote(text).map(|v| vec![v])
    }
}

/// Removes surrounding double quotes and unescapes `\"`.
///
/// Bare words are returned as-is; bare text containing a quote is rejected.
pub fn unquote(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(inner) = text.strip_prefix('"') {
        let inner = inner.strip_suffix('"')?;
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '"' => return None,
                _ => out.push(c),
            }
        }
        Some(out)
    } else if text.contains('"') {
        None
    } else {
        Some(text.to_string())
    }
}

/// Splits `text` on `sep`, ignoring separators inside double quotes.
pub fn split_outside_quotes(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Splits off the first whitespace-delimited word.
pub fn take_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim_start()),
        None => (text, ""),
    }
}
