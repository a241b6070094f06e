//! Splitting document text into logical lines.

/// One logical line: a physical line plus any continuation lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the first physical line.
    pub number: usize,
    /// The joined text, without the trailing backslashes.
    pub text: String,
}

/// Splits source text into logical lines.
///
/// A trailing `\` joins the next physical line. Blank lines and lines whose
/// first non-blank character is `#` are dropped.
pub fn logical_lines(source: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (i, raw) in source.lines().enumerate() {
        let raw = raw.trim_end_matches('\r');
        let (body, continues) = match raw.trim_end().strip_suffix('\\') {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let current = match pending.take() {
            Some(mut line) => {
                line.text.push_str(body.trim_start());
                line
            }
            None => {
                let trimmed = body.trim_start();
                if (trimmed.is_empty() && !continues) || trimmed.starts_with('#') {
                    continue;
                }
                LogicalLine {
                    number: i + 1,
                    text: body.to_string(),
                }
            }
        };

        if continues {
            pending = Some(current);
        } else {
            lines.push(current);
        }
    }

    if let Some(line) = pending {
        lines.push(line);
    }
    lines
}
