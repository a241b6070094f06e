//! Warning rendering for human-readable terminal output.

use crate::warning::CompilationWarning;

/// ANSI escape for bold yellow.
const YELLOW_BOLD: &str = "\x1b[1;33m";

/// ANSI escape for bold blue.
const BLUE_BOLD: &str = "\x1b[1;34m";

/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Trait for rendering warnings into formatted output strings.
pub trait WarningRenderer {
    /// Renders a single warning found in the document at `path`.
    fn render(&self, path: &str, warning: &CompilationWarning) -> String;
}

/// Renders warnings in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W105]: naked name 'EGF'
///   --> corpus/egf.bel:12:2
///    |
/// 12 | p(EGF) increases p(HGNC:EGFR)
///    |   ^
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The terminal width; source lines longer than this are truncated.
    pub width: u16,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool, width: u16) -> Self {
        Self { color, width }
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl WarningRenderer for TerminalRenderer {
    fn render(&self, path: &str, warning: &CompilationWarning) -> String {
        let mut out = String::new();

        let header = format!("warning[{}]", warning.kind.code());
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(YELLOW_BOLD, &header),
            warning.message
        ));

        out.push_str(&format!(
            "  {} {path}:{}:{}\n",
            self.paint(BLUE_BOLD, "-->"),
            warning.line_number,
            warning.position
        ));

        let line_num = warning.line_number.to_string();
        let padding = " ".repeat(line_num.len());
        let max = (self.width as usize).saturating_sub(line_num.len() + 3).max(1);
        let shown: String = warning.line.chars().take(max).collect();

        out.push_str(&format!("{padding} |\n"));
        out.push_str(&format!("{line_num} | {shown}\n"));
        if warning.position < max {
            let col_padding = " ".repeat(warning.position);
            out.push_str(&format!("{padding} | {col_padding}^\n"));
        }

        out
    }
}
