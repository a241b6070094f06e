//! `belrepo ls`: cache state of the aggregate and every document.

use std::collections::BTreeSet;
use std::fmt::Write;

use belrepo_cache::Format;
use belrepo_graph::SummaryRecord;
use belrepo_repository::DocumentStatus;

use crate::pipeline::open_repository;
use crate::GlobalArgs;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW_BOLD: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Runs the `belrepo ls` command.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let repo = open_repository(global)?;
    let painter = Painter { color: global.color };

    let aggregate_formats = repo.aggregate_formats();
    if !aggregate_formats.is_empty() {
        let summary = repo.aggregate_cache().read_summary().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unreadable aggregate cache");
            None
        });
        println!("{}", painter.paint(RED, "Aggregate Cache"));
        let name = repo.output_directory().join(&repo.settings().cache_name);
        let name = name.strip_prefix(repo.root()).unwrap_or(name.as_path());
        println!(
            "{}",
            status_line(&painter, &name.display().to_string(), &aggregate_formats, false, summary.as_ref())
        );
        println!("{}", painter.paint(RED, "Document Caches"));
    }

    for status in repo.document_status() {
        println!("{}", document_line(&painter, &status));
    }
    Ok(0)
}

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn document_line(painter: &Painter, status: &DocumentStatus) -> String {
    status_line(
        painter,
        &status.relative_path.display().to_string(),
        &status.formats,
        status.has_warnings,
        status.summary.as_ref(),
    )
}

/// `✔` cached cleanly, `✘` cached with warnings, `?` not cached.
fn status_line(
    painter: &Painter,
    path: &str,
    formats: &BTreeSet<Format>,
    has_warnings: bool,
    summary: Option<&SummaryRecord>,
) -> String {
    let mut line = match (formats.is_empty(), has_warnings) {
        (false, true) => painter.paint(RED, "✘ "),
        (false, false) => painter.paint(GREEN, "✔ "),
        (true, _) => painter.paint(YELLOW_BOLD, "? "),
    };
    line.push_str(path);

    if !formats.is_empty() {
        let ids: Vec<&str> = formats.iter().map(|f| f.id()).collect();
        line.push_str(&painter.paint(GREEN, &format!(" ({})", ids.join(", "))));
    }
    if let Some(s) = summary {
        let _ = write!(
            line,
            "{}",
            painter.paint(BLUE, &format!(" ({} nodes, {} edges)", s.nodes, s.edges))
        );
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use belrepo_graph::BelGraph;

    const PLAIN: Painter = Painter { color: false };

    #[test]
    fn uncached_document() {
        let line = status_line(&PLAIN, "a.bel", &BTreeSet::new(), false, None);
        assert_eq!(line, "? a.bel");
    }

    #[test]
    fn cached_document_with_counts() {
        let formats = BTreeSet::from([Format::NodeLinkJson, Format::Bincode]);
        let summary = SummaryRecord::from_graph(&BelGraph::new());
        let line = status_line(&PLAIN, "sub/b.bel", &formats, false, Some(&summary));
        assert_eq!(line, "✔ sub/b.bel (bincode, nodelink.json) (0 nodes, 0 edges)");
    }

    #[test]
    fn warnings_mark_document() {
        let formats = BTreeSet::from([Format::Bincode]);
        let line = status_line(&PLAIN, "c.bel", &formats, true, None);
        assert!(line.starts_with("✘ "));
    }

    #[test]
    fn color_wraps_marker() {
        let painter = Painter { color: true };
        let line = status_line(&painter, "a.bel", &BTreeSet::new(), false, None);
        assert!(line.starts_with(YELLOW_BOLD));
    }
}
