//! Text report for pestat.
//!
//! One fixed-column line per selected node under a three-line header.

pub mod render;
pub mod theme;

pub use render::{FLAG_GLYPH, RenderOptions, header, render_node};
pub use theme::Theme;

use pestat_state::{AnnotatedNode, Selection};

/// A rendered node line, keyed by node name for sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub node: String,
    pub line: String,
}

/// Header plus the rows that survived selection, in input order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub header: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Render every node that passes `selection`.
    pub fn build(
        nodes: &[AnnotatedNode],
        selection: &Selection,
        theme: &Theme,
        options: &RenderOptions,
    ) -> Self {
        let rows = selection
            .apply(nodes)
            .map(|node| ReportRow {
                node: node.name().to_string(),
                line: render_node(node, theme, options),
            })
            .collect();

        Self {
            header: header(options),
            rows,
        }
    }

    /// Lexical order by node name. Rows are keyed by name rather than the
    /// line itself so color codes can't affect the order.
    pub fn sort_by_node(&mut self) {
        self.rows.sort_by(|a, b| a.node.cmp(&b.node));
    }

    /// Header lines followed by node lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .map(String::as_str)
            .chain(self.rows.iter().map(|r| r.line.as_str()))
    }
}
