//! Mermaid flowchart export.
//!
//! Output shape:
//!
//! ```text
//! graph TD
//!   A(["User"])
//!   style A fill:#ED1B76
//!   A --> B
//! ```

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use super::Renderer;
use crate::diagram::{Diagram, definition};

/// Export of a diagram with no nodes.
pub const EMPTY_DIAGRAM: &str = "graph TD\n  Start[\"Add shapes to begin\"]\n";

static NON_ID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid id regex"));

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
///
/// An empty id becomes `unknown`.
pub fn sanitize_id(id: &str) -> Cow<'_, str> {
    if id.is_empty() {
        return Cow::Borrowed("unknown");
    }
    NON_ID_CHARS.replace_all(id, "_")
}

/// Node text as it appears between the shape brackets.
///
/// Whitespace runs, newlines included, collapse to one space so every node
/// stays on a single line.
pub fn escape_label(label: &str) -> String {
    let label = label.split_whitespace().collect::<Vec<_>>().join(" ");
    if label.is_empty() {
        "Untitled".to_string()
    } else {
        label.replace('"', "'")
    }
}

/// Label wrapped in double quotes, unless the bracket pair already has them.
fn quoted_label(open: &str, label: &str) -> String {
    let label = escape_label(label);
    if open.ends_with('"') {
        label
    } else {
        format!("\"{label}\"")
    }
}

/// Renders diagrams as Mermaid `graph TD` source.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer;

impl Renderer for MermaidRenderer {
    fn render(&self, diagram: &Diagram) -> String {
        if diagram.nodes.is_empty() {
            return EMPTY_DIAGRAM.to_string();
        }

        let mut code = String::from("graph TD\n");
        for node in &diagram.nodes {
            let shape = definition(node.kind);
            let id = sanitize_id(&node.id);
            let _ = writeln!(
                code,
                "  {id}{}{}{}",
                shape.open,
                quoted_label(shape.open, &node.label),
                shape.close
            );
            let _ = writeln!(code, "  style {id} fill:{}", node.color.to_hex());
        }
        for conn in &diagram.connections {
            let _ = writeln!(
                code,
                "  {} --> {}",
                sanitize_id(&conn.from),
                sanitize_id(&conn.to)
            );
        }
        code
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_mermaid.rs"]
mod tests;
