use super::*;
use crate::diagram::{Connection, Node, Rgb, ShapeKind};
use crate::layout::layout;

fn render(d: &Diagram) -> String {
    MermaidRenderer.render(d)
}

#[test]
fn test_empty_diagram_placeholder() {
    assert_eq!(render(&Diagram::new()), EMPTY_DIAGRAM);
    assert_eq!(
        render(&Diagram::new()),
        "graph TD\n  Start[\"Add shapes to begin\"]\n"
    );
}

#[test]
fn test_sample_scenario_exports_three_nodes_two_edges() {
    let d = layout(&Diagram::with_parts(
        vec![
            Node::new("A", ShapeKind::Stadium, "User"),
            Node::new("B", ShapeKind::Rectangle, "Create PRD"),
            Node::new("C", ShapeKind::Cylinder, "Database"),
        ],
        vec![Connection::new("A", "B"), Connection::new("B", "C")],
    ));
    let code = render(&d);
    assert_eq!(
        code,
        "graph TD\n\
         \x20 A([\"User\"])\n\
         \x20 style A fill:#ED1B76\n\
         \x20 B[\"Create PRD\"]\n\
         \x20 style B fill:#067D72\n\
         \x20 C[(\"Database\")]\n\
         \x20 style C fill:#FFE4EC\n\
         \x20 A --> B\n\
         \x20 B --> C\n"
    );
    let lines: Vec<&str> = code.lines().collect();
    let node_lines = lines
        .iter()
        .filter(|l| !l.contains("style") && !l.contains("-->") && l.starts_with("  "))
        .count();
    let edge_lines = lines.iter().filter(|l| l.contains(" --> ")).count();
    assert_eq!(node_lines, 3);
    assert_eq!(edge_lines, 2);
}

#[test]
fn test_every_bracket_pair() {
    let cases = [
        (ShapeKind::Stadium, "n([\"x\"])"),
        (ShapeKind::Rectangle, "n[\"x\"]"),
        (ShapeKind::Rounded, "n[\"x\"]"),
        (ShapeKind::Parallelogram, "n[/\"x\"\\]"),
        (ShapeKind::Diamond, "n{\"x\"}"),
        (ShapeKind::Hexagon, "n{{\"x\"}}"),
        (ShapeKind::Cylinder, "n[(\"x\")]"),
    ];
    for (kind, expected) in cases {
        let d = Diagram::with_parts(vec![Node::new("n", kind, "x")], vec![]);
        let code = render(&d);
        assert!(
            code.contains(&format!("  {expected}\n")),
            "{kind}: {code}"
        );
    }
}

#[test]
fn test_ids_sanitized() {
    let d = Diagram::with_parts(
        vec![
            Node::new("node-1", ShapeKind::Rectangle, "a"),
            Node::new("step 2.b", ShapeKind::Rectangle, "b"),
        ],
        vec![Connection::new("node-1", "step 2.b")],
    );
    let code = render(&d);
    assert!(code.contains("  node_1[\"a\"]\n"));
    assert!(code.contains("  style step_2_b fill:"));
    assert!(code.contains("  node_1 --> step_2_b\n"));
}

#[test]
fn test_sanitize_id_helper() {
    assert_eq!(sanitize_id("ok_id_9"), "ok_id_9");
    assert_eq!(sanitize_id("a-b/c"), "a_b_c");
    assert_eq!(sanitize_id("é"), "_");
    assert_eq!(sanitize_id(""), "unknown");
}

#[test]
fn test_label_quotes_and_empty() {
    assert_eq!(escape_label(r#"say "hi""#), "say 'hi'");
    assert_eq!(escape_label("   "), "Untitled");
    let d = Diagram::with_parts(vec![Node::new("A", ShapeKind::Rectangle, "")], vec![]);
    assert!(render(&d).contains("  A[\"Untitled\"]\n"));
}

#[test]
fn test_style_uses_node_color() {
    let d = Diagram::with_parts(
        vec![Node::new("A", ShapeKind::Diamond, "ok?").with_color(Rgb::new(0x12, 0xab, 0xef))],
        vec![],
    );
    assert!(render(&d).contains("  style A fill:#12ABEF\n"));
}

#[test]
fn test_connection_labels_not_emitted() {
    let d = Diagram::with_parts(
        vec![
            Node::new("A", ShapeKind::Rectangle, "a"),
            Node::new("B", ShapeKind::Rectangle, "b"),
        ],
        vec![Connection::new("A", "B").labeled("yes")],
    );
    let code = render(&d);
    assert!(code.contains("  A --> B\n"));
    assert!(!code.contains("yes"));
}

#[test]
fn test_multiline_label_stays_on_one_line() {
    let d = Diagram::with_parts(
        vec![
            Node::new("A", ShapeKind::Rectangle, "First part\nsecond part"),
            Node::new("B", ShapeKind::Parallelogram, "  Upload\r\n\tfiles  "),
        ],
        vec![Connection::new("A", "B")],
    );
    let code = render(&d);
    assert!(code.contains("  A[\"First part second part\"]\n"), "{code}");
    assert!(code.contains("  B[/\"Upload files\"\\]\n"), "{code}");
    // Header, two lines per node, one per connection.
    assert_eq!(code.lines().count(), 1 + 2 * 2 + 1);
    assert!(code.lines().skip(1).all(|l| l.starts_with("  ")));
}

#[test]
fn test_escape_label_collapses_whitespace() {
    assert_eq!(escape_label("a\n\n  b\tc"), "a b c");
    assert_eq!(escape_label("\n\t "), "Untitled");
}

#[test]
fn test_brackets_inside_label_are_quoted() {
    let d = Diagram::with_parts(
        vec![
            Node::new("A", ShapeKind::Rectangle, "Create (PRD)"),
            Node::new("B", ShapeKind::Diamond, "Ready {v2}?"),
        ],
        vec![],
    );
    let code = render(&d);
    assert!(code.contains("  A[\"Create (PRD)\"]\n"));
    assert!(code.contains("  B{\"Ready {v2}?\"}\n"));
}
