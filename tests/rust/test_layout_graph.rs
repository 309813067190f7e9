use super::*;
use crate::diagram::{Connection, Node, ShapeKind};

fn make_diagram(nodes: &[&str], edges: &[(&str, &str)]) -> Diagram {
    Diagram::with_parts(
        nodes
            .iter()
            .map(|id| Node::new(*id, ShapeKind::Rectangle, *id))
            .collect(),
        edges
            .iter()
            .map(|(a, b)| Connection::new(*a, *b))
            .collect(),
    )
}

fn back_pairs(gir: &GraphIR) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = gir
        .back_edges()
        .into_iter()
        .map(|e| {
            let (s, t) = gir.digraph.edge_endpoints(e).expect("edge exists");
            (gir.digraph[s].id.clone(), gir.digraph[t].id.clone())
        })
        .collect();
    pairs.sort();
    pairs
}

// ── Basic construction ────────────────────────────────────────────────────

#[test]
fn test_empty_graph() {
    let gir = GraphIR::from_diagram(&Diagram::new());
    assert_eq!(gir.digraph.node_count(), 0);
    assert_eq!(gir.digraph.edge_count(), 0);
}

#[test]
fn test_nodes_and_edges_counted() {
    let gir = GraphIR::from_diagram(&make_diagram(&["A", "B", "C"], &[("A", "B"), ("B", "C")]));
    assert_eq!(gir.digraph.node_count(), 3);
    assert_eq!(gir.digraph.edge_count(), 2);
    assert_eq!(gir.dangling, 0);
}

#[test]
fn test_node_data_stored() {
    let d = Diagram::with_parts(vec![Node::new("A", ShapeKind::Diamond, "Alpha")], vec![]);
    let gir = GraphIR::from_diagram(&d);
    let data = &gir.digraph[gir.node_index["A"]];
    assert_eq!(data.id, "A");
    assert_eq!(data.position, 0);
}

#[test]
fn test_edge_data_stored() {
    let d = Diagram::with_parts(
        vec![
            Node::new("A", ShapeKind::Rectangle, "a"),
            Node::new("B", ShapeKind::Rectangle, "b"),
        ],
        vec![Connection::new("B", "B"), Connection::new("A", "B").labeled("goes")],
    );
    let gir = GraphIR::from_diagram(&d);
    let edge = gir
        .digraph
        .find_edge(gir.node_index["A"], gir.node_index["B"])
        .expect("edge A->B");
    assert_eq!(gir.digraph[edge].position, 1);
}

#[test]
fn test_dangling_connections_are_dropped() {
    let gir = GraphIR::from_diagram(&make_diagram(
        &["A", "B"],
        &[("A", "B"), ("A", "ghost"), ("ghost", "B")],
    ));
    assert_eq!(gir.digraph.edge_count(), 1);
    assert_eq!(gir.dangling, 2);
    assert!(!gir.node_index.contains_key("ghost"));
}

#[test]
fn test_first_definition_wins() {
    let d = Diagram::with_parts(
        vec![
            Node::new("A", ShapeKind::Rectangle, "First"),
            Node::new("A", ShapeKind::Diamond, "Second"),
        ],
        vec![],
    );
    let gir = GraphIR::from_diagram(&d);
    assert_eq!(gir.digraph.node_count(), 1);
    assert_eq!(gir.digraph[gir.node_index["A"]].position, 0);
}

// ── Back edges ────────────────────────────────────────────────────────────

#[test]
fn test_no_back_edges_in_dag() {
    let gir = GraphIR::from_diagram(&make_diagram(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
    ));
    assert!(gir.back_edges().is_empty());
}

#[test]
fn test_back_edge_closes_cycle_at_entry() {
    let gir = GraphIR::from_diagram(&make_diagram(
        &["A", "B", "C"],
        &[("A", "B"), ("B", "C"), ("C", "A")],
    ));
    assert_eq!(back_pairs(&gir), vec![("C".to_string(), "A".to_string())]);
}

#[test]
fn test_back_edge_depends_on_node_order() {
    // Visiting B first makes B the cycle entry.
    let gir = GraphIR::from_diagram(&make_diagram(&["B", "A"], &[("A", "B"), ("B", "A")]));
    assert_eq!(back_pairs(&gir), vec![("A".to_string(), "B".to_string())]);
}

#[test]
fn test_self_loop_is_back_edge() {
    let gir = GraphIR::from_diagram(&make_diagram(&["A", "B"], &[("A", "A"), ("A", "B")]));
    assert_eq!(back_pairs(&gir), vec![("A".to_string(), "A".to_string())]);
}

#[test]
fn test_cross_edge_is_not_back_edge() {
    let gir = GraphIR::from_diagram(&make_diagram(
        &["A", "B", "C"],
        &[("A", "B"), ("C", "B")],
    ));
    assert!(gir.back_edges().is_empty());
}

// ── Degree queries ────────────────────────────────────────────────────────

#[test]
fn test_degrees() {
    let gir = GraphIR::from_diagram(&make_diagram(
        &["A", "B", "C"],
        &[("A", "B"), ("A", "C"), ("C", "B")],
    ));
    assert_eq!(gir.in_degree("A"), 0);
    assert_eq!(gir.out_degree("A"), 2);
    assert_eq!(gir.in_degree("B"), 2);
    assert_eq!(gir.out_degree("B"), 0);
}

#[test]
fn test_degree_unknown_node_returns_zero() {
    let gir = GraphIR::from_diagram(&make_diagram(&["A"], &[]));
    assert_eq!(gir.in_degree("NONEXISTENT"), 0);
    assert_eq!(gir.out_degree("NONEXISTENT"), 0);
}

#[test]
fn test_isolation() {
    let gir = GraphIR::from_diagram(&make_diagram(
        &["A", "B", "L", "I"],
        &[("A", "B"), ("L", "L")],
    ));
    assert!(!gir.is_isolated("A"));
    assert!(!gir.is_isolated("L"));
    assert!(gir.is_isolated("I"));
}
