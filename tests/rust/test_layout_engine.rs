use super::*;
use crate::diagram::{Connection, Node, Point, ShapeKind};
use proptest::prelude::*;

fn sample_chain() -> Diagram {
    Diagram::with_parts(
        vec![
            Node::new("A", ShapeKind::Stadium, "User"),
            Node::new("B", ShapeKind::Rectangle, "Create PRD"),
            Node::new("C", ShapeKind::Cylinder, "Database"),
        ],
        vec![Connection::new("A", "B"), Connection::new("B", "C")],
    )
}

fn rect_diagram(n: usize, edges: &[(usize, usize)]) -> Diagram {
    Diagram::with_parts(
        (0..n)
            .map(|i| Node::new(format!("n{i}"), ShapeKind::Rectangle, format!("node {i}")))
            .collect(),
        edges
            .iter()
            .map(|(a, b)| Connection::new(format!("n{a}"), format!("n{b}")))
            .collect(),
    )
}

#[test]
fn test_chain_tiers_and_distinct_rows() {
    let d = sample_chain();
    let result = compute_layout(&d, &RenderConfig::default());
    assert_eq!(result.tier_count, 3);
    let tier = |id: &str| result.node(id).map(|n| n.tier);
    assert_eq!(tier("A"), Some(0));
    assert_eq!(tier("B"), Some(1));
    assert_eq!(tier("C"), Some(2));

    let laid = layout(&d);
    let ys: Vec<f64> = laid.nodes.iter().map(|n| n.position.y).collect();
    assert!(ys[0] < ys[1] && ys[1] < ys[2]);
}

#[test]
fn test_layout_keeps_ids_labels_and_order() {
    let d = sample_chain();
    let laid = layout(&d);
    assert_eq!(laid.connections, d.connections);
    for (before, after) in d.nodes.iter().zip(&laid.nodes) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.label, after.label);
        assert_eq!(before.kind, after.kind);
        assert_eq!(before.color, after.color);
    }
}

#[test]
fn test_layout_does_not_mutate_input() {
    let d = sample_chain();
    let before = d.clone();
    let _ = layout(&d);
    assert_eq!(d, before);
}

#[test]
fn test_layout_sample_positions() {
    let laid = layout(&sample_chain());
    let pos: Vec<Point> = laid.nodes.iter().map(|n| n.position).collect();
    assert_eq!(
        pos,
        vec![
            Point::new(140.0, 50.0),
            Point::new(140.0, 230.0),
            Point::new(140.0, 410.0)
        ]
    );
}

#[test]
fn test_tiers_separated_by_height_plus_margin() {
    let config = RenderConfig::default();
    let laid = layout(&sample_chain());
    for pair in laid.nodes.windows(2) {
        let dy = pair[1].position.y - pair[0].position.y;
        assert!(dy >= config.node_height + config.v_gap);
    }
}

#[test]
fn test_long_labels_grow_their_tier() {
    let mut d = sample_chain();
    d.nodes[0].label = "a very long description ".repeat(10);
    let laid = layout(&d);
    let grown = ShapeBox::measure(&d.nodes[0], &RenderConfig::default()).height;
    assert!(grown > 100.0);
    let gap = laid.nodes[1].position.y - laid.nodes[0].position.y;
    assert_eq!(gap, grown / 2.0 + 80.0 + 50.0);
}

#[test]
fn test_diamond_extent_widens_row() {
    let d = Diagram::with_parts(
        vec![
            Node::new("R", ShapeKind::Rectangle, "root"),
            Node::new("D", ShapeKind::Diamond, "ok?"),
            Node::new("E", ShapeKind::Rectangle, "end"),
        ],
        vec![Connection::new("R", "D"), Connection::new("R", "E")],
    );
    let result = compute_layout(&d, &RenderConfig::default());
    let dn = result.node("D").expect("D laid out");
    let en = result.node("E").expect("E laid out");
    assert_eq!(dn.width, 336.0);
    assert!(en.center.x - dn.center.x >= 168.0 + 60.0 + 140.0 - 1e-9);
}

#[test]
fn test_layout_is_deterministic() {
    let d = rect_diagram(6, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (5, 5)]);
    assert_eq!(layout(&d), layout(&d));
    assert_eq!(
        compute_layout(&d, &RenderConfig::default()),
        compute_layout(&d, &RenderConfig::default())
    );
}

#[test]
fn test_cycle_does_not_panic_and_places_all_nodes() {
    let d = rect_diagram(4, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 1)]);
    let result = compute_layout(&d, &RenderConfig::default());
    assert_eq!(result.nodes.len(), 4);
    assert!(!result.back_edges.is_empty());
    assert!(result.nodes.iter().all(|n| n.center.is_finite()));
}

#[test]
fn test_dangling_connections_ignored() {
    let mut d = sample_chain();
    d.connections.push(Connection::new("C", "ghost"));
    let with_ghost = layout(&d);
    assert_eq!(with_ghost.nodes, layout(&sample_chain()).nodes);
}

#[test]
fn test_empty_diagram_layout() {
    let result = compute_layout(&Diagram::new(), &RenderConfig::default());
    assert!(result.nodes.is_empty());
    assert_eq!(result.tier_count, 0);
    assert_eq!(layout(&Diagram::new()), Diagram::new());
}

#[test]
fn test_result_nodes_in_diagram_order() {
    let d = rect_diagram(4, &[(3, 0), (2, 1)]);
    let result = compute_layout(&d, &RenderConfig::default());
    let ids: Vec<&str> = result.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["n0", "n1", "n2", "n3"]);
}

fn dag_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..10).prop_flat_map(|n| {
        let edge = (0..n, 0..n).prop_filter_map("forward edge", |(a, b)| {
            (a < b).then_some((a, b))
        });
        (Just(n), proptest::collection::vec(edge, 0..20))
    })
}

proptest! {
    #[test]
    fn prop_acyclic_children_below_parents((n, edges) in dag_strategy()) {
        let d = rect_diagram(n, &edges);
        let result = compute_layout(&d, &RenderConfig::default());
        prop_assert!(result.back_edges.is_empty());
        for (a, b) in &edges {
            let ta = result.node(&format!("n{a}")).expect("laid out").tier;
            let tb = result.node(&format!("n{b}")).expect("laid out").tier;
            prop_assert!(tb > ta);
        }
    }

    #[test]
    fn prop_same_tier_distinct_positions(
        n in 1usize..12,
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..24),
    ) {
        let edges: Vec<(usize, usize)> =
            edges.into_iter().filter(|(a, b)| *a < n && *b < n).collect();
        let d = rect_diagram(n, &edges);
        let result = compute_layout(&d, &RenderConfig::default());
        prop_assert_eq!(result.nodes.len(), n);
        for (i, a) in result.nodes.iter().enumerate() {
            for b in &result.nodes[i + 1..] {
                if a.tier == b.tier {
                    prop_assert!((a.center.x - b.center.x).abs() >= 280.0 + 60.0 - 1e-9);
                    prop_assert_eq!(a.center.y, b.center.y);
                } else {
                    prop_assert!((a.center.y - b.center.y).abs() >= 100.0 + 80.0 - 1e-9);
                }
            }
        }
    }

    #[test]
    fn prop_layout_deterministic(
        n in 1usize..10,
        edges in proptest::collection::vec((0usize..10, 0usize..10), 0..20),
    ) {
        let edges: Vec<(usize, usize)> =
            edges.into_iter().filter(|(a, b)| *a < n && *b < n).collect();
        let d = rect_diagram(n, &edges);
        prop_assert_eq!(layout(&d), layout(&d));
    }
}
