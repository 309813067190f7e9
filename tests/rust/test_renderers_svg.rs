use super::*;
use crate::diagram::{Connection, Node, Rgb, ShapeKind};

fn render(d: &Diagram) -> String {
    SvgRenderer::default().render(d)
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_escape() {
    assert_eq!(escape(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
}

#[test]
fn test_num_formatting() {
    assert_eq!(num(140.0), "140");
    assert_eq!(num(97.5), "97.5");
    assert_eq!(num(1.0 / 3.0), "0.33");
    assert_eq!(num(-0.0001), "0");
}

#[test]
fn test_empty_diagram_is_valid_svg() {
    let svg = render(&Diagram::new());
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"viewBox="-40 -40 80 80""#));
    assert_eq!(count(&svg, "<g class=\"node"), 0);
}

#[test]
fn test_sample_has_nodes_edges_and_background() {
    let svg = render(&Diagram::sample());
    assert!(svg.contains(r##"fill="#0F172A""##));
    assert_eq!(count(&svg, "<g class=\"node"), 3);
    assert_eq!(count(&svg, "<line x1"), 2 + 2); // two connectors, two cylinder sides
    assert_eq!(count(&svg, r#"marker-end="url(#arrowhead)""#), 2);
    assert!(svg.contains(r#"<g class="node stadium" data-id="A">"#));
    assert!(svg.contains(r#"<g class="node cylinder" data-id="C">"#));
}

#[test]
fn test_view_box_covers_nodes_with_margin() {
    let svg = render(&Diagram::sample());
    // Nodes span x 260..540 and y 50..550 in the sample.
    assert!(svg.contains(r#"viewBox="220 10 360 580""#), "{svg}");
    assert!(svg.contains(r#"width="360" height="580""#));
}

#[test]
fn test_edges_drawn_before_nodes() {
    let svg = render(&Diagram::sample());
    let first_edge = svg.find("marker-end").expect("edge present");
    let first_node = svg.find("<g class=\"node").expect("node present");
    assert!(first_edge < first_node);
}

#[test]
fn test_connector_anchors_on_shape_edges() {
    let svg = render(&Diagram::sample());
    // A (400,100) → B (400,300): bottom of A to top of B.
    assert!(
        svg.contains(r#"<line x1="400" y1="150" x2="400" y2="250""#),
        "{svg}"
    );
}

#[test]
fn test_missing_endpoint_edge_skipped() {
    let mut d = Diagram::sample();
    d.connections.push(Connection::new("C", "nowhere"));
    let svg = render(&d);
    assert_eq!(count(&svg, r#"marker-end="url(#arrowhead)""#), 2);
    assert_eq!(count(&svg, "<g class=\"node"), 3);
}

#[test]
fn test_edge_label_rendered_at_midpoint() {
    let d = Diagram::with_parts(
        vec![
            Node::new("A", ShapeKind::Rectangle, "a").at(0.0, 0.0),
            Node::new("B", ShapeKind::Rectangle, "b").at(0.0, 400.0),
        ],
        vec![Connection::new("A", "B").labeled("on <success>")],
    );
    let svg = render(&d);
    assert!(svg.contains(
        r##"<text x="0" y="194" text-anchor="middle" font-family="Inter, Helvetica, Arial, sans-serif" font-size="12" fill="#E2E8F0">on &lt;success&gt;</text>"##
    ), "{svg}");
}

#[test]
fn test_self_loop_drawn_as_curve() {
    let d = Diagram::with_parts(
        vec![Node::new("A", ShapeKind::Rectangle, "retry").at(0.0, 0.0)],
        vec![Connection::new("A", "A")],
    );
    let svg = render(&d);
    assert_eq!(count(&svg, "<path d=\"M "), 1);
    assert!(svg.contains(" C "));
}

#[test]
fn test_text_wraps_into_tspans() {
    let d = Diagram::with_parts(
        vec![Node::new(
            "A",
            ShapeKind::Diamond,
            "Should the exporter support every legacy format",
        )],
        vec![],
    );
    let svg = render(&d);
    assert!(count(&svg, "<tspan") >= 3);
}

#[test]
fn test_text_color_contrasts_fill() {
    let d = Diagram::with_parts(
        vec![
            Node::new("L", ShapeKind::Diamond, "light").with_color(Rgb::WHITE),
            Node::new("D", ShapeKind::Hexagon, "dark").at(400.0, 0.0),
        ],
        vec![],
    );
    let svg = render(&d);
    assert!(svg.contains(r##"fill="#000000"><tspan"##));
    assert!(svg.contains(r##"fill="#FFFFFF"><tspan"##));
}

#[test]
fn test_tooltip_uses_full_text() {
    let d = Diagram::with_parts(
        vec![Node::new("A", ShapeKind::Rounded, "Short").with_full_text("The long & full text")],
        vec![],
    );
    let svg = render(&d);
    assert!(svg.contains("<title>The long &amp; full text</title>"));
}

#[test]
fn test_caption_drawn_when_enabled() {
    let config = RenderConfig {
        show_kind_caption: true,
        ..RenderConfig::default()
    };
    let svg = SvgRenderer::new(config).render(&Diagram::sample());
    assert!(svg.contains(">Stadium/Oval</text>"));
    assert!(svg.contains(">Cylinder</text>"));
}

#[test]
fn test_render_is_deterministic() {
    let d = Diagram::sample();
    assert_eq!(render(&d), render(&d));
}
