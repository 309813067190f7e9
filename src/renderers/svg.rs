//! SVG renderer: draws a diagram's shapes and connectors as an SVG string.
//!
//! Connectors are drawn first and shapes on top of them, so a connector
//! never hides a node's text. Connectors with a missing endpoint are
//! skipped; everything else still renders.

use std::fmt::Write as _;

use super::Renderer;
use crate::config::RenderConfig;
use crate::diagram::{Diagram, Node, definition};
use crate::geometry::{ConnectorRouter, EdgePath, Primitive, Route, ShapeBox};

// ── Constants ────────────────────────────────────────────────────────────────

const BACKGROUND: &str = "#0F172A";
const EDGE_COLOR: &str = "#94A3B8";
const EDGE_LABEL_COLOR: &str = "#E2E8F0";
const SHAPE_STROKE: &str = "#334155";
const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";
const EDGE_LABEL_SIZE: f64 = 12.0;
const CAPTION_SIZE: f64 = 11.0;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format a coordinate with at most two decimals.
fn num(v: f64) -> String {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 {
        "0".to_string()
    } else {
        format!("{r}")
    }
}

fn font(size: f64) -> String {
    format!(r#"font-family="{FONT_FAMILY}" font-size="{}""#, num(size))
}

// ── Bounds ───────────────────────────────────────────────────────────────────

/// Axis-aligned box covering every shape, or `None` for an empty diagram.
fn bounds(boxes: &[ShapeBox]) -> Option<(f64, f64, f64, f64)> {
    boxes.iter().fold(None, |acc, b| {
        let (w, h) = b.extent();
        let (x0, y0) = (b.center.x - w / 2.0, b.center.y - h / 2.0);
        let (x1, y1) = (b.center.x + w / 2.0, b.center.y + h / 2.0);
        Some(match acc {
            None => (x0, y0, x1, y1),
            Some((ax0, ay0, ax1, ay1)) => (ax0.min(x0), ay0.min(y0), ax1.max(x1), ay1.max(y1)),
        })
    })
}

// ── Shape rendering ───────────────────────────────────────────────────────────

fn render_primitive(out: &mut String, prim: &Primitive, fill: &str) {
    let paint = format!(r#"fill="{fill}" stroke="{SHAPE_STROKE}" stroke-width="2""#);
    let _ = match prim {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            rx,
        } => writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" {paint}/>"#,
            num(*x),
            num(*y),
            num(*width),
            num(*height),
            num(*rx)
        ),
        Primitive::Polygon(points) => {
            let pts = points
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, r#"  <polygon points="{pts}" {paint}/>"#)
        }
        Primitive::Ellipse { cx, cy, rx, ry } => writeln!(
            out,
            r#"  <ellipse cx="{}" cy="{}" rx="{}" ry="{}" {paint}/>"#,
            num(*cx),
            num(*cy),
            num(*rx),
            num(*ry)
        ),
        Primitive::Line { from, to } => writeln!(
            out,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{SHAPE_STROKE}" stroke-width="2"/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y)
        ),
    };
}

fn render_node(out: &mut String, node: &Node, shape: &ShapeBox, config: &RenderConfig) {
    let fill = node.color.to_hex();
    let text_fill = node.color.contrasting_text().to_hex();
    let _ = writeln!(out, r#"<g class="node {}" data-id="{}">"#, node.kind, escape(&node.id));
    let _ = writeln!(out, "  <title>{}</title>", escape(node.detail()));
    for prim in shape.outline() {
        render_primitive(out, &prim, &fill);
    }

    let (caption, anchors) = shape.text_anchors(&config.font);
    if let Some(at) = caption {
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="{}" text-anchor="middle" {} fill="{text_fill}" opacity="0.7">{}</text>"#,
            num(at.x),
            num(at.y),
            font(CAPTION_SIZE),
            escape(definition(node.kind).display_name)
        );
    }
    if !anchors.is_empty() {
        let tspans: String = shape
            .lines
            .iter()
            .zip(&anchors)
            .map(|(line, at)| {
                format!(
                    r#"<tspan x="{}" y="{}">{}</tspan>"#,
                    num(at.x),
                    num(at.y),
                    escape(line)
                )
            })
            .collect();
        let _ = writeln!(
            out,
            r#"  <text text-anchor="middle" {} fill="{text_fill}">{tspans}</text>"#,
            font(config.font.font_size)
        );
    }
    out.push_str("</g>\n");
}

// ── Edge rendering ────────────────────────────────────────────────────────────

fn render_edge(out: &mut String, route: &Route) {
    let stroke = format!(
        r#"fill="none" stroke="{EDGE_COLOR}" stroke-width="2" marker-end="url(#arrowhead)""#
    );
    let _ = match &route.path {
        EdgePath::Straight { start, end } => writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {stroke}/>"#,
            num(start.x),
            num(start.y),
            num(end.x),
            num(end.y)
        ),
        EdgePath::SelfLoop {
            start,
            control1,
            control2,
            end,
        } => writeln!(
            out,
            r#"<path d="M {} {} C {} {}, {} {}, {} {}" {stroke}/>"#,
            num(start.x),
            num(start.y),
            num(control1.x),
            num(control1.y),
            num(control2.x),
            num(control2.y),
            num(end.x),
            num(end.y)
        ),
    };

    if let Some(label) = route.label.as_deref().filter(|l| !l.is_empty()) {
        let at = route.label_anchor();
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" {} fill="{EDGE_LABEL_COLOR}">{}</text>"#,
            num(at.x),
            num(at.y - 6.0),
            font(EDGE_LABEL_SIZE),
            escape(label)
        );
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Renders diagrams to standalone SVG documents.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    pub config: RenderConfig,
}

impl SvgRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, diagram: &Diagram) -> String {
        let config = &self.config;
        let boxes: Vec<ShapeBox> = diagram
            .nodes
            .iter()
            .map(|n| ShapeBox::measure(n, config))
            .collect();

        let m = config.margin;
        let (x0, y0, x1, y1) = bounds(&boxes).unwrap_or((0.0, 0.0, 0.0, 0.0));
        let (vx, vy) = (x0 - m, y0 - m);
        let (vw, vh) = (x1 - x0 + 2.0 * m, y1 - y0 + 2.0 * m);

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            num(vw),
            num(vh),
            num(vx),
            num(vy),
            num(vw),
            num(vh)
        );
        out.push_str("<defs>\n");
        out.push_str(
            r#"  <marker id="arrowhead" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto">"#,
        );
        out.push('\n');
        let _ = writeln!(
            out,
            r#"    <polygon points="0 0, 10 3.5, 0 7" fill="{EDGE_COLOR}"/>"#
        );
        out.push_str("  </marker>\n</defs>\n");
        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{BACKGROUND}"/>"#,
            num(vx),
            num(vy),
            num(vw),
            num(vh)
        );

        let router = ConnectorRouter::new(diagram, config);
        for route in router.route_all(&diagram.connections) {
            render_edge(&mut out, &route);
        }

        for (node, shape) in diagram.nodes.iter().zip(&boxes) {
            render_node(&mut out, node, shape, config);
        }

        out.push_str("</svg>\n");
        out
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_svg.rs"]
mod tests;
