//! Per-kind shape geometry: text fitting, outlines, and boundary anchors.
//!
//! All functions are pure. Coordinates are diagram pixels with y growing
//! downwards; a node's position is the center of its shape.

use super::wrap::wrap;
use crate::config::{FontMetrics, RenderConfig};
use crate::diagram::{Node, Point, ShapeKind};

// ─── Shape constants ─────────────────────────────────────────────────────────

/// The diamond is a rotated square whose diagonal is this factor of the larger side.
pub const DIAMOND_SCALE: f64 = 1.2;
/// Horizontal slant of the parallelogram's top and bottom edges.
pub const PARALLELOGRAM_SKEW: f64 = 15.0;
pub const HEXAGON_WIDTH_RATIO: f64 = 0.85;
/// Inset of the hexagon's top and bottom edges, as a fraction of its width.
pub const HEXAGON_INSET_RATIO: f64 = 0.2;
pub const CYLINDER_CAP_RY: f64 = 10.0;
pub const ROUNDED_RADIUS: f64 = 10.0;

// ─── Text fitting ────────────────────────────────────────────────────────────

/// Fraction of the nominal width available for text.
pub fn usable_width_ratio(kind: ShapeKind) -> f64 {
    match kind {
        ShapeKind::Hexagon => 0.65,
        ShapeKind::Diamond => 0.5,
        ShapeKind::Parallelogram => 0.8,
        ShapeKind::Stadium | ShapeKind::Rectangle | ShapeKind::Rounded | ShapeKind::Cylinder => {
            0.9
        }
    }
}

/// Characters per wrapped line for a shape of `width`. Never less than one.
pub fn max_chars_per_line(kind: ShapeKind, width: f64, font: &FontMetrics) -> usize {
    let usable = width * usable_width_ratio(kind);
    if !(usable.is_finite() && font.pixels_per_char > 0.0) {
        return 1;
    }
    ((usable / font.pixels_per_char).floor() as usize).max(1)
}

/// Height needed to show `line_count` lines, plus the caption row if drawn.
pub fn required_height(line_count: usize, font: &FontMetrics, with_caption: bool) -> f64 {
    let caption = if with_caption {
        font.caption_height
    } else {
        0.0
    };
    line_count as f64 * font.line_height + font.vertical_padding + caption
}

// ─── Outlines ────────────────────────────────────────────────────────────────

/// A drawing primitive, in absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
    },
    Polygon(Vec<Point>),
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    /// A stroke-only segment.
    Line { from: Point, to: Point },
}

fn diamond_size(width: f64, height: f64) -> f64 {
    (width * DIAMOND_SCALE).max(height * DIAMOND_SCALE)
}

/// Primitives that draw `kind` centered on `center`, back to front.
pub fn outline(kind: ShapeKind, center: Point, width: f64, height: f64) -> Vec<Primitive> {
    let Point { x, y } = center;
    let left = x - width / 2.0;
    let top = y - height / 2.0;
    match kind {
        ShapeKind::Stadium => vec![Primitive::Rect {
            x: left,
            y: top,
            width,
            height,
            rx: height / 2.0,
        }],
        ShapeKind::Rectangle => vec![Primitive::Rect {
            x: left,
            y: top,
            width,
            height,
            rx: 0.0,
        }],
        ShapeKind::Rounded => vec![Primitive::Rect {
            x: left,
            y: top,
            width,
            height,
            rx: ROUNDED_RADIUS,
        }],
        ShapeKind::Parallelogram => {
            let s = PARALLELOGRAM_SKEW;
            let (hw, hh) = (width / 2.0, height / 2.0);
            vec![Primitive::Polygon(vec![
                Point::new(x - hw + s, y - hh),
                Point::new(x + hw + s, y - hh),
                Point::new(x + hw - s, y + hh),
                Point::new(x - hw - s, y + hh),
            ])]
        }
        ShapeKind::Diamond => {
            let r = diamond_size(width, height) / 2.0;
            vec![Primitive::Polygon(vec![
                Point::new(x, y - r),
                Point::new(x + r, y),
                Point::new(x, y + r),
                Point::new(x - r, y),
            ])]
        }
        ShapeKind::Hexagon => {
            let hex_w = width * HEXAGON_WIDTH_RATIO;
            let inset = hex_w * HEXAGON_INSET_RATIO;
            let (hw, hh) = (hex_w / 2.0, height / 2.0);
            vec![Primitive::Polygon(vec![
                Point::new(x - hw + inset, y - hh),
                Point::new(x + hw - inset, y - hh),
                Point::new(x + hw, y),
                Point::new(x + hw - inset, y + hh),
                Point::new(x - hw + inset, y + hh),
                Point::new(x - hw, y),
            ])]
        }
        ShapeKind::Cylinder => {
            let body_h = (height - 2.0 * CYLINDER_CAP_RY).max(0.0);
            let body_top = y - body_h / 2.0;
            let body_bottom = y + body_h / 2.0;
            let rx = width / 2.0;
            vec![
                Primitive::Ellipse {
                    cx: x,
                    cy: body_top,
                    rx,
                    ry: CYLINDER_CAP_RY,
                },
                Primitive::Rect {
                    x: left,
                    y: body_top,
                    width,
                    height: body_h,
                    rx: 0.0,
                },
                Primitive::Line {
                    from: Point::new(left, body_top),
                    to: Point::new(left, body_bottom),
                },
                Primitive::Line {
                    from: Point::new(x + rx, body_top),
                    to: Point::new(x + rx, body_bottom),
                },
                Primitive::Ellipse {
                    cx: x,
                    cy: body_bottom,
                    rx,
                    ry: CYLINDER_CAP_RY,
                },
            ]
        }
    }
}

/// Width and height of the area `kind` actually covers.
pub fn extent(kind: ShapeKind, width: f64, height: f64) -> (f64, f64) {
    match kind {
        ShapeKind::Diamond => {
            let d = diamond_size(width, height);
            (d, d)
        }
        ShapeKind::Parallelogram => (width + 2.0 * PARALLELOGRAM_SKEW, height),
        _ => (width, height),
    }
}

// ─── Boundary anchors ────────────────────────────────────────────────────────

/// Where a ray leaving `center` at `angle` crosses the shape's silhouette.
///
/// Diamonds use their own half-diagonal; every other kind is treated as its
/// `width × height` box.
pub fn boundary_point(
    kind: ShapeKind,
    center: Point,
    width: f64,
    height: f64,
    angle: f64,
) -> Point {
    if !(angle.is_finite() && width > 0.0 && height > 0.0) {
        return center;
    }
    let (sin, cos) = angle.sin_cos();
    match kind {
        ShapeKind::Diamond => {
            let r = diamond_size(width, height) / 2.0;
            let t = r / (cos.abs() + sin.abs());
            Point::new(center.x + t * cos, center.y + t * sin)
        }
        _ => rect_boundary(center, width / 2.0, height / 2.0, cos, sin),
    }
}

fn rect_boundary(center: Point, hw: f64, hh: f64, cos: f64, sin: f64) -> Point {
    // Exits through a vertical edge when |tan| <= hh / hw.
    if hw * sin.abs() <= hh * cos.abs() {
        let dx = hw.copysign(cos);
        Point::new(center.x + dx, center.y + hw * sin / cos.abs())
    } else {
        let dy = hh.copysign(sin);
        Point::new(center.x + hh * cos / sin.abs(), center.y + dy)
    }
}

// ─── ShapeBox ────────────────────────────────────────────────────────────────

/// A node measured for drawing: final size and wrapped text.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBox {
    pub kind: ShapeKind,
    pub center: Point,
    pub width: f64,
    /// Final height: the nominal height, grown to fit the text.
    pub height: f64,
    pub lines: Vec<String>,
    pub with_caption: bool,
}

impl ShapeBox {
    pub fn measure(node: &Node, config: &RenderConfig) -> Self {
        let width = config.node_width;
        let per_line = max_chars_per_line(node.kind, width, &config.font);
        let lines = wrap(&node.label, per_line);
        let needed = required_height(lines.len(), &config.font, config.show_kind_caption);
        Self {
            kind: node.kind,
            center: node.position,
            width,
            height: config.node_height.max(needed),
            lines,
            with_caption: config.show_kind_caption,
        }
    }

    pub fn extent(&self) -> (f64, f64) {
        extent(self.kind, self.width, self.height)
    }

    pub fn boundary_point(&self, angle: f64) -> Point {
        boundary_point(self.kind, self.center, self.width, self.height, angle)
    }

    pub fn outline(&self) -> Vec<Primitive> {
        outline(self.kind, self.center, self.width, self.height)
    }

    /// Baseline anchor of each text line, and of the caption if shown.
    ///
    /// Lines are centered vertically on the shape; the caption sits one
    /// caption row above the first line.
    pub fn text_anchors(&self, font: &FontMetrics) -> (Option<Point>, Vec<Point>) {
        let caption_shift = if self.with_caption {
            font.caption_height / 2.0
        } else {
            0.0
        };
        let block = self.lines.len() as f64 * font.line_height;
        let start_y = self.center.y - block / 2.0 + font.font_size / 2.0 + caption_shift;
        let lines = (0..self.lines.len())
            .map(|i| Point::new(self.center.x, start_y + i as f64 * font.line_height))
            .collect();
        let caption = self
            .with_caption
            .then(|| Point::new(self.center.x, start_y - font.caption_height));
        (caption, lines)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_geometry_shape.rs"]
mod tests;
