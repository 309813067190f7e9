//! Connector routing between measured shapes.
//!
//! A straight connector leaves the source along the line joining the two
//! centers and enters the destination from the opposite direction, so any
//! relative placement (including diagonal offsets) gets anchors on the
//! facing sides. Self-loops become a small curve on the right of the shape.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::shape::ShapeBox;
use crate::config::RenderConfig;
use crate::diagram::{Connection, Diagram, NodeId, Point};

/// Angular half-spread of a self-loop's anchors around the shape's right side.
const SELF_LOOP_SPREAD: f64 = PI / 12.0;
/// How far a self-loop's control points reach outside the shape.
const SELF_LOOP_REACH: f64 = 40.0;

/// Geometry of one drawn connector.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgePath {
    Straight {
        start: Point,
        end: Point,
    },
    /// Cubic Bézier from `start` to `end` through two control points.
    SelfLoop {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl EdgePath {
    pub fn start(&self) -> Point {
        match self {
            EdgePath::Straight { start, .. } | EdgePath::SelfLoop { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            EdgePath::Straight { end, .. } | EdgePath::SelfLoop { end, .. } => *end,
        }
    }

    /// Where a label sits: the segment midpoint, or the curve's halfway point.
    pub fn label_anchor(&self) -> Point {
        match self {
            EdgePath::Straight { start, end } => start.midpoint(*end),
            EdgePath::SelfLoop {
                start,
                control1,
                control2,
                end,
            } => Point::new(
                (start.x + 3.0 * control1.x + 3.0 * control2.x + end.x) / 8.0,
                (start.y + 3.0 * control1.y + 3.0 * control2.y + end.y) / 8.0,
            ),
        }
    }
}

/// A routed connection, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub from: NodeId,
    pub to: NodeId,
    pub path: EdgePath,
    pub label: Option<String>,
}

impl Route {
    pub fn label_anchor(&self) -> Point {
        self.path.label_anchor()
    }
}

/// Anchors for a connector between two distinct shapes.
pub fn straight_path(from: &ShapeBox, to: &ShapeBox) -> EdgePath {
    let angle = from.center.angle_to(to.center);
    EdgePath::Straight {
        start: from.boundary_point(angle),
        end: to.boundary_point(angle + PI),
    }
}

/// A loop leaving and re-entering `shape` on its right side.
pub fn self_loop_path(shape: &ShapeBox) -> EdgePath {
    let start = shape.boundary_point(-SELF_LOOP_SPREAD);
    let end = shape.boundary_point(SELF_LOOP_SPREAD);
    EdgePath::SelfLoop {
        start,
        control1: Point::new(start.x + SELF_LOOP_REACH, start.y - SELF_LOOP_REACH),
        control2: Point::new(end.x + SELF_LOOP_REACH, end.y + SELF_LOOP_REACH),
        end,
    }
}

/// Routes connections of one diagram against its measured shapes.
pub struct ConnectorRouter<'a> {
    shapes: HashMap<&'a str, ShapeBox>,
}

impl<'a> ConnectorRouter<'a> {
    pub fn new(diagram: &'a Diagram, config: &RenderConfig) -> Self {
        let mut shapes = HashMap::with_capacity(diagram.nodes.len());
        for node in &diagram.nodes {
            // First definition wins on duplicate ids.
            shapes
                .entry(node.id.as_str())
                .or_insert_with(|| ShapeBox::measure(node, config));
        }
        Self { shapes }
    }

    pub fn shape(&self, id: &str) -> Option<&ShapeBox> {
        self.shapes.get(id)
    }

    /// Route one connection, or `None` when either endpoint is missing.
    pub fn route(&self, connection: &Connection) -> Option<Route> {
        let (Some(from), Some(to)) = (
            self.shapes.get(connection.from.as_str()),
            self.shapes.get(connection.to.as_str()),
        ) else {
            tracing::warn!(
                from = %connection.from,
                to = %connection.to,
                "skipping connector with a missing endpoint"
            );
            return None;
        };
        let path = if connection.is_self_loop() {
            self_loop_path(from)
        } else {
            straight_path(from, to)
        };
        Some(Route {
            from: connection.from.clone(),
            to: connection.to.clone(),
            path,
            label: connection.label.clone(),
        })
    }

    /// Route every connection in order, skipping the unroutable ones.
    pub fn route_all(&self, connections: &[Connection]) -> Vec<Route> {
        connections.iter().filter_map(|c| self.route(c)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_geometry_connector.rs"]
mod tests;
