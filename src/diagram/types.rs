//! Diagram data model: shape kinds, colors, nodes, connections.
//!
//! A `Diagram` is a plain value. The editor owns the live copy and the
//! history stores independent clones of it.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::shapes::definition;
use crate::error::EditError;

/// Node identifier, unique within a diagram.
pub type NodeId = String;

// ─── ShapeKind ───────────────────────────────────────────────────────────────

/// The seven shape categories a PRD section can be drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    Stadium, // actors, start/end
    #[default]
    Rectangle, // features, processes
    Rounded, // descriptions, pain points
    Parallelogram, // functional requirements
    Diamond, // decisions, status
    Hexagon, // constraints, rules
    Cylinder, // data stores
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Stadium,
        ShapeKind::Rectangle,
        ShapeKind::Rounded,
        ShapeKind::Parallelogram,
        ShapeKind::Diamond,
        ShapeKind::Hexagon,
        ShapeKind::Cylinder,
    ];

    /// Lowercase wire name.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Stadium => "stadium",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Rounded => "rounded",
            ShapeKind::Parallelogram => "parallelogram",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Cylinder => "cylinder",
        }
    }

    /// Strict lookup by name. `rounded_box` is accepted as an alias of `rounded`.
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let kind = match lower.as_str() {
            "stadium" => ShapeKind::Stadium,
            "rectangle" => ShapeKind::Rectangle,
            "rounded" | "rounded_box" => ShapeKind::Rounded,
            "parallelogram" => ShapeKind::Parallelogram,
            "diamond" => ShapeKind::Diamond,
            "hexagon" => ShapeKind::Hexagon,
            "cylinder" => ShapeKind::Cylinder,
            _ => return None,
        };
        Some(kind)
    }

    /// Lenient lookup: unknown names become `Rectangle`.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(shape = name, "unknown shape kind, falling back to rectangle");
            ShapeKind::Rectangle
        })
    }

    /// Fill color used when a node does not carry its own.
    pub fn default_color(self) -> Rgb {
        definition(self).color
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for ShapeKind {
    fn from(name: String) -> Self {
        Self::from_name_or_default(&name)
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.name().to_string()
    }
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?(?:([0-9a-fA-F]{6})|([0-9a-fA-F]{3}))$").expect("valid color regex")
});

/// An opaque 8-bit RGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (leading `#` optional).
    pub fn parse(text: &str) -> Option<Self> {
        let caps = HEX_COLOR.captures(text.trim())?;
        if let Some(full) = caps.get(1) {
            let v = u32::from_str_radix(full.as_str(), 16).ok()?;
            return Some(Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8));
        }
        let short = caps.get(2)?.as_str();
        let mut channels = short
            .chars()
            .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
        Some(Self::new(
            channels.next()??,
            channels.next()??,
            channels.next()??,
        ))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceived brightness in `[0, 1]`.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }

    /// Text color that stays readable on this fill.
    pub fn contrasting_text(self) -> Rgb {
        if self.luminance() > 0.6 {
            Rgb::new(0x00, 0x00, 0x00)
        } else {
            Rgb::WHITE
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value).ok_or_else(|| format!("invalid color '{value}', expected #RRGGBB"))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

// ─── Point ───────────────────────────────────────────────────────────────────

/// A position in diagram pixels. Node positions are shape centers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Angle of the vector `self → other`, as `atan2(dy, dx)`.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

// ─── Node ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "shape")]
    pub kind: ShapeKind,
    /// Short rendered text.
    #[serde(rename = "text", alias = "label")]
    pub label: String,
    /// Unabridged section content, shown on hover.
    #[serde(rename = "fullText", default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(flatten)]
    pub position: Point,
    pub color: Rgb,
}

impl Node {
    /// Create a node at the origin, filled with the kind's default color.
    pub fn new(id: impl Into<NodeId>, kind: ShapeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            full_text: None,
            position: Point::default(),
            color: kind.default_color(),
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn with_full_text(mut self, text: impl Into<String>) -> Self {
        self.full_text = Some(text.into());
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Text for the hover tooltip.
    pub fn detail(&self) -> &str {
        self.full_text.as_deref().unwrap_or(&self.label)
    }
}

// ─── Connection ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

// ─── Diagram ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self { nodes, connections }
    }

    /// Built-in diagram shown when the service cannot provide one.
    pub fn sample() -> Self {
        Self {
            nodes: vec![
                Node::new("A", ShapeKind::Stadium, "User").at(400.0, 100.0),
                Node::new("B", ShapeKind::Rectangle, "Create PRD").at(400.0, 300.0),
                Node::new("C", ShapeKind::Cylinder, "Database").at(400.0, 500.0),
            ],
            connections: vec![Connection::new("A", "B"), Connection::new("B", "C")],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn has_connection(&self, from: &str, to: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.from == from && c.to == to)
    }

    /// Connections incident to `id`, in order.
    pub fn connections_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.touches(id))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse the JSON form. Node ids must be unique.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let diagram: Self = serde_json::from_str(text)?;
        diagram.check_unique_ids()?;
        Ok(diagram)
    }

    /// Fails on the first node whose id repeats an earlier one.
    pub fn check_unique_ids(&self) -> Result<(), EditError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(EditError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_diagram_types.rs"]
mod tests;
