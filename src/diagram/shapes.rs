//! Shape catalogue: how each kind is named, colored, and exported.

use super::types::{Rgb, ShapeKind};

/// Static description of one shape kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub kind: ShapeKind,
    pub display_name: &'static str,
    pub color: Rgb,
    /// Opening bracket in the graph-description export.
    pub open: &'static str,
    /// Closing bracket in the graph-description export.
    pub close: &'static str,
    /// Which PRD sections this shape is meant for.
    pub use_for: &'static str,
    pub icon: &'static str,
}

pub static SHAPE_DEFINITIONS: [ShapeDefinition; 7] = [
    ShapeDefinition {
        kind: ShapeKind::Stadium,
        display_name: "Stadium/Oval",
        color: Rgb::new(0xED, 0x1B, 0x76),
        open: "([",
        close: "])",
        use_for: "Start/End Points, Users, Actors",
        icon: "⬭",
    },
    ShapeDefinition {
        kind: ShapeKind::Rectangle,
        display_name: "Rectangle",
        color: Rgb::new(0x06, 0x7D, 0x72),
        open: "[",
        close: "]",
        use_for: "Standard Items, Features, Processes",
        icon: "▭",
    },
    ShapeDefinition {
        kind: ShapeKind::Rounded,
        display_name: "Rounded Box",
        color: Rgb::new(0xE0, 0xF5, 0xF3),
        open: "[\"",
        close: "\"]",
        use_for: "Descriptions, Details, Pain Points",
        icon: "▢",
    },
    ShapeDefinition {
        kind: ShapeKind::Parallelogram,
        display_name: "Parallelogram",
        color: Rgb::new(0xFF, 0xD7, 0x00),
        open: "[/\"",
        close: "\"\\]",
        use_for: "Functional Requirements (FR)",
        icon: "▱",
    },
    ShapeDefinition {
        kind: ShapeKind::Diamond,
        display_name: "Diamond",
        color: Rgb::new(0xFF, 0xFF, 0xFF),
        open: "{",
        close: "}",
        use_for: "Decisions, Status, Conditions",
        icon: "◆",
    },
    ShapeDefinition {
        kind: ShapeKind::Hexagon,
        display_name: "Hexagon",
        color: Rgb::new(0x0B, 0x1C, 0x3D),
        open: "{{",
        close: "}}",
        use_for: "Constraints, Rules, Limitations",
        icon: "⬡",
    },
    ShapeDefinition {
        kind: ShapeKind::Cylinder,
        display_name: "Cylinder",
        color: Rgb::new(0xFF, 0xE4, 0xEC),
        open: "[(",
        close: ")]",
        use_for: "Databases, Storage",
        icon: "⬮",
    },
];

/// Catalogue entry for `kind`.
pub fn definition(kind: ShapeKind) -> &'static ShapeDefinition {
    // The table is ordered like `ShapeKind::ALL`.
    let idx = ShapeKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(1);
    &SHAPE_DEFINITIONS[idx]
}

/// One legend row per kind: `icon display_name: use_for`.
pub fn legend() -> Vec<String> {
    SHAPE_DEFINITIONS
        .iter()
        .map(|d| format!("{} {}: {}", d.icon, d.display_name, d.use_for))
        .collect()
}
