//! flowprd: PRD section graphs drawn as shape diagrams.
//!
//! Public API: `render_json()` for one-shot conversion, `DiagramSurface`
//! for undoable editing.

pub mod config;
pub mod diagram;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod renderers;
pub mod service;

pub use config::{RenderConfig, ServiceConfig};
pub use diagram::{Connection, Diagram, Node, NodeId, Point, Rgb, ShapeKind};
pub use editor::DiagramSurface;
pub use error::{Error, Result};
pub use renderers::{Format, Renderer};

/// Read a diagram from its JSON form and render it as text.
///
/// Pipeline: JSON → Diagram → (optional auto-layout) → renderer.
pub fn render_json(src: &str, auto_layout: bool, format: Format) -> Result<String> {
    render_json_with_config(src, auto_layout, format, &RenderConfig::default())
}

pub fn render_json_with_config(
    src: &str,
    auto_layout: bool,
    format: Format,
    config: &RenderConfig,
) -> Result<String> {
    let mut diagram = Diagram::from_json(src)?;
    if auto_layout {
        diagram = layout::layout_with_config(&diagram, config);
    }
    Ok(format.renderer(config).render(&diagram))
}
