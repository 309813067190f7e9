//! Renderer trait and the export formats built on it.

pub mod mermaid;
#[cfg(feature = "raster")]
pub mod raster;
pub mod svg;

pub use mermaid::MermaidRenderer;
pub use svg::SvgRenderer;

use crate::config::RenderConfig;
use crate::diagram::Diagram;

/// Trait for diagram renderers.
pub trait Renderer {
    /// Render a diagram to a string.
    fn render(&self, diagram: &Diagram) -> String;
}

/// Textual export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Svg,
    Mermaid,
    Json,
}

impl Format {
    pub fn renderer(self, config: &RenderConfig) -> Box<dyn Renderer> {
        match self {
            Format::Svg => Box::new(SvgRenderer::new(config.clone())),
            Format::Mermaid => Box::new(MermaidRenderer),
            Format::Json => Box::new(JsonRenderer),
        }
    }
}

/// Lossless JSON dump of `{nodes, connections}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, diagram: &Diagram) -> String {
        match diagram.to_json() {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "diagram is not representable as JSON");
                String::new()
            }
        }
    }
}
