//! PNG export: rasterizes the SVG rendering with resvg.

use thiserror::Error;

use super::Renderer;
use super::svg::SvgRenderer;
use crate::diagram::Diagram;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f32),
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Render `diagram` with `renderer` and encode the result as PNG bytes.
pub fn render_png(
    diagram: &Diagram,
    renderer: &SvgRenderer,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    svg_to_png(&renderer.render(diagram), options)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale)?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn svg_to_pixmap(svg: &str, scale: f32) -> Result<tiny_skia::Pixmap> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RasterError::InvalidScale(scale));
    }

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // usvg maps the root viewBox onto `size`, min corner included.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width_px, height_px, "rasterized diagram");
    Ok(pixmap)
}
