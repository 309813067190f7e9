//! Configuration for geometry, layout, and the external diagram service.

use std::time::Duration;

/// Font metrics used to fit wrapped text inside shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    pub font_size: f64,
    /// Average advance width of one character.
    pub pixels_per_char: f64,
    pub line_height: f64,
    /// Space above and below the text block, combined.
    pub vertical_padding: f64,
    /// Height of the shape-kind caption row, when captions are shown.
    pub caption_height: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            font_size: 15.0,
            pixels_per_char: 9.0,
            line_height: 20.0,
            vertical_padding: 25.0,
            caption_height: 20.0,
        }
    }
}

/// Configuration for the rendering and layout pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub font: FontMetrics,
    /// Nominal shape width before any kind-specific adjustment.
    pub node_width: f64,
    /// Minimum shape height; shapes grow past it to fit their text.
    pub node_height: f64,
    /// Horizontal gap between neighbouring shapes of one tier.
    pub h_gap: f64,
    /// Vertical margin between consecutive tiers.
    pub v_gap: f64,
    /// Draw the shape-kind name above the body text.
    pub show_kind_caption: bool,
    /// Blank space around the drawing in exported images.
    pub margin: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: FontMetrics::default(),
            node_width: 280.0,
            node_height: 100.0,
            h_gap: 60.0,
            v_gap: 80.0,
            show_kind_caption: false,
            margin: 40.0,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api/transform";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 5;

/// Where and how to reach the text-to-diagram service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub timeout: Duration,
    /// Largest upload accepted before any network call is made.
    pub max_file_bytes: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_file_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
        }
    }
}

impl ServiceConfig {
    /// Defaults overridden by `FLOWPRD_API_URL`, `FLOWPRD_TIMEOUT_SECS`
    /// and `FLOWPRD_MAX_FILE_SIZE_MB`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("FLOWPRD_API_URL").filter(|s| !s.trim().is_empty()) {
            config.endpoint = url.trim().to_string();
        }
        if let Some(secs) = lookup("FLOWPRD_TIMEOUT_SECS").and_then(|s| s.trim().parse::<u64>().ok())
        {
            if secs > 0 {
                config.timeout = Duration::from_secs(secs);
            }
        }
        if let Some(mb) =
            lookup("FLOWPRD_MAX_FILE_SIZE_MB").and_then(|s| s.trim().parse::<u64>().ok())
        {
            config.max_file_bytes = mb.saturating_mul(1024 * 1024);
        }
        config
    }
}
