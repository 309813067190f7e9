//! flowprd CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use flowprd::config::{RenderConfig, ServiceConfig};
use flowprd::diagram::{Diagram, legend};
use flowprd::editor::DiagramSurface;
use flowprd::error::{Error, InputError};
use flowprd::layout::layout_with_config;
use flowprd::renderers::{Format, Renderer};
use flowprd::service::{Fallback, HttpService, IngestOutcome, ServiceInput, ingest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Mermaid,
    Json,
    Png,
}

impl OutputFormat {
    fn as_text(self) -> Option<Format> {
        match self {
            OutputFormat::Svg => Some(Format::Svg),
            OutputFormat::Mermaid => Some(Format::Mermaid),
            OutputFormat::Json => Some(Format::Json),
            OutputFormat::Png => None,
        }
    }
}

/// Render PRD section diagrams as SVG, Mermaid, JSON or PNG.
#[derive(Parser, Debug)]
#[command(
    name = "flowprd",
    version = env!("FLOWPRD_VERSION"),
    about = "Render PRD section diagrams as SVG, Mermaid, JSON or PNG"
)]
struct Cli {
    /// Diagram JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// PRD document (txt, md, docx, pdf) to turn into a diagram through the service; `-` reads text from stdin
    #[arg(long, conflicts_with_all = ["input", "text"])]
    prd: Option<PathBuf>,

    /// PRD text to turn into a diagram through the service
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Reposition nodes with the tiered auto-layout
    #[arg(short = 'l', long)]
    layout: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Draw the shape-kind name above each node's text
    #[arg(long)]
    caption: bool,

    /// Scale factor for PNG output
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Diagram service endpoint (overrides FLOWPRD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Service timeout in seconds (overrides FLOWPRD_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Show the built-in sample diagram if the service fails
    #[arg(long)]
    fallback_sample: bool,

    /// Print the shape legend and exit
    #[arg(long)]
    legend: bool,

    /// Log service calls and warnings
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Log layout and history decisions too
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG, when set, overrides the flags.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.debug {
            "debug"
        } else if cli.verbose {
            "info"
        } else {
            "warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> flowprd::Result<()> {
    if cli.legend {
        for row in legend() {
            println!("{row}");
        }
        return Ok(());
    }

    let config = RenderConfig {
        show_kind_caption: cli.caption,
        ..RenderConfig::default()
    };

    let mut diagram = if cli.prd.is_some() || cli.text.is_some() {
        diagram_from_service(cli, &config)?
    } else {
        diagram_from_json(cli.input.as_deref())?
    };
    if cli.layout {
        diagram = layout_with_config(&diagram, &config);
    }

    let rendered = match cli.format.as_text() {
        Some(format) => format.renderer(&config).render(&diagram).into_bytes(),
        None => render_png(&diagram, &config, cli.scale)?,
    };

    write_output(cli.output.as_deref(), &rendered)
}

fn diagram_from_json(path: Option<&Path>) -> flowprd::Result<Diagram> {
    let text = match path {
        Some(path) => fs::read_to_string(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?,
        None => read_stdin()?,
    };
    Diagram::from_json(&text)
}

fn diagram_from_service(cli: &Cli, config: &RenderConfig) -> flowprd::Result<Diagram> {
    let mut service_config = ServiceConfig::from_env();
    if let Some(url) = &cli.api_url {
        service_config.endpoint = url.clone();
    }
    if let Some(secs) = cli.timeout {
        service_config.timeout = std::time::Duration::from_secs(secs);
    }

    let input = match (&cli.text, &cli.prd) {
        (Some(text), _) => ServiceInput::text(text.as_str())?,
        (None, Some(path)) if path.as_os_str() == "-" => ServiceInput::text(read_stdin()?)?,
        (None, Some(path)) => ServiceInput::file(path, service_config.max_file_bytes)?,
        (None, None) => return Err(InputError::EmptyText.into()),
    };

    let service = HttpService::new(service_config)?;
    let fallback = if cli.fallback_sample {
        Fallback::Sample
    } else {
        Fallback::Propagate
    };
    let mut surface = DiagramSurface::with_config(Diagram::new(), config.clone());
    match ingest(&mut surface, &service, &input, fallback)? {
        IngestOutcome::Loaded {
            gaps_detected,
            input_length,
        } => {
            tracing::info!(input_length, "PRD transformed");
            for gap in gaps_detected {
                eprintln!("missing section: {gap}");
            }
        }
        IngestOutcome::FellBack { error } => {
            eprintln!("warning: {error}; showing the sample diagram");
        }
    }
    Ok(surface.diagram().clone())
}

#[cfg(feature = "raster")]
fn render_png(diagram: &Diagram, config: &RenderConfig, scale: f32) -> flowprd::Result<Vec<u8>> {
    use flowprd::renderers::SvgRenderer;
    use flowprd::renderers::raster::{self, RasterOptions};

    let svg = SvgRenderer::new(config.clone());
    Ok(raster::render_png(diagram, &svg, &RasterOptions { scale })?)
}

#[cfg(not(feature = "raster"))]
fn render_png(_: &Diagram, _: &RenderConfig, _: f32) -> flowprd::Result<Vec<u8>> {
    Err(Error::Io(io::Error::new(
        io::ErrorKind::Unsupported,
        "PNG output needs a build with the `raster` feature",
    )))
}

fn read_stdin() -> flowprd::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> flowprd::Result<()> {
    match path {
        Some(path) => fs::write(path, bytes).map_err(Error::from),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
