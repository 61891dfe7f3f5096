use crate::config::{Config, load_config};
use crate::parser::parse_scene;
use crate::render::{render_svg, write_output_svg};
use crate::route_dump::{print_route_dump, write_route_dump};
use crate::scene::route_scene;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ortho-route", version, about = "Orthogonal connector router for box diagrams")]
pub struct Args {
    /// Scene file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. SVG and JSON default to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, router, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Clearance around shapes; overrides the config file
    #[arg(short = 'm', long = "margin")]
    pub margin: Option<f32>,

    /// Route only around the two shapes each connector attaches to
    #[arg(long = "ignoreOtherShapes")]
    pub ignore_other_shapes: bool,

    /// Draw drag handles at segment midpoints
    #[arg(long = "midpoints")]
    pub midpoints: bool,

    /// Log routing details to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args)?;

    let input = read_input(args.input.as_deref())?;
    let scene = parse_scene(&input)?;
    let layout = route_scene(&scene, &config.router)?;
    tracing::debug!(
        shapes = layout.shapes.len(),
        connectors = layout.connectors.len(),
        fallbacks = layout.fallback_count(),
        "scene routed"
    );

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&layout, &config, &output)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_route_dump(path, &layout)?,
            None => print_route_dump(&layout)?,
        },
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(layout: &crate::scene::SceneLayout, config: &Config, output: &Path) -> Result<()> {
    let svg = render_svg(layout, &config.theme, &config.render);
    crate::render::write_output_png(&svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_layout: &crate::scene::SceneLayout, _config: &Config, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the 'png' feature"
    ))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_overrides(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(margin) = args.margin {
        if !margin.is_finite() || margin < 0.0 {
            return Err(anyhow::anyhow!(
                "Margin must be a non-negative number, got {margin}"
            ));
        }
        config.router.margin = margin;
    }
    if args.ignore_other_shapes {
        config.router.avoid_all_shapes = false;
    }
    if args.midpoints {
        config.render.show_midpoints = true;
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}
