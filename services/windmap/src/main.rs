//! Wind map CLI.
//!
//! Fetches (or mocks) wind observations for Japanese cities, renders them to
//! a raster and writes a PNG. Prints an observation table to stdout.

mod fetch;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use renderer::colors::GreenRamp;
use renderer::png;
use wind_common::{GeoBounds, Quantization, RenderOptions};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Style {
    /// Continuous grayscale field
    Gradient,
    /// Floyd-Steinberg error diffusion
    Dither,
    /// Seeded pseudo-random dithering
    Noise,
}

impl From<Style> for Quantization {
    fn from(style: Style) -> Self {
        match style {
            Style::Gradient => Quantization::Grayscale,
            Style::Dither => Quantization::ErrorDiffusion,
            Style::Noise => Quantization::SeededNoise,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "windmap")]
#[command(about = "Render wind observations for Japanese cities to a PNG")]
struct Args {
    /// Output raster width in pixels
    #[arg(long, default_value = "600")]
    width: usize,

    /// Output raster height in pixels
    #[arg(long, default_value = "300")]
    height: usize,

    /// Contrast factor (1.0 = no adjustment)
    #[arg(long, default_value = "1.0")]
    contrast: f64,

    /// Draw wind arrows and city markers
    #[arg(long)]
    arrows: bool,

    /// Rendering style
    #[arg(long, value_enum, default_value = "gradient")]
    style: Style,

    /// Map the gradient through the green color ramp
    #[arg(long)]
    colorize: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "windmap.png")]
    out: PathBuf,

    /// Skip the network fetch and use mock observations
    #[arg(long)]
    mock: bool,

    /// Seed for mock observations (reproducible output)
    #[arg(long)]
    seed: Option<u64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let samples = fetch::observations_with_fallback(args.mock, args.seed).await;
    info!(count = samples.len(), "observations ready");

    print!("{}", report::format_table(&samples));

    let opts = RenderOptions {
        width: args.width,
        height: args.height,
        contrast_factor: args.contrast,
        show_arrows: args.arrows,
        quantization: args.style.into(),
        ..Default::default()
    };
    let bounds = GeoBounds::japan();

    let pixels = if args.colorize {
        renderer::render_colorized(&samples, &bounds, &opts, &GreenRamp::default())
    } else {
        renderer::render(&samples, &bounds, &opts)
    }
    .context("rendering failed")?;

    let encoded = png::encode_auto(&pixels, opts.width, opts.height).context("PNG encoding failed")?;
    std::fs::write(&args.out, &encoded)
        .with_context(|| format!("writing {}", args.out.display()))?;
    info!(path = %args.out.display(), bytes = encoded.len(), "wrote PNG");

    Ok(())
}
