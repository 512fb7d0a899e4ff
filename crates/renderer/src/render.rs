//! Top-level render pipeline.

use tracing::debug;
use wind_common::{sample::validate_samples, GeoBounds, RenderOptions, WindResult, WindSample};

use crate::arrows::{overlay_arrows, ArrowStyle};
use crate::colors::GreenRamp;
use crate::dither::{luma_to_rgba, quantize_field};
use crate::field::{place_samples, synthesize_field};
use crate::labels::LabelStyle;

/// Render samples to an RGBA raster (grayscale or ink/paper, per options).
///
/// Validates options, bounds and samples up front; after that the call always
/// produces a complete raster. The output is row-major RGBA with alpha fully
/// opaque, `width * height * 4` bytes.
pub fn render(
    samples: &[WindSample],
    bounds: &GeoBounds,
    opts: &RenderOptions,
) -> WindResult<Vec<u8>> {
    render_inner(samples, bounds, opts, None)
}

/// Render like [`render`], then map ink density through a color ramp.
pub fn render_colorized(
    samples: &[WindSample],
    bounds: &GeoBounds,
    opts: &RenderOptions,
    ramp: &GreenRamp,
) -> WindResult<Vec<u8>> {
    render_inner(samples, bounds, opts, Some(ramp))
}

fn render_inner(
    samples: &[WindSample],
    bounds: &GeoBounds,
    opts: &RenderOptions,
    ramp: Option<&GreenRamp>,
) -> WindResult<Vec<u8>> {
    opts.validate()?;
    bounds.validate()?;
    validate_samples(samples)?;

    debug!(
        width = opts.width,
        height = opts.height,
        samples = samples.len(),
        quantization = ?opts.quantization,
        "synthesizing intensity field"
    );
    let field = synthesize_field(samples, bounds, opts);
    let luma = quantize_field(&field, opts);

    let mut canvas = match ramp {
        Some(ramp) => ramp.colorize(&luma),
        None => luma_to_rgba(&luma),
    };

    if opts.show_arrows {
        let placed = place_samples(samples, bounds, opts.width, opts.height);
        overlay_arrows(
            &mut canvas,
            opts.width,
            opts.height,
            &placed,
            &ramp.copied().unwrap_or_default(),
            &ArrowStyle::default(),
            &LabelStyle::default(),
        )?;
    }

    Ok(canvas)
}
