//! Arrow, city-marker and caption overlays.
//!
//! Pure vector drawing on a transparent layer, composited over the quantized
//! raster. The overlay never touches pixels it does not cover, and it is
//! independent of the field/quantization pipeline.

use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};
use wind_common::{WindError, WindResult};

use crate::colors::{Color, GreenRamp};
use crate::compose::composite_over;
use crate::field::PlacedSample;
use crate::labels::{render_labels, LabelStyle};

/// Configuration for the arrow overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrowStyle {
    /// Arrow length per m/s of wind speed, in pixels.
    pub gain: f64,
    /// Minimum arrow length in pixels.
    pub min_len: f64,
    /// Maximum arrow length in pixels.
    pub max_len: f64,
    /// Shaft stroke width in pixels.
    pub line_width: f32,
    /// Radius of the city marker dot.
    pub marker_radius: f32,
    /// Arrowhead length as a fraction of the arrow length.
    pub head_fraction: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            gain: 6.0,
            min_len: 10.0,
            max_len: 80.0,
            line_width: 2.0,
            marker_radius: 5.0,
            head_fraction: 0.25,
        }
    }
}

/// Render arrows, markers and city captions onto a transparent layer.
///
/// Returns an RGBA buffer of the requested dimensions. Samples projected
/// outside the canvas draw partially or not at all; that is fine.
pub fn render_overlay(
    placed: &[PlacedSample],
    width: usize,
    height: usize,
    ramp: &GreenRamp,
    style: &ArrowStyle,
    labels: &LabelStyle,
) -> WindResult<Vec<u8>> {
    let mut pixmap = Pixmap::new(width as u32, height as u32)
        .ok_or_else(|| WindError::RenderError("overlay pixmap allocation failed".to_string()))?;

    for sample in placed {
        let color = ramp.tercile_color(sample.speed_norm);
        draw_marker(&mut pixmap, sample, color, style);
        draw_arrow(&mut pixmap, sample, color, style);
    }

    let mut layer = pixmap.take();
    let captions = render_labels(placed, width, height, labels);
    composite_over(&mut layer, width, height, &captions, width, height, 0, 0);

    Ok(layer)
}

/// Render and composite the overlay over an existing RGBA canvas.
pub fn overlay_arrows(
    canvas: &mut [u8],
    width: usize,
    height: usize,
    placed: &[PlacedSample],
    ramp: &GreenRamp,
    style: &ArrowStyle,
    labels: &LabelStyle,
) -> WindResult<()> {
    let overlay = render_overlay(placed, width, height, ramp, style, labels)?;
    composite_over(canvas, width, height, &overlay, width, height, 0, 0);
    Ok(())
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn draw_marker(pixmap: &mut Pixmap, sample: &PlacedSample, color: Color, style: &ArrowStyle) {
    let Some(circle) =
        PathBuilder::from_circle(sample.x as f32, sample.y as f32, style.marker_radius)
    else {
        return;
    };
    pixmap.fill_path(
        &circle,
        &paint_for(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}

fn draw_arrow(pixmap: &mut Pixmap, sample: &PlacedSample, color: Color, style: &ArrowStyle) {
    let length = (sample.speed_ms * style.gain).clamp(style.min_len, style.max_len);

    let end_x = sample.x + sample.dir_x * length;
    let end_y = sample.y + sample.dir_y * length;

    // Shaft
    let mut shaft = PathBuilder::new();
    shaft.move_to(sample.x as f32, sample.y as f32);
    shaft.line_to(end_x as f32, end_y as f32);
    if let Some(path) = shaft.finish() {
        let stroke = Stroke {
            width: style.line_width,
            ..Stroke::default()
        };
        pixmap.stroke_path(
            &path,
            &paint_for(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    // Head: filled triangle whose back corners sit perpendicular to the
    // direction, half the head length to either side.
    let head_length = length * style.head_fraction;
    let head_width = head_length / 2.0;

    let back_x = -sample.dir_x * head_length;
    let back_y = -sample.dir_y * head_length;

    let left_x = end_x + back_x - sample.dir_y * head_width;
    let left_y = end_y + back_y + sample.dir_x * head_width;
    let right_x = end_x + back_x + sample.dir_y * head_width;
    let right_y = end_y + back_y - sample.dir_x * head_width;

    let mut head = PathBuilder::new();
    head.move_to(end_x as f32, end_y as f32);
    head.line_to(left_x as f32, left_y as f32);
    head.line_to(right_x as f32, right_y as f32);
    head.close();
    if let Some(path) = head.finish() {
        pixmap.fill_path(
            &path,
            &paint_for(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}
