//! Intensity field synthesis by radial-basis interpolation.
//!
//! Every pixel accumulates a weighted average over all samples with an
//! inverse-quadratic distance falloff. Each sample contributes a speed term
//! (its speed normalized against the min/max of this call, mapped into the
//! configured intensity range) plus a directional term that paints a smooth
//! tanh-shaped streak downwind of the sample.

use rayon::prelude::*;
use wind_common::{GeoBounds, RenderOptions, WindSample};

/// A sample projected into pixel space with per-call normalization applied.
#[derive(Debug, Clone)]
pub struct PlacedSample {
    /// City name, carried through for overlay captions.
    pub city: String,
    /// Pixel position (may lie outside the canvas; that is allowed).
    pub x: f64,
    pub y: f64,
    /// Raw speed in m/s.
    pub speed_ms: f64,
    /// Speed normalized against this call's min/max, in [0, 1].
    pub speed_norm: f64,
    /// Unit wind direction vector in screen coordinates.
    pub dir_x: f64,
    pub dir_y: f64,
}

/// Project samples into pixel space and normalize speeds for this call.
///
/// Normalization is relative to this call's sample set: changing any one
/// sample's speed moves the min/max span and therefore rescales every other
/// sample's normalized value too. Intensity comparisons across calls only
/// hold while the fastest and slowest samples stay fixed.
///
/// When all speeds are equal the min/max span is zero; normalization falls
/// back to a fixed midpoint of 0.5 instead of dividing by zero.
pub fn place_samples(
    samples: &[WindSample],
    bounds: &GeoBounds,
    width: usize,
    height: usize,
) -> Vec<PlacedSample> {
    if samples.is_empty() {
        return Vec::new();
    }

    let min_speed = samples.iter().map(|s| s.speed_ms).fold(f64::MAX, f64::min);
    let max_speed = samples.iter().map(|s| s.speed_ms).fold(f64::MIN, f64::max);
    let span = max_speed - min_speed;

    samples
        .iter()
        .map(|sample| {
            let (x, y) = bounds.project(sample.lon, sample.lat, width, height);
            let (dir_x, dir_y) = sample.direction_vector();
            let speed_norm = if span > 0.0 {
                (sample.speed_ms - min_speed) / span
            } else {
                0.5
            };
            PlacedSample {
                city: sample.city.clone(),
                x: x as f64,
                y: y as f64,
                speed_ms: sample.speed_ms,
                speed_norm,
                dir_x,
                dir_y,
            }
        })
        .collect()
}

/// Synthesize the dense intensity field for a render call.
///
/// Returns one scalar per pixel in row-major order, contrast-adjusted and
/// clamped to the configured intensity range. An empty sample list yields a
/// uniform field at the range minimum.
///
/// O(pixels x samples); rows are computed in parallel. Each pixel is
/// independent, so the output is identical to a sequential scan.
pub fn synthesize_field(
    samples: &[WindSample],
    bounds: &GeoBounds,
    opts: &RenderOptions,
) -> Vec<f64> {
    let (range_min, _) = opts.intensity_range;
    let placed = place_samples(samples, bounds, opts.width, opts.height);
    if placed.is_empty() {
        return vec![range_min; opts.width * opts.height];
    }

    let radius = opts.effective_influence_radius();
    let span = opts.intensity_span();
    let midpoint = opts.intensity_midpoint();

    // Speed terms are per-sample constants; hoist them out of the pixel loop.
    let speed_terms: Vec<f64> = placed
        .iter()
        .map(|s| range_min + s.speed_norm * span)
        .collect();
    let directional_amplitude = opts.directional_gain * span;

    let width = opts.width;
    let mut field = vec![0.0f64; width * opts.height];

    field
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let py = y as f64;
            for (x, out) in row.iter_mut().enumerate() {
                let px = x as f64;

                let mut weighted_sum = 0.0;
                let mut weight_total = 0.0;
                for (sample, &speed_term) in placed.iter().zip(&speed_terms) {
                    let dx = px - sample.x;
                    let dy = py - sample.y;
                    let distance = (dx * dx + dy * dy).sqrt();

                    let weight = if distance < 1.0 {
                        1.0
                    } else {
                        1.0 / (1.0 + (distance / radius).powi(2))
                    };

                    // Dot product with the unit wind vector: positive downwind,
                    // negative upwind, exactly zero at the sample's own pixel.
                    let flow_distance = dx * sample.dir_x + dy * sample.dir_y;
                    let directional =
                        (flow_distance * opts.flow_scale).tanh() * directional_amplitude;

                    weighted_sum += (speed_term + directional) * weight;
                    weight_total += weight;
                }

                let intensity = if weight_total > 0.0 {
                    weighted_sum / weight_total
                } else {
                    range_min
                };

                let adjusted = midpoint + (intensity - midpoint) * opts.contrast_factor;
                *out = adjusted.clamp(opts.intensity_range.0, opts.intensity_range.1);
            }
        });

    field
}
