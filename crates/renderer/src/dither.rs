//! Quantization of the intensity field to 8-bit pixel values.
//!
//! Three interchangeable strategies reduce the field to a luminance plane:
//! grayscale pass-through, Floyd-Steinberg error diffusion, and seeded-noise
//! thresholding. Higher intensity always renders as denser ink (darker).

use wind_common::{Quantization, RenderOptions};

/// Luminance value for an ink pixel.
pub const INK: u8 = 0;
/// Luminance value for a background pixel.
pub const PAPER: u8 = 255;

const LCG_MULTIPLIER: u32 = 1_103_515_245;
const LCG_INCREMENT: u32 = 12_345;
const LCG_MODULUS: u64 = 1 << 31;

/// Stream split constant for deriving the secondary noise stream.
const STREAM_SPLIT: u64 = 0x9E37_79B9;

/// Probability that the secondary stream lowers a pixel's threshold.
const BIAS_PROBABILITY: f64 = 0.1;
/// Factor applied to a biased threshold.
const BIAS_FACTOR: f64 = 0.75;

/// Explicit-state linear congruential generator.
///
/// Seeded from a constant rather than system entropy so two renders of
/// identical input produce byte-identical rasters. Each render owns its own
/// instances; there is no process-wide generator state.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed % LCG_MODULUS) as u32,
        }
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & 0x7FFF_FFFF;
        self.state as f64 / LCG_MODULUS as f64
    }
}

/// Quantize an intensity field to a luminance plane (one byte per pixel).
///
/// The field is first normalized against the configured intensity range.
/// Grayscale output spans the full [0, 255] range; both dither strategies
/// emit exactly INK or PAPER.
pub fn quantize_field(field: &[f64], opts: &RenderOptions) -> Vec<u8> {
    match opts.quantization {
        Quantization::Grayscale => grayscale(field, opts),
        Quantization::ErrorDiffusion => error_diffusion(field, opts),
        Quantization::SeededNoise => seeded_noise(field, opts),
    }
}

/// Expand a luminance plane to RGBA (alpha fully opaque).
pub fn luma_to_rgba(luma: &[u8]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(luma.len() * 4);
    for &value in luma {
        pixels.extend_from_slice(&[value, value, value, 255]);
    }
    pixels
}

fn normalize(value: f64, opts: &RenderOptions) -> f64 {
    ((value - opts.intensity_range.0) / opts.intensity_span()).clamp(0.0, 1.0)
}

fn grayscale(field: &[f64], opts: &RenderOptions) -> Vec<u8> {
    field
        .iter()
        .map(|&v| 255 - (normalize(v, opts) * 255.0).round() as u8)
        .collect()
}

/// Floyd-Steinberg error diffusion.
///
/// Row-major scan; each pixel is thresholded at the midpoint of the
/// normalized range and the signed quantization error is pushed to
/// not-yet-visited neighbors. Neighbors outside the raster are skipped, so
/// some error energy is lost at the edges.
fn error_diffusion(field: &[f64], opts: &RenderOptions) -> Vec<u8> {
    let width = opts.width;
    let height = opts.height;

    let mut working: Vec<f64> = field.iter().map(|&v| normalize(v, opts)).collect();
    let mut luma = vec![PAPER; working.len()];

    // Kernel: right 7/16, below-left 3/16, below 5/16, below-right 1/16.
    const KERNEL: [(i64, i64, f64); 4] = [
        (1, 0, 7.0 / 16.0),
        (-1, 1, 3.0 / 16.0),
        (0, 1, 5.0 / 16.0),
        (1, 1, 1.0 / 16.0),
    ];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let value = working[idx];

            let is_ink = value >= 0.5;
            luma[idx] = if is_ink { INK } else { PAPER };

            let error = value - if is_ink { 1.0 } else { 0.0 };
            for (dx, dy, weight) in KERNEL {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                working[ny as usize * width + nx as usize] += error * weight;
            }
        }
    }

    luma
}

/// Seeded pseudo-random threshold dithering.
///
/// Two independent LCG streams are derived from the configured seed: the
/// primary draws a per-pixel threshold, the secondary occasionally lowers it
/// to break up periodic artifacts. A pixel becomes ink when its normalized
/// intensity exceeds the threshold, so denser intensity yields denser ink.
fn seeded_noise(field: &[f64], opts: &RenderOptions) -> Vec<u8> {
    let mut primary = Lcg::new(opts.noise_seed);
    let mut secondary = Lcg::new(opts.noise_seed ^ STREAM_SPLIT);

    field
        .iter()
        .map(|&v| {
            let value = normalize(v, opts);
            let mut threshold = primary.next_f64();
            if secondary.next_f64() < BIAS_PROBABILITY {
                threshold *= BIAS_FACTOR;
            }
            if value > threshold {
                INK
            } else {
                PAPER
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(width: usize, height: usize, quantization: Quantization) -> RenderOptions {
        RenderOptions {
            width,
            height,
            quantization,
            ..Default::default()
        }
    }

    #[test]
    fn test_lcg_is_reproducible() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_lcg_outputs_in_unit_interval() {
        let mut rng = Lcg::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_lcg_streams_diverge() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42 ^ STREAM_SPLIT);
        let same = (0..100).filter(|_| a.next_f64() == b.next_f64()).count();
        assert!(same < 5);
    }

    #[test]
    fn test_grayscale_polarity() {
        // Max intensity is ink-dark, min intensity is paper-light.
        let field = vec![0.0, 0.5, 1.0];
        let luma = quantize_field(&field, &opts(3, 1, Quantization::Grayscale));
        assert_eq!(luma, vec![255, 127, 0]);
    }

    #[test]
    fn test_dither_outputs_are_binary() {
        let field: Vec<f64> = (0..64 * 64).map(|i| (i % 64) as f64 / 63.0).collect();
        for strategy in [Quantization::ErrorDiffusion, Quantization::SeededNoise] {
            let luma = quantize_field(&field, &opts(64, 64, strategy));
            assert!(luma.iter().all(|&v| v == INK || v == PAPER));
        }
    }

    #[test]
    fn test_error_diffusion_extremes() {
        let zeros = vec![0.0; 16 * 16];
        let luma = quantize_field(&zeros, &opts(16, 16, Quantization::ErrorDiffusion));
        assert!(luma.iter().all(|&v| v == PAPER));

        let ones = vec![1.0; 16 * 16];
        let luma = quantize_field(&ones, &opts(16, 16, Quantization::ErrorDiffusion));
        assert!(luma.iter().all(|&v| v == INK));
    }

    #[test]
    fn test_error_diffusion_half_gray_density() {
        let field = vec![0.5; 32 * 32];
        let luma = quantize_field(&field, &opts(32, 32, Quantization::ErrorDiffusion));
        let ink = luma.iter().filter(|&&v| v == INK).count() as f64;
        let density = ink / luma.len() as f64;
        assert!((density - 0.5).abs() < 0.05, "density was {}", density);
    }

    #[test]
    fn test_seeded_noise_deterministic() {
        let field: Vec<f64> = (0..32 * 32).map(|i| (i % 32) as f64 / 31.0).collect();
        let o = opts(32, 32, Quantization::SeededNoise);
        assert_eq!(quantize_field(&field, &o), quantize_field(&field, &o));
    }

    #[test]
    fn test_seeded_noise_seed_changes_pattern() {
        let field = vec![0.5; 32 * 32];
        let a = quantize_field(&field, &opts(32, 32, Quantization::SeededNoise));
        let mut other = opts(32, 32, Quantization::SeededNoise);
        other.noise_seed ^= 1;
        let b = quantize_field(&field, &other);
        assert_ne!(a, b);
    }

    #[test]
    fn test_luma_to_rgba_opaque() {
        let rgba = luma_to_rgba(&[0, 128, 255]);
        assert_eq!(rgba.len(), 12);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
        assert_eq!(&rgba[4..8], &[128, 128, 128, 255]);
        assert_eq!(&rgba[8..12], &[255, 255, 255, 255]);
    }
}
