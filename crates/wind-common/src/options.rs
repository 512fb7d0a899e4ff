//! Render configuration.
//!
//! Options are constructed per render call and never mutated mid-render.
//! Like the style definitions they are serde-deserializable so presets can be
//! loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{WindError, WindResult};

/// How the intensity field is reduced to pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantization {
    /// Linear map of intensity to an 8-bit channel; no thresholding.
    Grayscale,
    /// Floyd-Steinberg error diffusion; output pixels are pure ink/paper.
    ErrorDiffusion,
    /// Threshold against seeded pseudo-random noise; output pixels are pure
    /// ink/paper, byte-identical across runs for a fixed seed.
    SeededNoise,
}

impl Default for Quantization {
    fn default() -> Self {
        Quantization::Grayscale
    }
}

/// Configuration for one render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Output raster width in pixels.
    pub width: usize,

    /// Output raster height in pixels.
    pub height: usize,

    /// Contrast adjustment about the intensity midpoint. 1.0 is a no-op.
    /// Values <= 0 are accepted (they invert/flatten extremities) but callers
    /// should keep this positive for sane output.
    #[serde(default = "default_contrast")]
    pub contrast_factor: f64,

    /// Draw per-sample arrows and city markers on top of the quantized raster.
    #[serde(default)]
    pub show_arrows: bool,

    #[serde(default)]
    pub quantization: Quantization,

    /// Intensity clamp range (min, max) for the synthesized field.
    #[serde(default = "default_intensity_range")]
    pub intensity_range: (f64, f64),

    /// Distance scale for the inverse-quadratic falloff. Defaults to
    /// max(width, height) / 5 so influence scales with canvas size.
    #[serde(default)]
    pub influence_radius: Option<f64>,

    /// Rate at which the downwind streak saturates (argument scale of tanh).
    #[serde(default = "default_flow_scale")]
    pub flow_scale: f64,

    /// Strength of the directional term as a fraction of the intensity span.
    #[serde(default = "default_directional_gain")]
    pub directional_gain: f64,

    /// Seed for the noise dither streams. Fixed by default so two renders of
    /// identical input produce byte-identical rasters.
    #[serde(default = "default_noise_seed")]
    pub noise_seed: u64,
}

fn default_contrast() -> f64 {
    1.0
}

fn default_intensity_range() -> (f64, f64) {
    (0.0, 1.0)
}

fn default_flow_scale() -> f64 {
    0.05
}

fn default_directional_gain() -> f64 {
    0.25
}

fn default_noise_seed() -> u64 {
    0x5EED_B0A7
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
            contrast_factor: default_contrast(),
            show_arrows: false,
            quantization: Quantization::default(),
            intensity_range: default_intensity_range(),
            influence_radius: None,
            flow_scale: default_flow_scale(),
            directional_gain: default_directional_gain(),
            noise_seed: default_noise_seed(),
        }
    }
}

impl RenderOptions {
    /// Fail fast on configuration errors, before any pixel work begins.
    ///
    /// Note: `contrast_factor` is deliberately not range-checked here.
    pub fn validate(&self) -> WindResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WindError::InvalidOptions(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let (min, max) = self.intensity_range;
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(WindError::InvalidOptions(format!(
                "intensity range must satisfy min < max, got ({}, {})",
                min, max
            )));
        }
        if let Some(radius) = self.influence_radius {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(WindError::InvalidOptions(format!(
                    "influence radius must be positive, got {}",
                    radius
                )));
            }
        }
        if !self.contrast_factor.is_finite() {
            return Err(WindError::InvalidOptions(
                "contrast factor must be finite".to_string(),
            ));
        }
        if !self.flow_scale.is_finite() || !self.directional_gain.is_finite() {
            return Err(WindError::InvalidOptions(
                "flow scale and directional gain must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Falloff distance scale, derived from the canvas size unless overridden.
    pub fn effective_influence_radius(&self) -> f64 {
        self.influence_radius
            .unwrap_or_else(|| self.width.max(self.height) as f64 / 5.0)
    }

    /// Midpoint of the intensity range (contrast pivot, dither threshold).
    pub fn intensity_midpoint(&self) -> f64 {
        (self.intensity_range.0 + self.intensity_range.1) / 2.0
    }

    /// Width of the intensity range.
    pub fn intensity_span(&self) -> f64 {
        self.intensity_range.1 - self.intensity_range.0
    }
}
