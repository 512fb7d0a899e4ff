//! Color ramps for presentation.
//!
//! The core raster contract is grayscale/binary; mapping ink density onto a
//! color ramp is presentation policy. The default green ramp matches the
//! original deployment's palette.

use serde::{Deserialize, Serialize};

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Linear color interpolation.
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f64 * t_inv) + (color2.r as f64 * t)) as u8,
        ((color1.g as f64 * t_inv) + (color2.g as f64 * t)) as u8,
        ((color1.b as f64 * t_inv) + (color2.b as f64 * t)) as u8,
        ((color1.a as f64 * t_inv) + (color2.a as f64 * t)) as u8,
    )
}

/// Three-stop ramp from light to dark as ink density increases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GreenRamp {
    pub light: Color,
    pub medium: Color,
    pub dark: Color,
}

impl Default for GreenRamp {
    fn default() -> Self {
        // #E1F5E1, #009E4F, #00773C
        Self {
            light: Color::new(0xE1, 0xF5, 0xE1, 255),
            medium: Color::new(0x00, 0x9E, 0x4F, 255),
            dark: Color::new(0x00, 0x77, 0x3C, 255),
        }
    }
}

impl GreenRamp {
    /// Continuous color for an ink density in [0, 1].
    pub fn color_for(&self, density: f64) -> Color {
        let t = density.clamp(0.0, 1.0);
        if t < 0.5 {
            interpolate_color(self.light, self.medium, t * 2.0)
        } else {
            interpolate_color(self.medium, self.dark, (t - 0.5) * 2.0)
        }
    }

    /// Discrete color by tercile, as used for city markers and arrows.
    pub fn tercile_color(&self, density: f64) -> Color {
        if density < 1.0 / 3.0 {
            self.light
        } else if density < 2.0 / 3.0 {
            self.medium
        } else {
            self.dark
        }
    }

    /// Map a luminance plane onto the ramp, producing RGBA pixels.
    ///
    /// Luminance 255 (paper) maps to the light end, 0 (full ink) to the dark
    /// end.
    pub fn colorize(&self, luma: &[u8]) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(luma.len() * 4);
        for &value in luma {
            let density = (255 - value) as f64 / 255.0;
            let color = self.color_for(density);
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        pixels
    }
}
