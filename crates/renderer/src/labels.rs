//! City-name captions for the overlay.
//!
//! Each placed sample gets its city name drawn centered above its marker, on
//! a transparent layer composited with the arrows.

use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale};

use crate::colors::Color;
use crate::field::PlacedSample;

/// Embedded font data - DejaVu Sans Mono (a clean, readable monospace font)
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Configuration for city-name captions.
#[derive(Debug, Clone)]
pub struct LabelStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Gap between the marker center and the bottom of the caption.
    pub offset: i32,
    /// Caption color.
    pub color: Color,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            offset: 10,
            color: Color::new(0x33, 0x33, 0x33, 0xFF),
        }
    }
}

/// Draw each sample's city name centered above its marker.
///
/// Returns a transparent RGBA layer of the requested dimensions. Captions
/// whose marker sits near an edge are clipped, not skipped. If the embedded
/// font fails to parse the layer stays empty.
pub fn render_labels(
    placed: &[PlacedSample],
    width: usize,
    height: usize,
    style: &LabelStyle,
) -> Vec<u8> {
    let mut img: RgbaImage =
        ImageBuffer::from_pixel(width as u32, height as u32, Rgba([0, 0, 0, 0]));

    let font = match Font::try_from_bytes(FONT_DATA) {
        Some(f) => f,
        None => {
            tracing::warn!("failed to load embedded caption font");
            return img.into_raw();
        }
    };

    let scale = Scale::uniform(style.font_size);
    let color = Rgba([style.color.r, style.color.g, style.color.b, style.color.a]);

    for sample in placed {
        // Monospace advance estimate, good enough to center the caption.
        let char_width = style.font_size as f64 * 0.6;
        let text_width = sample.city.chars().count() as f64 * char_width;

        let px = (sample.x - text_width / 2.0).round() as i32;
        let py = sample.y.round() as i32 - style.offset - style.font_size as i32;
        draw_text_mut(&mut img, color, px, py, scale, &font, &sample.city);
    }

    img.into_raw()
}
