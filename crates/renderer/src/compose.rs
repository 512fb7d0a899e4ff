//! RGBA buffer compositing.
//!
//! All operations return new buffers or mutate an explicit destination; there
//! is no shared canvas surface.

use crate::colors::Color;

/// Create a uniformly filled RGBA canvas.
pub fn solid_canvas(width: usize, height: usize, color: Color) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
    }
    pixels
}

/// Alpha-blend a source buffer over a destination at the given offset.
///
/// Source-over compositing; fully transparent source pixels leave the
/// destination untouched. Source regions falling outside the destination are
/// clipped.
///
/// All inputs are treated as straight alpha. tiny-skia pixmaps carry
/// premultiplied alpha, so their anti-aliased fringes come out slightly
/// darker through this blend; opaque and fully transparent pixels are
/// unaffected.
pub fn composite_over(
    dst: &mut [u8],
    dst_width: usize,
    dst_height: usize,
    src: &[u8],
    src_width: usize,
    src_height: usize,
    offset_x: usize,
    offset_y: usize,
) {
    for sy in 0..src_height {
        let dy = offset_y + sy;
        if dy >= dst_height {
            break;
        }
        for sx in 0..src_width {
            let dx = offset_x + sx;
            if dx >= dst_width {
                break;
            }

            let src_idx = (sy * src_width + sx) * 4;
            let src_a = src[src_idx + 3];
            if src_a == 0 {
                continue;
            }

            let dst_idx = (dy * dst_width + dx) * 4;

            if src_a == 255 {
                dst[dst_idx..dst_idx + 4].copy_from_slice(&src[src_idx..src_idx + 4]);
                continue;
            }

            let src_a_f = src_a as f32 / 255.0;
            let dst_a_f = dst[dst_idx + 3] as f32 / 255.0;
            let out_a = src_a_f + dst_a_f * (1.0 - src_a_f);
            if out_a <= 0.0 {
                continue;
            }

            for c in 0..3 {
                let blended = (src[src_idx + c] as f32 * src_a_f
                    + dst[dst_idx + c] as f32 * dst_a_f * (1.0 - src_a_f))
                    / out_a;
                dst[dst_idx + c] = blended as u8;
            }
            dst[dst_idx + 3] = (out_a * 255.0) as u8;
        }
    }
}

/// Stack two RGBA images vertically on a white background.
///
/// Output width is the wider of the two inputs; the top image sits above the
/// bottom one, both left-aligned. Mirrors the original's composited PNG
/// download (logo above the wind canvas).
pub fn stack_vertical(
    top: &[u8],
    top_width: usize,
    top_height: usize,
    bottom: &[u8],
    bottom_width: usize,
    bottom_height: usize,
) -> (Vec<u8>, usize, usize) {
    let width = top_width.max(bottom_width);
    let height = top_height + bottom_height;

    let mut canvas = solid_canvas(width, height, Color::WHITE);
    composite_over(&mut canvas, width, height, top, top_width, top_height, 0, 0);
    composite_over(
        &mut canvas,
        width,
        height,
        bottom,
        bottom_width,
        bottom_height,
        0,
        top_height,
    );

    (canvas, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_canvas() {
        let canvas = solid_canvas(2, 2, Color::new(10, 20, 30, 255));
        assert_eq!(canvas.len(), 16);
        assert_eq!(&canvas[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_composite_transparent_leaves_destination() {
        let mut dst = solid_canvas(2, 2, Color::new(100, 100, 100, 255));
        let src = solid_canvas(2, 2, Color::transparent());
        let expected = dst.clone();
        composite_over(&mut dst, 2, 2, &src, 2, 2, 0, 0);
        assert_eq!(dst, expected);
    }

    #[test]
    fn test_composite_opaque_replaces() {
        let mut dst = solid_canvas(2, 2, Color::new(0, 0, 0, 255));
        let src = solid_canvas(1, 1, Color::new(255, 0, 0, 255));
        composite_over(&mut dst, 2, 2, &src, 1, 1, 1, 1);
        // Only the bottom-right pixel changes
        assert_eq!(&dst[0..4], &[0, 0, 0, 255]);
        assert_eq!(&dst[12..16], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_composite_half_alpha_blends() {
        let mut dst = solid_canvas(1, 1, Color::new(0, 0, 0, 255));
        let src = solid_canvas(1, 1, Color::new(255, 255, 255, 128));
        composite_over(&mut dst, 1, 1, &src, 1, 1, 0, 0);
        // Roughly mid-gray
        assert!((dst[0] as i32 - 128).abs() <= 2);
        assert_eq!(dst[3], 255);
    }

    #[test]
    fn test_composite_clips_out_of_bounds() {
        let mut dst = solid_canvas(2, 2, Color::new(0, 0, 0, 255));
        let src = solid_canvas(4, 4, Color::new(50, 50, 50, 255));
        composite_over(&mut dst, 2, 2, &src, 4, 4, 1, 1);
        assert_eq!(&dst[12..16], &[50, 50, 50, 255]);
        assert_eq!(&dst[0..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_stack_vertical_dimensions() {
        let top = solid_canvas(4, 2, Color::new(1, 2, 3, 255));
        let bottom = solid_canvas(2, 3, Color::new(4, 5, 6, 255));
        let (canvas, width, height) = stack_vertical(&top, 4, 2, &bottom, 2, 3);
        assert_eq!((width, height), (4, 5));
        assert_eq!(canvas.len(), 4 * 5 * 4);

        // Top-left pixel comes from the top image
        assert_eq!(&canvas[0..4], &[1, 2, 3, 255]);
        // First pixel of row 2 comes from the bottom image
        let idx = 2 * 4 * 4;
        assert_eq!(&canvas[idx..idx + 4], &[4, 5, 6, 255]);
        // Right half of the bottom rows is white background
        let idx = 2 * 4 * 4 + 3 * 4;
        assert_eq!(&canvas[idx..idx + 4], &[255, 255, 255, 255]);
    }
}
