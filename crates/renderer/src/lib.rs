//! Raster rendering for scattered wind observations.
//!
//! Pipeline: project samples to pixel space, synthesize a dense intensity
//! field by radial-basis interpolation, quantize the field, then optionally
//! overlay vector arrows and city markers:
//! - Field synthesis and contrast adjustment
//! - Quantization/dithering strategies
//! - Arrow, marker and caption overlays
//! - Compositing and PNG encoding

pub mod arrows;
pub mod colors;
pub mod compose;
pub mod dither;
pub mod field;
pub mod labels;
pub mod png;
pub mod render;

pub use render::{render, render_colorized};
