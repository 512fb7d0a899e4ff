//! Common types shared across the windmap workspace.

pub mod bounds;
pub mod error;
pub mod options;
pub mod sample;

pub use bounds::GeoBounds;
pub use error::{WindError, WindResult};
pub use options::{Quantization, RenderOptions};
pub use sample::{compass_name, WindSample};
