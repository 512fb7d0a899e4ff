//! Error types for windmap crates.

use thiserror::Error;

/// Result type alias using WindError.
pub type WindResult<T> = Result<T, WindError>;

/// Primary error type for wind rendering operations.
#[derive(Debug, Error)]
pub enum WindError {
    // === Input validation errors ===
    #[error("Invalid sample for '{city}': {message}")]
    InvalidSample { city: String, message: String },

    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    // === Rendering errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("PNG encoding failed: {0}")]
    EncodingError(String),

    // === Data source errors ===
    #[error("Failed to fetch observations: {0}")]
    FetchError(String),

    // === Infrastructure errors ===
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl WindError {
    /// True for errors the caller can fix by supplying corrected input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            WindError::InvalidSample { .. }
                | WindError::InvalidOptions(_)
                | WindError::InvalidBounds(_)
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for WindError {
    fn from(err: std::io::Error) -> Self {
        WindError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for WindError {
    fn from(err: serde_json::Error) -> Self {
        WindError::InternalError(format!("JSON error: {}", err))
    }
}
