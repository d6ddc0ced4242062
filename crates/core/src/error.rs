//! Error types for the gradient-studio core.

use thiserror::Error;

/// Errors produced by gradient model, history and storage operations.
#[derive(Debug, Error)]
pub enum GradientError {
    /// A color string was not `#RGB` or `#RRGGBB`.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Removing a stop would leave fewer than `min` stops.
    #[error("a gradient needs at least {min} color stops")]
    StopFloor { min: usize },

    /// No stop with the given id exists in the gradient.
    #[error("color stop not found: {0}")]
    StopNotFound(u32),

    /// An opacity value was NaN or infinite.
    #[error("invalid opacity: {0}")]
    InvalidOpacity(f64),

    /// A gradient was constructed or loaded with too few stops.
    #[error("too few color stops: got {count}, need at least {min}")]
    TooFewStops { count: usize, min: usize },

    /// A preset name did not match any built-in preset.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A history index was past the end of the saved list.
    #[error("history index {index} out of range for {len} saved gradients")]
    HistoryIndex { index: usize, len: usize },

    /// Width or height was zero, or their product overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Reading or writing persisted state failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding or decoding persisted state failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GradientError {
    fn from(e: serde_json::Error) -> Self {
        GradientError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for GradientError {
    fn from(e: std::io::Error) -> Self {
        GradientError::Io(e.to_string())
    }
}
