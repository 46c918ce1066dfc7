//! Error types for climplot.
//!
//! Every engine returns [`ClimplotError`] synchronously at the call that
//! detects the problem. Nothing is retried or patched up internally.

use thiserror::Error;

/// The main error type for climplot operations.
#[derive(Error, Debug)]
pub enum ClimplotError {
    /// Malformed vmin/vmax/interval ordering
    #[error("Invalid range: {message}")]
    InvalidRange { message: String },

    /// Logarithm of a non-positive value
    #[error("Domain error: {message}")]
    Domain { message: String },

    /// No valid data left after masking
    #[error("Empty reduction: {message}")]
    EmptyReduction { message: String },

    /// Degenerate weight sum or negative weight
    #[error("Non-positive weight: {message}")]
    NonPositiveWeight { message: String },

    /// Zero-variance input to a correlation
    #[error("Degenerate input: {message}")]
    DegenerateInput { message: String },

    /// Fields that cannot be aligned
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Unknown or repeated axis name
    #[error("Invalid dimension: {message}")]
    InvalidDimension { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClimplotError {
    pub(crate) fn invalid_range(message: impl Into<String>) -> Self {
        ClimplotError::InvalidRange {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with ClimplotError
pub type Result<T> = std::result::Result<T, ClimplotError>;
