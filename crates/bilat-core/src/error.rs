//! Error types for bilat-core
//!
//! Provides a unified error type for container and layout operations.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// bilat-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// Invalid number of channels
    #[error("invalid channel count: {0}")]
    InvalidChannels(usize),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A layout addresses samples past the end of its buffer
    #[error("buffer too small: layout needs {needed} samples, buffer holds {len}")]
    BufferTooSmall { needed: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for bilat-core operations
pub type Result<T> = std::result::Result<T, Error>;
