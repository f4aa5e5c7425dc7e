//! Error types for bilat-filter
//!
//! Inside the scan itself the only failure is running out of memory for the
//! row window; everything else is rejected up front while validating the
//! kernel, options and buffer layouts.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error (dimensions, layouts, buffer sizes)
    #[error("core error: {0}")]
    Core(#[from] bilat_core::Error),

    /// Invalid spatial kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The row window could not be allocated
    #[error("window allocation failed: {rows} rows x {width} samples x {channels} channels")]
    AllocationFailed {
        /// Rows requested
        rows: usize,
        /// Samples per row and channel
        width: usize,
        /// Channels per row
        channels: usize,
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
