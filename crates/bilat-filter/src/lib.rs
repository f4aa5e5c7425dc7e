//! bilat-filter - Sliding-window bilateral filtering of 16-bit images
//!
//! This crate provides the edge-preserving smoothing engine:
//!
//! - Spatial kernels stored as log-space weights ([`SpatialKernel`])
//! - A bit-level fast exponential and reciprocal square root ([`fastmath`])
//! - A rotating row window fed lazily as the scan advances
//!   ([`WindowBuffer`])
//! - Separable (fused two-pass) and non-separable accumulation, with a
//!   4-lane path and a scalar remainder
//! - Three pixel-format drivers: mono, chroma (luma-guided) and luma-driven
//!   RGB
//!
//! # Examples
//!
//! ```
//! use bilat_core::Image16;
//! use bilat_filter::{BilateralOptions, SpatialKernel, filter_mono_same_size};
//!
//! let img = Image16::new_with_value(16, 16, 1, 0x4000).unwrap();
//! let kernel = SpatialKernel::gaussian(2, 1.0).unwrap();
//! let out = filter_mono_same_size(&img, &kernel, &BilateralOptions::new(4.0)).unwrap();
//! assert_eq!(out.dimensions(), (16, 16));
//! ```

pub mod bilateral;
mod error;
pub mod fastmath;
pub mod image;
pub mod kernel;
mod lanes;
pub mod options;
pub mod range;
pub mod window;

pub use error::{FilterError, FilterResult};
pub use kernel::{SpatialKernel, radius_for_sigma, range_scale_for_sigma};
pub use options::{BilateralOptions, LumaSource, PassStrategy, SampleNorms};
pub use window::WindowBuffer;

// Re-export commonly used functions
pub use bilateral::{bilateral_chroma, bilateral_luma_rgb, bilateral_mono, output_size};
pub use fastmath::{ExpBias, FastExp, inv_sqrt};
pub use image::{
    filter_chroma, filter_chroma_same_size, filter_luma_rgb, filter_luma_rgb_same_size,
    filter_mono, filter_mono_same_size,
};
pub use range::{RangeWeight, SampleCodec};
