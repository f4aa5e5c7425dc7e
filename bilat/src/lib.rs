//! bilat - Edge-preserving bilateral smoothing for 16-bit images
//!
//! A sliding-window bilateral filter: every output pixel is a weighted
//! average of its neighbours, where the weight falls off with spatial
//! distance (a fixed kernel) and with the difference between the
//! neighbour's value and the center's. Noise is smoothed while edges
//! survive.
//!
//! # Overview
//!
//! - Single-channel ("mono") filtering
//! - Luma-guided filtering of two chroma channels
//! - Luma-driven RGB filtering that keeps each channel's offset from luma
//! - Separable (fused two-pass) and exact 2-D strategies, with a 4-lane
//!   accumulation path
//!
//! # Example
//!
//! ```
//! use bilat::Image16;
//! use bilat::filter::{BilateralOptions, SpatialKernel, filter_mono};
//!
//! let img = Image16::new_with_value(9, 9, 1, 0x8000).unwrap();
//! let kernel = SpatialKernel::uniform(2);
//! let out = filter_mono(&img, &kernel, &BilateralOptions::new(1.0)).unwrap();
//! assert_eq!(out.dimensions(), (5, 5));
//! assert!(out.data().iter().all(|&v| v == 0x8000));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bilat_core::*;

// Re-export the filter crate as a module to avoid name conflicts
pub use bilat_filter as filter;
