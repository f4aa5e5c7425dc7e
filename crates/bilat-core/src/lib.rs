//! bilat-core - Basic data structures for 16-bit image filtering
//!
//! This crate provides the pieces shared by every part of the bilat
//! library:
//!
//! - [`Image16`] - An owned, interleaved 16-bit sample container
//! - [`PlaneLayout`] - Offset/stride description of one channel inside an
//!   externally owned sample buffer
//! - [`ChromaLayout`] / [`RgbLayout`] - Three-channel layout bundles
//! - [`Samples`] / [`SamplesMut`] - A sample slice paired with its layout
//!
//! The filter engine never owns source or destination pixels; it only reads
//! and writes through these layout descriptors, which lets one engine serve
//! interleaved and planar buffers alike.

pub mod error;
pub mod image;
pub mod layout;

pub use error::{Error, Result};
pub use image::Image16;
pub use layout::{ChromaLayout, Layout, PlaneLayout, RgbLayout, Samples, SamplesMut};

/// Largest value representable by a 16-bit sample.
pub const SAMPLE_MAX: u16 = u16::MAX;

/// Round a floating-point sample value and clamp it into the 16-bit range.
///
/// NaN maps to zero.
#[inline]
pub fn clamp_sample(value: f32) -> u16 {
    value.round().clamp(0.0, SAMPLE_MAX as f32) as u16
}

/// Clamp an integer sample value into the 16-bit range.
#[inline]
pub fn clamp_sample_i32(value: i32) -> u16 {
    value.clamp(0, SAMPLE_MAX as i32) as u16
}
