//! Range weights and sample encoding
//!
//! [`RangeWeight`] turns a squared range distance and a log-space spatial
//! term into a similarity weight `exp(-(d2 * scale + spatial))`.
//!
//! [`SampleCodec`] maps 16-bit samples into the space where distances are
//! measured: luma through a square root (so distances behave perceptually),
//! chroma through a linear rescale.

use crate::fastmath::{FastExp, sqrt_estimate};
use crate::options::SampleNorms;
use bilat_core::clamp_sample;
use wide::f32x4;

/// Combined spatial/range similarity weight.
#[derive(Debug, Clone, Copy)]
pub struct RangeWeight {
    scale: f32,
    exp: FastExp,
}

impl RangeWeight {
    /// `scale` multiplies squared distances in the encoded sample space.
    pub fn new(scale: f32, exp: FastExp) -> Self {
        Self { scale, exp }
    }

    /// Similarity of a tap at squared distance `d2` and log-space spatial
    /// weight `spatial`.
    #[inline]
    pub fn weight(&self, d2: f32, spatial: f32) -> f32 {
        self.exp.eval(-(d2 * self.scale + spatial))
    }

    /// [`Self::weight`] on four taps.
    #[inline]
    pub fn weight4(&self, d2: f32x4, spatial: f32x4) -> f32x4 {
        self.exp.eval4(-(d2 * f32x4::splat(self.scale) + spatial))
    }
}

/// Conversion between 16-bit samples and filter space.
#[derive(Debug, Clone, Copy)]
pub struct SampleCodec {
    luma_norm: f32,
    chroma_norm: f32,
}

impl SampleCodec {
    pub fn new(norms: &SampleNorms) -> Self {
        Self {
            luma_norm: norms.luma,
            chroma_norm: norms.chroma,
        }
    }

    /// `sqrt(raw * luma_norm)`, via the reciprocal square root estimate.
    #[inline]
    pub fn encode_luma(&self, raw: u16) -> f32 {
        sqrt_estimate(raw as f32 * self.luma_norm)
    }

    /// Inverse of [`Self::encode_luma`], rounded and clamped.
    #[inline]
    pub fn decode_luma(&self, v: f32) -> u16 {
        clamp_sample(v * v / self.luma_norm)
    }

    #[inline]
    pub fn encode_chroma(&self, raw: u16) -> f32 {
        raw as f32 * self.chroma_norm
    }

    #[inline]
    pub fn decode_chroma(&self, v: f32) -> u16 {
        clamp_sample(v / self.chroma_norm)
    }
}
