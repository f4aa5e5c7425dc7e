//! Spatial kernel
//!
//! A symmetric 1-D table of spatial weights for offsets `-radius..=radius`,
//! stored in log space: each entry is `-ln(weight)`. The 2-D spatial weight
//! of offset (x, y) is `exp(-(k[x] + k[y]))`, so the spatial and range terms
//! add up before a single exponentiation instead of being multiplied.

use crate::{FilterError, FilterResult};
use wide::f32x4;

/// Largest log-weight allowed at offset 0.
///
/// The center tap's exponent is `-2 * k[0]`; keeping it at or above the
/// fast-exp cutoff guarantees a strictly positive center weight.
pub const MAX_CENTER_LOG_WEIGHT: f32 = 8.0;

/// Radius covering a Gaussian of standard deviation `sigma`: `2 * ceil(sigma)`.
pub fn radius_for_sigma(sigma: f32) -> usize {
    (2.0 * sigma.max(0.0).ceil()) as usize
}

/// Range scale corresponding to a Gaussian range sigma: `1 / (2 sigma^2)`.
pub fn range_scale_for_sigma(sigma: f32) -> FilterResult<f32> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "range sigma must be positive and finite, got {sigma}"
        )));
    }
    Ok(1.0 / (2.0 * sigma * sigma))
}

/// Log-space spatial kernel indexed by signed offset.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialKernel {
    radius: usize,
    /// `2 * radius + 1` entries; `data[radius]` is offset 0
    data: Vec<f32>,
}

impl SpatialKernel {
    /// Create a kernel from `2 * radius + 1` log-space weights, first entry
    /// at offset `-radius`.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` if the length is even, a value
    /// is negative or not finite, or the center exceeds
    /// [`MAX_CENTER_LOG_WEIGHT`].
    pub fn from_log_weights(data: Vec<f32>) -> FilterResult<Self> {
        if data.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel length must be odd, got {}",
                data.len()
            )));
        }
        if let Some(v) = data.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(FilterError::InvalidKernel(format!(
                "log weights must be finite and non-negative, got {v}"
            )));
        }
        let radius = data.len() / 2;
        if data[radius] > MAX_CENTER_LOG_WEIGHT {
            return Err(FilterError::InvalidKernel(format!(
                "center log weight {} exceeds {}",
                data[radius], MAX_CENTER_LOG_WEIGHT
            )));
        }
        Ok(Self { radius, data })
    }

    /// Kernel with spatial weight 1 (log weight 0) at every offset.
    pub fn uniform(radius: usize) -> Self {
        Self {
            radius,
            data: vec![0.0; 2 * radius + 1],
        }
    }

    /// Gaussian falloff: log weight `x^2 / (2 sigma^2)` at offset `x`.
    pub fn gaussian(radius: usize, sigma: f32) -> FilterResult<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(FilterError::InvalidKernel(format!(
                "sigma must be positive and finite, got {sigma}"
            )));
        }
        let denom = 2.0 * sigma * sigma;
        let r = radius as isize;
        let data = (-r..=r).map(|x| (x * x) as f32 / denom).collect();
        Self::from_log_weights(data)
    }

    /// Kernel radius `wr`.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Log weight at offset 0.
    #[inline]
    pub fn center(&self) -> f32 {
        self.data[self.radius]
    }

    /// Log weight at a signed offset in `-radius..=radius`.
    #[inline]
    pub fn get(&self, offset: isize) -> f32 {
        self.data[(self.radius as isize + offset) as usize]
    }

    /// Log weights at offsets `offset..offset + 4`.
    #[inline]
    pub(crate) fn get4(&self, offset: isize) -> f32x4 {
        crate::lanes::load4(&self.data, (self.radius as isize + offset) as usize)
    }

    /// All log weights, offset `-radius` first.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Multiplicative weight `exp(-k)` at a signed offset.
    pub fn weight(&self, offset: isize) -> f32 {
        (-self.get(offset)).exp()
    }

    /// Whether `k[x] == k[-x]` for every offset.
    pub fn is_symmetric(&self) -> bool {
        let r = self.radius as isize;
        (1..=r).all(|x| self.get(x) == self.get(-x))
    }
}
