//! Exact reference filters
//!
//! Straightforward `f64` implementations with `exp` and `sqrt` from the
//! standard library, slow but free of the engine's approximations. Output
//! is cropped like the engine's: a `width x height` source yields
//! `(width - 2r) x (height - 2r)` values.

use crate::error::{TestError, TestResult};
use bilat_core::{Image16, clamp_sample};

/// Fixed-point scale applied to luma before the square root
pub const LUMA_NORM: f64 = 65536.0;
/// Divisor applied to the range scale
pub const RANGE_NORM: f64 = 65536.0;

/// Luma sample in square-root space
pub fn encode_luma(v: u16) -> f64 {
    (v as f64 * LUMA_NORM).sqrt()
}

/// Inverse of [`encode_luma`], rounded and clamped
pub fn decode_luma(v: f64) -> u16 {
    clamp_sample((v * v / LUMA_NORM) as f32)
}

/// Exact 2-D bilateral filter of one plane.
///
/// Weight of tap (x, y) is `exp(-(d^2 * range_scale + k[y] + k[x]))` with
/// `k` the log-space kernel of length `2r + 1`.
pub fn bilateral_plane(
    src: &[f64],
    width: usize,
    height: usize,
    log_kernel: &[f32],
    range_scale: f64,
) -> Vec<f64> {
    let r = log_kernel.len() / 2;
    if width <= 2 * r || height <= 2 * r {
        return Vec::new();
    }
    let mut out = Vec::with_capacity((width - 2 * r) * (height - 2 * r));
    for y in r..height - r {
        for x in r..width - r {
            let center = src[y * width + x];
            let mut sum = 0.0;
            let mut norm = 0.0;
            for (ky, &wy) in log_kernel.iter().enumerate() {
                let row = &src[(y + ky - r) * width..];
                for (kx, &wx) in log_kernel.iter().enumerate() {
                    let v = row[x + kx - r];
                    let d = v - center;
                    let w = (-(d * d * range_scale + wy as f64 + wx as f64)).exp();
                    sum += w * v;
                    norm += w;
                }
            }
            out.push(sum / norm);
        }
    }
    out
}

/// Exact 2-D convolution with the normalized kernel `exp(-(k[y] + k[x]))`.
pub fn convolve_plane(src: &[f64], width: usize, height: usize, log_kernel: &[f32]) -> Vec<f64> {
    bilateral_plane(src, width, height, log_kernel, 0.0)
}

/// Exact bilateral filter of a single-channel image, distances measured in
/// square-root luma space.
///
/// `range_scale` is divided by [`RANGE_NORM`] like the engine's.
pub fn bilateral_mono(image: &Image16, log_kernel: &[f32], range_scale: f64) -> TestResult<Image16> {
    image.require_channels(1)?;
    let (w, h) = image.dimensions();
    let r = log_kernel.len() / 2;
    if w <= 2 * r || h <= 2 * r {
        return Err(TestError::Unsupported(format!(
            "{w}x{h} image is smaller than the kernel span"
        )));
    }
    let plane: Vec<f64> = image.data().iter().map(|&v| encode_luma(v)).collect();
    let filtered = bilateral_plane(&plane, w, h, log_kernel, range_scale / RANGE_NORM);
    let data = filtered.into_iter().map(decode_luma).collect();
    Ok(Image16::from_data(w - 2 * r, h - 2 * r, 1, data)?)
}
