//! Deterministic synthetic test images.
//!
//! These produce 16-bit images using an LCG PRNG, so every platform filters
//! identical inputs.

use crate::error::TestResult;
use bilat_core::{Image16, clamp_sample_i32};

// ============================================================================
// LCG PRNG
// ============================================================================

/// LCG pseudo-random number generator (deterministic)
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 33
    }

    pub fn next_u16(&mut self) -> u16 {
        (self.step() & 0xffff) as u16
    }

    /// Uniform integer in `[-amplitude, amplitude]`.
    pub fn next_offset(&mut self, amplitude: u16) -> i32 {
        let span = 2 * amplitude as u64 + 1;
        (self.step() % span) as i32 - amplitude as i32
    }
}

// ============================================================================
// Image Generation Functions
// ============================================================================

/// Every sample set to `value`
pub fn flat(width: usize, height: usize, channels: usize, value: u16) -> TestResult<Image16> {
    Ok(Image16::new_with_value(width, height, channels, value)?)
}

/// Single channel; `lo` left of column `width / 2`, `hi` from it on
pub fn step_edge(width: usize, height: usize, lo: u16, hi: u16) -> TestResult<Image16> {
    let data = (0..height)
        .flat_map(|_| (0..width).map(move |x| if x < width / 2 { lo } else { hi }))
        .collect();
    Ok(Image16::from_data(width, height, 1, data)?)
}

/// Horizontal ramp from 0 to 0xffff, same in every channel
pub fn gradient_h(width: usize, height: usize, channels: usize) -> TestResult<Image16> {
    let mut img = Image16::new(width, height, channels)?;
    let denom = width.saturating_sub(1).max(1);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 0xffff / denom) as u16;
            for c in 0..channels {
                img.set_unchecked(x, y, c, v);
            }
        }
    }
    Ok(img)
}

/// Square cells of side `cell` alternating between `lo` and `hi`
pub fn checkerboard(
    width: usize,
    height: usize,
    cell: usize,
    lo: u16,
    hi: u16,
) -> TestResult<Image16> {
    let cell = cell.max(1);
    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| if (x / cell + y / cell) % 2 == 0 { lo } else { hi })
        })
        .collect();
    Ok(Image16::from_data(width, height, 1, data)?)
}

/// Uniformly random samples in every channel
pub fn random(width: usize, height: usize, channels: usize, seed: u64) -> TestResult<Image16> {
    let mut rng = Lcg::new(seed);
    let data = (0..width * height * channels)
        .map(|_| rng.next_u16())
        .collect();
    Ok(Image16::from_data(width, height, channels, data)?)
}

/// Copy of `image` with uniform noise of `amplitude` added to each sample,
/// clamped to the 16-bit range
pub fn add_noise(image: &Image16, amplitude: u16, seed: u64) -> Image16 {
    let mut rng = Lcg::new(seed);
    let mut out = image.clone();
    for v in out.data_mut() {
        *v = clamp_sample_i32(*v as i32 + rng.next_offset(amplitude));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcg_deterministic() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u16(), b.next_u16());
        }
        let mut r = Lcg::new(7);
        for _ in 0..1000 {
            let o = r.next_offset(3);
            assert!((-3..=3).contains(&o));
        }
    }

    #[test]
    fn test_step_edge() {
        let img = step_edge(6, 2, 0, 0xffff).unwrap();
        assert_eq!(img.get(2, 1, 0), Some(0));
        assert_eq!(img.get(3, 0, 0), Some(0xffff));
    }

    #[test]
    fn test_gradient_and_checkerboard() {
        let g = gradient_h(5, 2, 3).unwrap();
        assert_eq!(g.get(0, 0, 2), Some(0));
        assert_eq!(g.get(4, 1, 1), Some(0xffff));
        let c = checkerboard(4, 4, 2, 1, 9).unwrap();
        assert_eq!(c.get(0, 0, 0), Some(1));
        assert_eq!(c.get(2, 0, 0), Some(9));
        assert_eq!(c.get(2, 2, 0), Some(1));
    }

    #[test]
    fn test_add_noise_bounded() {
        let img = flat(8, 8, 1, 100).unwrap();
        let noisy = add_noise(&img, 50, 1);
        assert!(noisy.data().iter().all(|&v| (50..=150).contains(&v)));
        assert_ne!(noisy, img);
        assert_eq!(add_noise(&flat(2, 2, 1, 0xffff).unwrap(), 10, 3).data().len(), 4);
    }
}
