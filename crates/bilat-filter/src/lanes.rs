//! Four-lane helpers
//!
//! The accumulator walks its taps in groups of four: load four neighbours,
//! weight them together, keep four partial sums, and fold the partials into
//! scalars once the groups are exhausted. These helpers are that capability
//! in one place; the remainder taps go through the scalar path.

use wide::f32x4;

/// Load `s[i..i + 4]` into a vector.
#[inline]
pub(crate) fn load4(s: &[f32], i: usize) -> f32x4 {
    f32x4::new([s[i], s[i + 1], s[i + 2], s[i + 3]])
}

/// Horizontal sum, lanes added in order.
#[inline]
pub(crate) fn sum4(v: f32x4) -> f32 {
    let a = v.to_array();
    a[0] + a[1] + a[2] + a[3]
}

/// Partial sums for `N` channels plus the weight sum.
pub(crate) struct Partials<const N: usize> {
    values: [f32x4; N],
    weight: f32x4,
}

impl<const N: usize> Partials<N> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            values: [f32x4::splat(0.0); N],
            weight: f32x4::splat(0.0),
        }
    }

    /// Add four weighted taps.
    #[inline]
    pub(crate) fn add(&mut self, w: f32x4, taps: &[f32x4; N]) {
        for (acc, &t) in self.values.iter_mut().zip(taps) {
            *acc += w * t;
        }
        self.weight += w;
    }

    /// Fold the lanes into per-channel scalar sums and the weight sum.
    #[inline]
    pub(crate) fn reduce(&self) -> ([f32; N], f32) {
        (self.values.map(sum4), sum4(self.weight))
    }
}
