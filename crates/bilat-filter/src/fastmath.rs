//! Bit-level float approximations
//!
//! - [`FastExp`]: Schraudolph's exponential, adapted to single precision.
//!   The integer `A*x + B`, reinterpreted as an IEEE-754 `f32`, lands the
//!   integer part of `x/ln2` in the exponent field and the fraction in the
//!   mantissa, where it is interpolated linearly instead of exponentially.
//!   The correction folded into `B` recenters that interpolation error.
//! - [`inv_sqrt`]: magic-constant reciprocal square root seed with one
//!   Newton step.
//!
//! Relative error of [`FastExp`] against `exp` over `[-16, 0]`:
//!
//! | bias       | correction | max rel. error |
//! |------------|-----------:|---------------:|
//! | `I386`     |   405000   |   ~3.3%        |
//! | `AltiVec`  |   366000   |   ~3.0%        |
//! | `Generic`  |   347000   |   ~3.2%        |
//!
//! That is plenty for bilateral weights: only their ratios matter once the
//! weighted sum is normalized.

use wide::{CmpLt, f32x4};

/// Inputs below this return exactly zero.
pub const EXP_CUTOFF: f32 = -16.0;

/// Bias corrections tuned for the rounding behaviour of different targets.
///
/// `A*x + B` is computed in `f32` before truncation to an integer, so the
/// best correction depends on how the target's float unit rounds that
/// intermediate. The table keeps every tuned value selectable so each can be
/// tested on any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpBias {
    /// 32-bit x86 (x87/SSE mixed precision)
    I386,
    /// AltiVec vector unit
    AltiVec,
    /// 64-bit and everything else
    #[default]
    Generic,
}

impl ExpBias {
    /// Correction subtracted from the exponent bias `127 << 23`.
    pub const fn correction(self) -> f32 {
        match self {
            ExpBias::I386 => 405_000.0,
            ExpBias::AltiVec => 366_000.0,
            ExpBias::Generic => 347_000.0,
        }
    }

    /// The entry tuned for the compilation target.
    pub const fn native() -> Self {
        if cfg!(target_arch = "x86") {
            ExpBias::I386
        } else if cfg!(any(target_arch = "powerpc", target_arch = "powerpc64")) {
            ExpBias::AltiVec
        } else {
            ExpBias::Generic
        }
    }

    /// All table entries.
    pub const ALL: [ExpBias; 3] = [ExpBias::I386, ExpBias::AltiVec, ExpBias::Generic];
}

/// Fast approximate `e^x` with a configurable bias correction.
///
/// The scalar and 4-lane forms use the same constants and the same
/// truncating conversion, so they agree bit for bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastExp {
    a: f32,
    b: f32,
}

impl FastExp {
    /// `2^23 / ln 2`
    pub const SCALE: f32 = (1u32 << 23) as f32 / std::f32::consts::LN_2;

    /// Approximation using one of the tuned bias corrections.
    pub fn new(bias: ExpBias) -> Self {
        Self::with_correction(bias.correction())
    }

    /// Approximation with an arbitrary bias correction.
    pub fn with_correction(correction: f32) -> Self {
        Self {
            a: Self::SCALE,
            b: 127.0 * (1u32 << 23) as f32 - correction,
        }
    }

    /// Approximate `e^x`.
    ///
    /// Returns exactly `0.0` for `x < -16`. Meant for `x <= 0`; results for
    /// large positive `x` saturate into garbage bit patterns.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        if x < EXP_CUTOFF {
            return 0.0;
        }
        let bits = (self.a * x + self.b) as i32;
        f32::from_bits(bits as u32)
    }

    /// Approximate `e^x` on four lanes at once.
    #[inline]
    pub fn eval4(&self, x: f32x4) -> f32x4 {
        let bits = (f32x4::splat(self.a) * x + f32x4::splat(self.b))
            .trunc_int()
            .to_array();
        let approx = f32x4::new(bits.map(|b| f32::from_bits(b as u32)));
        x.cmp_lt(f32x4::splat(EXP_CUTOFF))
            .blend(f32x4::splat(0.0), approx)
    }
}

impl Default for FastExp {
    fn default() -> Self {
        Self::new(ExpBias::native())
    }
}

/// Magic seed for [`inv_sqrt`].
pub const INV_SQRT_MAGIC: u32 = 0x5f37_5a86;

/// Approximate `1/sqrt(x)` for `x > 0`.
///
/// One Newton iteration after the bit-level seed; relative error stays
/// below 0.2%.
#[inline]
pub fn inv_sqrt(x: f32) -> f32 {
    let half = 0.5 * x;
    let y = f32::from_bits(INV_SQRT_MAGIC.wrapping_sub(x.to_bits() >> 1));
    y * (1.5 - half * y * y)
}

/// Approximate `sqrt(x)` as `x * inv_sqrt(x)`, polished with one Heron step.
///
/// The polish squares the residual error (to about 2e-6), which keeps a
/// square-then-round trip lossless for 16-bit samples. Returns 0 for
/// `x <= 0`.
#[inline]
pub fn sqrt_estimate(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    let s = x * inv_sqrt(x);
    0.5 * (s + x / s)
}
