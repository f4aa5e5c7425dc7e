//! Sliding-window bilateral filter
//!
//! Every variant shares one engine: rows are ingested into a
//! [`WindowBuffer`] as the scan moves down the image, and each output pixel
//! is a weighted average of its neighbours, weighted by
//! `exp(-(d2 * scale + k[y] + k[x]))` where `d2` is the squared distance
//! between the neighbour and the center summed over all windowed channels.
//!
//! # Strategies
//!
//! - **Non-separable**: the full `(2wr+1)^2` neighbourhood per output pixel.
//! - **Separable**: a horizontal pass along the current row, written back
//!   into the window in place, followed by a vertical pass through the
//!   window column. Later columns of the same row, and later rows, see the
//!   horizontally filtered values. The result is an approximation of the
//!   2-D filter, and a different one from filtering into a second buffer.
//!
//! # Edges
//!
//! Tap ranges are clipped to the image instead of reading padding. In the
//! vertical 4-lane group a lane whose row is not held in the window reads
//! `0`; with a window of at least `2wr+1` rows this never happens for
//! output pixels, since those always have their whole column span inside
//! the image.
//!
//! # Output geometry
//!
//! Only source pixels in `[wr, width-wr) x [wr, height-wr)` are written,
//! to destination `(x - wr, y - wr)`. The destination is therefore
//! `(width - 2wr) x (height - 2wr)`.
//!
//! # See also
//!
//! - [`mono`], [`chroma`], [`luma`] for the per-format entry points
//! - [`crate::image`] for `Image16` convenience wrappers

pub mod chroma;
pub mod luma;
pub mod mono;

use crate::FilterResult;
use crate::fastmath::FastExp;
use crate::kernel::SpatialKernel;
use crate::lanes::{Partials, load4};
use crate::options::BilateralOptions;
use crate::range::RangeWeight;
use crate::window::WindowBuffer;
use wide::f32x4;

pub use chroma::bilateral_chroma;
pub use luma::bilateral_luma_rgb;
pub use mono::bilateral_mono;

/// Output size for a `width x height` source filtered with radius `radius`.
///
/// Either side is 0 when the source is too small for a full window.
pub fn output_size(width: usize, height: usize, radius: usize) -> (usize, usize) {
    (
        width.saturating_sub(2 * radius),
        height.saturating_sub(2 * radius),
    )
}

/// Resolved per-call filter state.
pub(crate) struct Engine<'k> {
    kernel: &'k SpatialKernel,
    weight: RangeWeight,
    radius: usize,
    window_size: usize,
    separable: bool,
    vectorize: bool,
}

impl<'k> Engine<'k> {
    pub(crate) fn new(kernel: &'k SpatialKernel, options: &BilateralOptions) -> FilterResult<Self> {
        options.validate()?;
        let radius = kernel.radius();
        let window_size = options.resolve_window_size(radius)?;
        Ok(Self {
            kernel,
            weight: RangeWeight::new(
                options.range_scale / options.norms.range,
                FastExp::new(options.exp_bias),
            ),
            radius,
            window_size,
            separable: options.strategy.is_separable(window_size),
            vectorize: options.vectorize && window_size > 3,
        })
    }

    #[inline]
    pub(crate) fn radius(&self) -> usize {
        self.radius
    }

    pub(crate) fn output_size(&self, width: usize, height: usize) -> (usize, usize) {
        output_size(width, height, self.radius)
    }

    pub(crate) fn log_geometry(&self, variant: &str, width: usize, height: usize) {
        log::debug!(
            "bilateral {variant}: {width}x{height}, wr={}, ws={}, separable={}, vectorized={}",
            self.radius,
            self.window_size,
            self.separable,
            self.vectorize
        );
    }

    /// Scan a `width x height` source top to bottom.
    ///
    /// `ingest(row, channel, dst)` converts one source row of one channel
    /// into filter space. `emit(col, row, values)` receives the filtered
    /// values of every output pixel, in source coordinates. The first
    /// `guides` channels steer the weights but are never written back into
    /// the window.
    ///
    /// The window is allocated before anything is emitted, so an allocation
    /// failure leaves the destination untouched.
    pub(crate) fn run<const N: usize, I, E>(
        &self,
        width: usize,
        height: usize,
        guides: usize,
        mut ingest: I,
        mut emit: E,
    ) -> FilterResult<()>
    where
        I: FnMut(usize, usize, &mut [f32]),
        E: FnMut(usize, usize, &[f32; N]),
    {
        let wr = self.radius;
        if width <= 2 * wr || height <= 2 * wr {
            return Ok(());
        }
        let mut window = WindowBuffer::new(self.window_size, width, N)
            .inspect_err(|e| log::warn!("bilateral: {e}"))?;

        for row in 0..height - wr {
            window.ensure_row(row + wr, height, &mut ingest);

            if self.separable {
                for col in 0..width - wr {
                    let v = self.horizontal::<N>(&window, row, col, width);
                    for (c, &value) in v.iter().enumerate().skip(guides) {
                        window.set(row, c, col, value);
                    }
                }
            }
            if row < wr {
                continue;
            }
            for col in wr..width - wr {
                let v = if self.separable {
                    self.vertical::<N>(&window, row, col, height)
                } else {
                    self.full::<N>(&window, row, col)
                };
                emit(col, row, &v);
            }
        }
        Ok(())
    }

    fn center<const N: usize>(window: &WindowBuffer, row: usize, col: usize) -> [f32; N] {
        std::array::from_fn(|c| window.get(row, c, col))
    }

    /// 1-D pass along `row`, spatial term `k0 + k[x]`.
    fn horizontal<const N: usize>(
        &self,
        window: &WindowBuffer,
        row: usize,
        col: usize,
        width: usize,
    ) -> [f32; N] {
        let wr = self.radius;
        let center = Self::center::<N>(window, row, col);
        let lo = -(col.min(wr) as isize);
        let hi = wr.min(width - 1 - col) as isize;
        let (sums, norm) = self.accumulate(
            &center,
            lo,
            hi,
            self.kernel.center(),
            |t, c| window.get(row, c, offset(col, t)),
            |t, c| load4(window.row(row, c), offset(col, t)),
        );
        sums.map(|s| s / norm)
    }

    /// 1-D pass down column `col`, spatial term `k[y] + k0`.
    fn vertical<const N: usize>(
        &self,
        window: &WindowBuffer,
        row: usize,
        col: usize,
        height: usize,
    ) -> [f32; N] {
        let wr = self.radius;
        let center = Self::center::<N>(window, row, col);
        let lo = -(row.min(wr) as isize);
        let hi = wr.min(height - 1 - row) as isize;
        let (sums, norm) = self.accumulate(
            &center,
            lo,
            hi,
            self.kernel.center(),
            |t, c| window.get(offset(row, t), c, col),
            |t, c| {
                let r = offset(row, t);
                f32x4::new(std::array::from_fn(|i| {
                    window.get_or_zero(r + i, height, c, col)
                }))
            },
        );
        sums.map(|s| s / norm)
    }

    /// 2-D pass over the whole neighbourhood, spatial term `k[y] + k[x]`.
    ///
    /// Only called at output pixels, whose neighbourhood lies inside the
    /// image.
    fn full<const N: usize>(&self, window: &WindowBuffer, row: usize, col: usize) -> [f32; N] {
        let wr = self.radius as isize;
        let center = Self::center::<N>(window, row, col);
        let mut sums = [0.0f32; N];
        let mut norm = 0.0f32;
        for y in -wr..=wr {
            let r = offset(row, y);
            let (s, n) = self.accumulate(
                &center,
                -wr,
                wr,
                self.kernel.get(y),
                |t, c| window.get(r, c, offset(col, t)),
                |t, c| load4(window.row(r, c), offset(col, t)),
            );
            for (acc, v) in sums.iter_mut().zip(s) {
                *acc += v;
            }
            norm += n;
        }
        sums.map(|s| s / norm)
    }

    /// Weighted sums over taps `lo..=hi` plus the weight sum.
    ///
    /// Taps go four at a time while a full group fits, then one at a time.
    /// The spatial term of tap `t` is `fixed + k[t]`.
    fn accumulate<const N: usize, S, L>(
        &self,
        center: &[f32; N],
        lo: isize,
        hi: isize,
        fixed: f32,
        sample: S,
        load: L,
    ) -> ([f32; N], f32)
    where
        S: Fn(isize, usize) -> f32,
        L: Fn(isize, usize) -> f32x4,
    {
        let mut sums = [0.0f32; N];
        let mut norm = 0.0f32;
        let mut t = lo;

        if self.vectorize && t + 3 <= hi {
            let mut partials = Partials::<N>::new();
            let fixed4 = f32x4::splat(fixed);
            while t + 3 <= hi {
                let taps: [f32x4; N] = std::array::from_fn(|c| load(t, c));
                let d2 = taps
                    .iter()
                    .zip(center)
                    .fold(f32x4::splat(0.0), |acc, (&v, &c0)| {
                        let d = v - f32x4::splat(c0);
                        acc + d * d
                    });
                let w = self.weight.weight4(d2, fixed4 + self.kernel.get4(t));
                partials.add(w, &taps);
                t += 4;
            }
            (sums, norm) = partials.reduce();
        }

        while t <= hi {
            let taps: [f32; N] = std::array::from_fn(|c| sample(t, c));
            let d2 = taps
                .iter()
                .zip(center)
                .fold(0.0f32, |acc, (&v, &c0)| acc + (v - c0) * (v - c0));
            let w = self.weight.weight(d2, fixed + self.kernel.get(t));
            for (acc, v) in sums.iter_mut().zip(taps) {
                *acc += w * v;
            }
            norm += w;
            t += 1;
        }
        (sums, norm)
    }
}

/// `base + t` for a signed tap offset known to stay in range.
#[inline]
fn offset(base: usize, t: isize) -> usize {
    base.wrapping_add_signed(t)
}
