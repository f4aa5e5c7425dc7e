//! Single-channel bilateral filter
//!
//! The channel is remapped into square-root space on ingestion, so range
//! distances are measured on a perceptual scale, and squared back on output.

use super::Engine;
use crate::FilterResult;
use crate::kernel::SpatialKernel;
use crate::options::BilateralOptions;
use crate::range::SampleCodec;
use bilat_core::{PlaneLayout, Samples, SamplesMut};

/// Bilateral-filter one 16-bit channel.
///
/// # Arguments
///
/// * `src` - Source samples covering `width x height`
/// * `dst` - Destination samples covering `(width - 2wr) x (height - 2wr)`
/// * `width`, `height` - Source dimensions
/// * `kernel` - Log-space spatial kernel of radius `wr`
/// * `options` - Range scale, window size and strategy
///
/// Source pixel (x, y) for `x` in `[wr, width-wr)` and `y` in
/// `[wr, height-wr)` is written to destination (x - wr, y - wr); nothing
/// else in `dst` is touched. A source smaller than `2wr + 1` on either side
/// produces no output.
///
/// # Errors
///
/// Returns an error if the options or window size are invalid, a layout
/// reaches outside its buffer, or the row window cannot be allocated. In
/// every case `dst` is left unmodified.
///
/// # Examples
///
/// ```
/// use bilat_core::{PlaneLayout, Samples, SamplesMut};
/// use bilat_filter::{BilateralOptions, SpatialKernel, bilateral_mono};
///
/// let src = vec![0x8000u16; 9 * 9];
/// let mut dst = vec![0u16; 5 * 5];
/// bilateral_mono(
///     Samples::new(&src, PlaneLayout::interleaved(0, 1, 9)),
///     SamplesMut::new(&mut dst, PlaneLayout::interleaved(0, 1, 5)),
///     9,
///     9,
///     &SpatialKernel::uniform(2),
///     &BilateralOptions::new(1.0),
/// )
/// .unwrap();
/// assert!(dst.iter().all(|&v| v == 0x8000));
/// ```
pub fn bilateral_mono(
    src: Samples<'_, PlaneLayout>,
    dst: SamplesMut<'_, PlaneLayout>,
    width: usize,
    height: usize,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<()> {
    let engine = Engine::new(kernel, options)?;
    src.check(width, height)?;
    let (ow, oh) = engine.output_size(width, height);
    dst.check(ow, oh)?;
    engine.log_geometry("mono", width, height);

    let codec = SampleCodec::new(&options.norms);
    let wr = engine.radius();
    engine.run::<1, _, _>(
        width,
        height,
        0,
        |row, _, buf| {
            for (x, v) in buf.iter_mut().enumerate() {
                *v = codec.encode_luma(src.data[src.layout.index(x, row)]);
            }
        },
        |col, row, v| {
            let i = dst.layout.index(col - wr, row - wr);
            dst.data[i] = codec.decode_luma(v[0]);
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterError;
    use crate::options::PassStrategy;

    #[test]
    fn test_flat_mid_gray() {
        let src = vec![0x8000u16; 81];
        for strategy in [PassStrategy::Separable, PassStrategy::NonSeparable] {
            for vectorize in [false, true] {
                let mut dst = vec![0u16; 25];
                let opts = BilateralOptions::new(1.0)
                    .with_window_size(5)
                    .with_strategy(strategy)
                    .with_vectorize(vectorize);
                bilateral_mono(
                    Samples::new(&src, PlaneLayout::interleaved(0, 1, 9)),
                    SamplesMut::new(&mut dst, PlaneLayout::interleaved(0, 1, 5)),
                    9,
                    9,
                    &SpatialKernel::uniform(2),
                    &opts,
                )
                .unwrap();
                assert!(dst.iter().all(|&v| v == 0x8000), "{strategy:?}: {dst:?}");
            }
        }
    }

    #[test]
    fn test_strided_destination() {
        // Write the 3x3 output into the middle of a 7-wide planar buffer
        let src = vec![1000u16; 25];
        let mut dst = vec![7u16; 7 * 5];
        bilateral_mono(
            Samples::new(&src, PlaneLayout::interleaved(0, 1, 5)),
            SamplesMut::new(&mut dst, PlaneLayout::new(7 + 2, 1, 7)),
            5,
            5,
            &SpatialKernel::uniform(1),
            &BilateralOptions::new(0.5),
        )
        .unwrap();
        for y in 0..5 {
            for x in 0..7 {
                let inside = (1..4).contains(&y) && (2..5).contains(&x);
                let expected = if inside { 1000 } else { 7 };
                assert_eq!(dst[y * 7 + x], expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_rejects_short_buffers() {
        let src = vec![0u16; 24];
        let mut dst = vec![9u16; 9];
        let err = bilateral_mono(
            Samples::new(&src, PlaneLayout::interleaved(0, 1, 5)),
            SamplesMut::new(&mut dst, PlaneLayout::interleaved(0, 1, 3)),
            5,
            5,
            &SpatialKernel::uniform(1),
            &BilateralOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::Core(_)));
        assert!(dst.iter().all(|&v| v == 9));
    }
}
