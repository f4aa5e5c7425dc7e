//! Luma-driven RGB bilateral filter
//!
//! Only brightness is smoothed. A luma channel is derived from each source
//! pixel (the green sample by default, see [`LumaSource`]), filtered like a
//! mono channel, and every output channel is rebuilt as
//! `filtered_luma + (channel - luma)`. The original channel differences,
//! and so the chrominance, are kept; each rebuilt channel is clamped on its
//! own because the sum can leave the 16-bit range.
//!
//! [`LumaSource`]: crate::options::LumaSource

use super::Engine;
use crate::FilterResult;
use crate::kernel::SpatialKernel;
use crate::options::BilateralOptions;
use crate::range::SampleCodec;
use bilat_core::{RgbLayout, Samples, SamplesMut, clamp_sample_i32};

/// Bilateral-filter the luma of an RGB buffer.
///
/// Geometry, cropping and error behavior are those of
/// [`bilateral_mono`](super::bilateral_mono).
pub fn bilateral_luma_rgb(
    src: Samples<'_, RgbLayout>,
    dst: SamplesMut<'_, RgbLayout>,
    width: usize,
    height: usize,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<()> {
    let engine = Engine::new(kernel, options)?;
    src.check(width, height)?;
    let (ow, oh) = engine.output_size(width, height);
    dst.check(ow, oh)?;
    engine.log_geometry("luma", width, height);

    let codec = SampleCodec::new(&options.norms);
    let wr = engine.radius();
    let luma_source = options.luma_source;
    let sl = src.layout;
    let rgb = |x: usize, y: usize| {
        [
            src.data[sl.red.index(x, y)],
            src.data[sl.green.index(x, y)],
            src.data[sl.blue.index(x, y)],
        ]
    };
    engine.run::<1, _, _>(
        width,
        height,
        0,
        |row, _, buf| {
            for (x, v) in buf.iter_mut().enumerate() {
                let [r, g, b] = rgb(x, row);
                *v = codec.encode_luma(luma_source.luma(r, g, b));
            }
        },
        |col, row, v| {
            let [r, g, b] = rgb(col, row);
            let y = luma_source.luma(r, g, b) as i32;
            let y1 = codec.decode_luma(v[0]) as i32;
            let rebuild = |c: u16| clamp_sample_i32(y1 + c as i32 - y);
            let (x, y_out) = (col - wr, row - wr);
            let dl = dst.layout;
            dst.data[dl.red.index(x, y_out)] = rebuild(r);
            dst.data[dl.green.index(x, y_out)] = rebuild(g);
            dst.data[dl.blue.index(x, y_out)] = rebuild(b);
        },
    )
}
