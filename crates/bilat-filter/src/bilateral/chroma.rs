//! Chroma bilateral filter
//!
//! Two chroma channels are filtered under the guidance of their luma
//! channel. All three are windowed and contribute to the range distance,
//! so chroma is not smeared across luma edges, but only the chroma
//! channels are smoothed; luma is copied through from the source.

use super::Engine;
use crate::FilterResult;
use crate::kernel::SpatialKernel;
use crate::options::BilateralOptions;
use crate::range::SampleCodec;
use bilat_core::{ChromaLayout, Samples, SamplesMut};

/// Bilateral-filter the `a`/`b` channels of a luma + chroma buffer.
///
/// Geometry, cropping and error behavior are those of
/// [`bilateral_mono`](super::bilateral_mono). The destination luma channel
/// receives the unfiltered source luma.
pub fn bilateral_chroma(
    src: Samples<'_, ChromaLayout>,
    dst: SamplesMut<'_, ChromaLayout>,
    width: usize,
    height: usize,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<()> {
    let engine = Engine::new(kernel, options)?;
    src.check(width, height)?;
    let (ow, oh) = engine.output_size(width, height);
    dst.check(ow, oh)?;
    engine.log_geometry("chroma", width, height);

    let codec = SampleCodec::new(&options.norms);
    let wr = engine.radius();
    let sl = src.layout;
    engine.run::<3, _, _>(
        width,
        height,
        1,
        |row, channel, buf| match channel {
            0 => {
                for (x, v) in buf.iter_mut().enumerate() {
                    *v = codec.encode_luma(src.data[sl.luma.index(x, row)]);
                }
            }
            _ => {
                let plane = if channel == 1 { sl.a } else { sl.b };
                for (x, v) in buf.iter_mut().enumerate() {
                    *v = codec.encode_chroma(src.data[plane.index(x, row)]);
                }
            }
        },
        |col, row, v| {
            let (x, y) = (col - wr, row - wr);
            let dl = dst.layout;
            dst.data[dl.luma.index(x, y)] = src.data[sl.luma.index(col, row)];
            dst.data[dl.a.index(x, y)] = codec.decode_chroma(v[1]);
            dst.data[dl.b.index(x, y)] = codec.decode_chroma(v[2]);
        },
    )
}
