//! Owned-image wrappers
//!
//! The entry points in [`crate::bilateral`] write a cropped result into a
//! caller-provided buffer. These wrappers take an interleaved [`Image16`]
//! and return a new one, either cropped by the kernel radius on every side
//! or, with the `*_same_size` variants, the size of the input (the border
//! is replicated by the radius before filtering).

use crate::bilateral::{bilateral_chroma, bilateral_luma_rgb, bilateral_mono};
use crate::kernel::SpatialKernel;
use crate::options::BilateralOptions;
use crate::{FilterError, FilterResult};
use bilat_core::{Image16, Samples, SamplesMut};

fn cropped_output(image: &Image16, kernel: &SpatialKernel) -> FilterResult<Image16> {
    let span = 2 * kernel.radius();
    let (w, h) = image.dimensions();
    if w <= span || h <= span {
        return Err(FilterError::InvalidParameters(format!(
            "{w}x{h} image is smaller than the {}x{} kernel",
            span + 1,
            span + 1
        )));
    }
    Ok(Image16::new(w - span, h - span, image.channels())?)
}

/// Filter a single-channel image.
///
/// # Returns
///
/// Image of size `(width - 2wr) x (height - 2wr)`.
///
/// # Errors
///
/// Returns an error if the image is not single-channel or is not larger
/// than the kernel span, plus any error of
/// [`bilateral_mono`](crate::bilateral::bilateral_mono).
pub fn filter_mono(
    image: &Image16,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<Image16> {
    image.require_channels(1)?;
    let mut out = cropped_output(image, kernel)?;
    let (w, h) = image.dimensions();
    let dst_layout = out.plane_layout(0);
    bilateral_mono(
        Samples::new(image.data(), image.plane_layout(0)),
        SamplesMut::new(out.data_mut(), dst_layout),
        w,
        h,
        kernel,
        options,
    )?;
    Ok(out)
}

/// Filter the chroma channels of a three-channel `L a b` image.
///
/// # Returns
///
/// Image of size `(width - 2wr) x (height - 2wr)`; channel 0 carries the
/// source luma.
pub fn filter_chroma(
    image: &Image16,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<Image16> {
    let src_layout = image.chroma_layout()?;
    let mut out = cropped_output(image, kernel)?;
    let (w, h) = image.dimensions();
    let dst_layout = out.chroma_layout()?;
    bilateral_chroma(
        Samples::new(image.data(), src_layout),
        SamplesMut::new(out.data_mut(), dst_layout),
        w,
        h,
        kernel,
        options,
    )?;
    Ok(out)
}

/// Filter the luma of a three-channel RGB image.
///
/// # Returns
///
/// Image of size `(width - 2wr) x (height - 2wr)`.
pub fn filter_luma_rgb(
    image: &Image16,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<Image16> {
    let src_layout = image.rgb_layout()?;
    let mut out = cropped_output(image, kernel)?;
    let (w, h) = image.dimensions();
    let dst_layout = out.rgb_layout()?;
    bilateral_luma_rgb(
        Samples::new(image.data(), src_layout),
        SamplesMut::new(out.data_mut(), dst_layout),
        w,
        h,
        kernel,
        options,
    )?;
    Ok(out)
}

/// [`filter_mono`] on a border-replicated copy; output matches the input
/// size.
pub fn filter_mono_same_size(
    image: &Image16,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<Image16> {
    filter_mono(&image.extend_replicate(kernel.radius())?, kernel, options)
}

/// [`filter_chroma`] on a border-replicated copy; output matches the input
/// size.
pub fn filter_chroma_same_size(
    image: &Image16,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<Image16> {
    filter_chroma(&image.extend_replicate(kernel.radius())?, kernel, options)
}

/// [`filter_luma_rgb`] on a border-replicated copy; output matches the
/// input size.
pub fn filter_luma_rgb_same_size(
    image: &Image16,
    kernel: &SpatialKernel,
    options: &BilateralOptions,
) -> FilterResult<Image16> {
    filter_luma_rgb(&image.extend_replicate(kernel.radius())?, kernel, options)
}
