//! Image16 - Interleaved 16-bit image
//!
//! `Image16` owns a `width x height` grid of pixels with `channels`
//! interleaved `u16` samples each. It is the convenience container used by
//! the image-level filter API and the test harness; the filter engine itself
//! works on borrowed slices described by [`PlaneLayout`].
//!
//! See [`border`] for border replication and cropping.
//!
//! # Examples
//!
//! ```
//! use bilat_core::Image16;
//!
//! let mut img = Image16::new(4, 3, 3).unwrap();
//! img.set(1, 2, 0, 0x8000).unwrap();
//! assert_eq!(img.get(1, 2, 0), Some(0x8000));
//! ```

pub mod border;

use crate::error::{Error, Result};
use crate::layout::{ChromaLayout, PlaneLayout, RgbLayout};

/// Interleaved 16-bit image
///
/// # Memory Layout
///
/// Samples are stored row-major with no padding. Channel `c` of the pixel at
/// (x, y) is at index `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image16 {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u16>,
}

impl Image16 {
    /// Create a new image with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0 and
    /// `Error::InvalidChannels` if `channels` is 0.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        Self::new_with_value(width, height, channels, 0)
    }

    /// Create a new image with every sample set to `value`
    pub fn new_with_value(width: usize, height: usize, channels: usize, value: u16) -> Result<Self> {
        let len = Self::sample_count(width, height, channels)?;
        Ok(Image16 {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }

    /// Create an image from interleaved sample data
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or `data` does not
    /// hold exactly `width * height * channels` samples.
    pub fn from_data(width: usize, height: usize, channels: usize, data: Vec<u16>) -> Result<Self> {
        let len = Self::sample_count(width, height, channels)?;
        if data.len() != len {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                channels,
                len
            )));
        }
        Ok(Image16 {
            width,
            height,
            channels,
            data,
        })
    }

    /// Build a multi-channel image from same-sized single-channel images.
    pub fn from_planes(planes: &[&Image16]) -> Result<Self> {
        let first = planes.first().ok_or(Error::InvalidChannels(0))?;
        let (width, height) = first.dimensions();
        for p in planes {
            if p.channels != 1 {
                return Err(Error::InvalidChannels(p.channels));
            }
            if p.dimensions() != (width, height) {
                return Err(Error::DimensionMismatch {
                    expected: (width, height),
                    actual: p.dimensions(),
                });
            }
        }
        let channels = planes.len();
        let mut out = Image16::new(width, height, channels)?;
        for (c, p) in planes.iter().enumerate() {
            for (i, &v) in p.data.iter().enumerate() {
                out.data[i * channels + c] = v;
            }
        }
        Ok(out)
    }

    fn sample_count(width: usize, height: usize, channels: usize) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if channels == 0 {
            return Err(Error::InvalidChannels(channels));
        }
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the number of interleaved channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the interleaved sample data
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Get mutable access to the interleaved sample data
    pub fn data_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// Layout of one channel inside [`Self::data`].
    pub fn plane_layout(&self, channel: usize) -> PlaneLayout {
        PlaneLayout::interleaved(channel, self.channels, self.width)
    }

    /// Layout treating channels 0, 1, 2 as L, a, b.
    pub fn chroma_layout(&self) -> Result<ChromaLayout> {
        self.require_channels(3)?;
        Ok(ChromaLayout {
            luma: self.plane_layout(0),
            a: self.plane_layout(1),
            b: self.plane_layout(2),
        })
    }

    /// Layout treating channels 0, 1, 2 as R, G, B.
    pub fn rgb_layout(&self) -> Result<RgbLayout> {
        self.require_channels(3)?;
        Ok(RgbLayout {
            red: self.plane_layout(0),
            green: self.plane_layout(1),
            blue: self.plane_layout(2),
        })
    }

    /// Fail unless the image has exactly `channels` channels.
    pub fn require_channels(&self, channels: usize) -> Result<()> {
        if self.channels != channels {
            return Err(Error::InvalidChannels(self.channels));
        }
        Ok(())
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, channel: usize) -> usize {
        (y * self.width + x) * self.channels + channel
    }

    /// Get a sample, or `None` if the coordinates are out of bounds
    #[inline]
    pub fn get(&self, x: usize, y: usize, channel: usize) -> Option<u16> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return None;
        }
        Some(self.data[self.offset(x, y, channel)])
    }

    /// Get a sample without bounds checking against width/height
    ///
    /// # Panics
    ///
    /// Panics if the resulting index is outside the sample buffer.
    #[inline]
    pub fn get_unchecked(&self, x: usize, y: usize, channel: usize) -> u16 {
        self.data[self.offset(x, y, channel)]
    }

    /// Set a sample
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are out of bounds.
    pub fn set(&mut self, x: usize, y: usize, channel: usize, value: u16) -> Result<()> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: self.offset(x, y, channel),
                len: self.data.len(),
            });
        }
        let idx = self.offset(x, y, channel);
        self.data[idx] = value;
        Ok(())
    }

    /// Set a sample without bounds checking against width/height
    #[inline]
    pub fn set_unchecked(&mut self, x: usize, y: usize, channel: usize, value: u16) {
        let idx = self.offset(x, y, channel);
        self.data[idx] = value;
    }

    /// Extract one channel as a single-channel image
    pub fn channel(&self, channel: usize) -> Result<Image16> {
        if channel >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: channel,
                len: self.channels,
            });
        }
        let data = self
            .data
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .copied()
            .collect();
        Image16::from_data(self.width, self.height, 1, data)
    }
}
