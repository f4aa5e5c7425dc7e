//! Sample buffer layouts
//!
//! A [`PlaneLayout`] describes where the samples of one channel live inside
//! a flat `u16` buffer: the index of the first sample, the distance between
//! horizontally adjacent samples and the distance between rows, all counted
//! in samples (not bytes). Interleaved RGB, planar and strided sub-rectangle
//! views are all expressed the same way.

use crate::error::{Error, Result};

/// Location of one channel inside a flat sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    /// Index of the sample at (0, 0)
    pub offset: usize,
    /// Distance between horizontally adjacent samples
    pub pixel_stride: usize,
    /// Distance between vertically adjacent samples
    pub line_stride: usize,
}

impl PlaneLayout {
    /// Create a layout from raw offset and strides.
    pub const fn new(offset: usize, pixel_stride: usize, line_stride: usize) -> Self {
        Self {
            offset,
            pixel_stride,
            line_stride,
        }
    }

    /// Layout of `channel` in a tightly packed interleaved buffer with
    /// `channels` samples per pixel.
    pub const fn interleaved(channel: usize, channels: usize, width: usize) -> Self {
        Self::new(channel, channels, channels * width)
    }

    /// Layout of the `plane`-th plane in a buffer holding consecutive
    /// `width x height` planes.
    pub const fn planar(plane: usize, width: usize, height: usize) -> Self {
        Self::new(plane * width * height, 1, width)
    }

    /// Buffer index of the sample at (x, y).
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        self.offset + y * self.line_stride + x * self.pixel_stride
    }

    /// Number of samples a buffer must hold for this layout to address a
    /// `width x height` region, or `None` on arithmetic overflow.
    ///
    /// An empty region needs no samples.
    pub fn required_len(&self, width: usize, height: usize) -> Option<usize> {
        if width == 0 || height == 0 {
            return Some(0);
        }
        let last_row = (height - 1).checked_mul(self.line_stride)?;
        let last_col = (width - 1).checked_mul(self.pixel_stride)?;
        self.offset
            .checked_add(last_row)?
            .checked_add(last_col)?
            .checked_add(1)
    }
}

/// Validation shared by every layout bundle.
pub trait Layout {
    /// Check that a buffer of `len` samples covers a `width x height`
    /// region for every channel of the layout.
    fn check(&self, len: usize, width: usize, height: usize) -> Result<()>;
}

impl Layout for PlaneLayout {
    fn check(&self, len: usize, width: usize, height: usize) -> Result<()> {
        let needed = self
            .required_len(width, height)
            .ok_or(Error::InvalidDimension { width, height })?;
        if needed > len {
            return Err(Error::BufferTooSmall { needed, len });
        }
        Ok(())
    }
}

/// Luma plus two chroma channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromaLayout {
    pub luma: PlaneLayout,
    pub a: PlaneLayout,
    pub b: PlaneLayout,
}

impl ChromaLayout {
    /// Packed `L a b` triples.
    pub const fn interleaved(width: usize) -> Self {
        Self {
            luma: PlaneLayout::interleaved(0, 3, width),
            a: PlaneLayout::interleaved(1, 3, width),
            b: PlaneLayout::interleaved(2, 3, width),
        }
    }
}

impl Layout for ChromaLayout {
    fn check(&self, len: usize, width: usize, height: usize) -> Result<()> {
        self.luma.check(len, width, height)?;
        self.a.check(len, width, height)?;
        self.b.check(len, width, height)
    }
}

/// Red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbLayout {
    pub red: PlaneLayout,
    pub green: PlaneLayout,
    pub blue: PlaneLayout,
}

impl RgbLayout {
    /// Packed `R G B` triples.
    pub const fn interleaved(width: usize) -> Self {
        Self {
            red: PlaneLayout::interleaved(0, 3, width),
            green: PlaneLayout::interleaved(1, 3, width),
            blue: PlaneLayout::interleaved(2, 3, width),
        }
    }
}

impl Layout for RgbLayout {
    fn check(&self, len: usize, width: usize, height: usize) -> Result<()> {
        self.red.check(len, width, height)?;
        self.green.check(len, width, height)?;
        self.blue.check(len, width, height)
    }
}

/// Read-only samples together with their layout.
#[derive(Debug, Clone, Copy)]
pub struct Samples<'a, L> {
    pub data: &'a [u16],
    pub layout: L,
}

impl<'a, L: Layout> Samples<'a, L> {
    pub fn new(data: &'a [u16], layout: L) -> Self {
        Self { data, layout }
    }

    /// Check that the layout stays inside `data` for a `width x height`
    /// region.
    pub fn check(&self, width: usize, height: usize) -> Result<()> {
        self.layout.check(self.data.len(), width, height)
    }
}

/// Writable samples together with their layout.
#[derive(Debug)]
pub struct SamplesMut<'a, L> {
    pub data: &'a mut [u16],
    pub layout: L,
}

impl<'a, L: Layout> SamplesMut<'a, L> {
    pub fn new(data: &'a mut [u16], layout: L) -> Self {
        Self { data, layout }
    }

    /// Check that the layout stays inside `data` for a `width x height`
    /// region.
    pub fn check(&self, width: usize, height: usize) -> Result<()> {
        self.layout.check(self.data.len(), width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_index() {
        let l = PlaneLayout::interleaved(2, 3, 10);
        assert_eq!(l.index(0, 0), 2);
        assert_eq!(l.index(1, 0), 5);
        assert_eq!(l.index(0, 1), 32);
        assert_eq!(l.required_len(10, 4), Some(3 * 10 * 4));
    }

    #[test]
    fn test_planar_index() {
        let l = PlaneLayout::planar(1, 4, 3);
        assert_eq!(l.index(0, 0), 12);
        assert_eq!(l.index(3, 2), 12 + 2 * 4 + 3);
        assert_eq!(l.required_len(4, 3), Some(24));
    }

    #[test]
    fn test_required_len_empty_and_overflow() {
        let l = PlaneLayout::new(5, 1, 8);
        assert_eq!(l.required_len(0, 10), Some(0));
        let huge = PlaneLayout::new(0, usize::MAX, 1);
        assert_eq!(huge.required_len(3, 1), None);
    }

    #[test]
    fn test_check_buffer_too_small() {
        let l = RgbLayout::interleaved(4);
        assert!(l.check(4 * 3 * 2, 4, 2).is_ok());
        let err = l.check(4 * 3 * 2 - 1, 4, 2).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { needed: 24, len: 23 }));
    }

    #[test]
    fn test_chroma_layout_check_each_plane() {
        let mut l = ChromaLayout::interleaved(2);
        l.b.offset = 100;
        assert!(l.check(12, 2, 2).is_err());
    }
}
