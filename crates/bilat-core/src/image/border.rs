//! Border operations for images
//!
//! - Border replication (copy extender): grow an image by repeating its
//!   outermost rows and columns
//! - Cropping to a sub-rectangle
//!
//! Window filters only produce output where the full window fits inside the
//! source; replicating the border by the filter radius first gives an output
//! the same size as the original.

use super::Image16;
use crate::error::{Error, Result};

impl Image16 {
    /// Add a border of `npix` pixels on every side, replicating the edge
    /// pixels outward.
    ///
    /// # Returns
    ///
    /// New image with dimensions `(width + 2*npix, height + 2*npix)`.
    pub fn extend_replicate(&self, npix: usize) -> Result<Image16> {
        if npix == 0 {
            return Ok(self.clone());
        }
        let too_big = || Error::InvalidDimension {
            width: self.width,
            height: self.height,
        };
        let wd = npix
            .checked_mul(2)
            .and_then(|b| b.checked_add(self.width))
            .ok_or_else(too_big)?;
        let hd = npix
            .checked_mul(2)
            .and_then(|b| b.checked_add(self.height))
            .ok_or_else(too_big)?;

        let mut out = Image16::new(wd, hd, self.channels)?;
        for y in 0..hd {
            let sy = y.saturating_sub(npix).min(self.height - 1);
            for x in 0..wd {
                let sx = x.saturating_sub(npix).min(self.width - 1);
                for c in 0..self.channels {
                    out.set_unchecked(x, y, c, self.get_unchecked(sx, sy, c));
                }
            }
        }
        Ok(out)
    }

    /// Copy the `w x h` rectangle whose top-left corner is (x, y).
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle is empty or not contained in the
    /// image.
    pub fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> Result<Image16> {
        let fits_x = x.checked_add(w).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(h).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(Error::InvalidParameter(format!(
                "crop rectangle {}x{} at ({}, {}) exceeds {}x{} image",
                w, h, x, y, self.width, self.height
            )));
        }
        let mut out = Image16::new(w, h, self.channels)?;
        let row_len = w * self.channels;
        for dy in 0..h {
            let src = ((y + dy) * self.width + x) * self.channels;
            let dst = dy * row_len;
            out.data[dst..dst + row_len].copy_from_slice(&self.data[src..src + row_len]);
        }
        Ok(out)
    }
}
