//! Sliding row window
//!
//! `WindowBuffer` keeps the most recent `capacity` source rows, already
//! converted to filter space, for `channels` channels. Source row `r` lives
//! in slot `r % capacity`; advancing the scan overwrites the oldest slot in
//! place, so rows are never copied, only re-addressed.
//!
//! Rows at or past the image height are counted as ingested but never
//! materialized. Callers shorten their tap ranges at the image edges instead
//! of reading padding.

use crate::{FilterError, FilterResult};

/// Ring of preprocessed source rows.
#[derive(Debug)]
pub struct WindowBuffer {
    capacity: usize,
    width: usize,
    channels: usize,
    /// Rows `[0, next)` have been requested
    next: usize,
    /// `capacity * channels` rows of `width` samples; slot-major
    data: Vec<f32>,
}

impl WindowBuffer {
    /// Allocate a window of `capacity` rows.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::AllocationFailed` if the buffer size overflows
    /// or the allocator refuses it.
    pub fn new(capacity: usize, width: usize, channels: usize) -> FilterResult<Self> {
        let failed = || FilterError::AllocationFailed {
            rows: capacity,
            width,
            channels,
        };
        let len = capacity
            .checked_mul(width)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(failed)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| failed())?;
        data.resize(len, 0.0);
        Ok(Self {
            capacity,
            width,
            channels,
            next: 0,
            data,
        })
    }

    /// Advance until source row `row` has been ingested.
    ///
    /// For each newly reached row below `height`, `fill(row, channel, dst)`
    /// writes `width` converted samples into the row's slot.
    pub fn ensure_row<F>(&mut self, row: usize, height: usize, mut fill: F)
    where
        F: FnMut(usize, usize, &mut [f32]),
    {
        while self.next <= row {
            let r = self.next;
            if r < height {
                for c in 0..self.channels {
                    fill(r, c, self.row_mut(r, c));
                }
            }
            self.next += 1;
        }
    }

    /// Whether source row `row` is currently held.
    #[inline]
    pub fn holds(&self, row: usize, height: usize) -> bool {
        row < height && row < self.next && row + self.capacity >= self.next
    }

    #[inline]
    fn start(&self, row: usize, channel: usize) -> usize {
        ((row % self.capacity) * self.channels + channel) * self.width
    }

    /// Samples of one channel of a held row.
    #[inline]
    pub fn row(&self, row: usize, channel: usize) -> &[f32] {
        let s = self.start(row, channel);
        &self.data[s..s + self.width]
    }

    /// Mutable samples of one channel of a held row.
    #[inline]
    pub fn row_mut(&mut self, row: usize, channel: usize) -> &mut [f32] {
        let s = self.start(row, channel);
        &mut self.data[s..s + self.width]
    }

    /// Sample (col, row) of a channel.
    #[inline]
    pub fn get(&self, row: usize, channel: usize, col: usize) -> f32 {
        self.data[self.start(row, channel) + col]
    }

    /// Sample (col, row) of a channel, or 0 when the row is not held.
    #[inline]
    pub fn get_or_zero(&self, row: usize, height: usize, channel: usize, col: usize) -> f32 {
        if self.holds(row, height) {
            self.get(row, channel, col)
        } else {
            0.0
        }
    }

    /// Overwrite sample (col, row) of a channel.
    #[inline]
    pub fn set(&mut self, row: usize, channel: usize, col: usize, value: f32) {
        let i = self.start(row, channel) + col;
        self.data[i] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_with_row_index(window: &mut WindowBuffer, row: usize, height: usize) {
        window.ensure_row(row, height, |r, c, dst| {
            for (x, v) in dst.iter_mut().enumerate() {
                *v = (r * 100 + c * 10 + x) as f32;
            }
        });
    }

    #[test]
    fn test_rotation_keeps_last_rows() {
        let mut w = WindowBuffer::new(5, 4, 2).unwrap();
        fill_with_row_index(&mut w, 6, 100);
        for r in 2..=6 {
            assert!(w.holds(r, 100));
            assert_eq!(w.get(r, 1, 3), (r * 100 + 13) as f32);
        }
        assert!(!w.holds(1, 100));
        assert!(!w.holds(7, 100));
    }

    #[test]
    fn test_rows_past_height_not_materialized() {
        let mut w = WindowBuffer::new(3, 2, 1).unwrap();
        let mut calls = Vec::new();
        w.ensure_row(4, 3, |r, _, _| calls.push(r));
        assert_eq!(calls, vec![0, 1, 2]);
        assert!(w.holds(2, 3));
        assert!(!w.holds(3, 3));
        assert_eq!(w.get_or_zero(3, 3, 0, 1), 0.0);
    }

    #[test]
    fn test_ensure_row_is_incremental() {
        let mut w = WindowBuffer::new(3, 2, 1).unwrap();
        let mut calls = 0;
        w.ensure_row(1, 10, |_, _, _| calls += 1);
        w.ensure_row(1, 10, |_, _, _| calls += 1);
        w.ensure_row(2, 10, |_, _, _| calls += 1);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_in_place_write() {
        let mut w = WindowBuffer::new(3, 4, 1).unwrap();
        fill_with_row_index(&mut w, 2, 10);
        w.set(1, 0, 2, -1.0);
        assert_eq!(w.row(1, 0), &[100.0, 101.0, -1.0, 103.0]);
    }

    #[test]
    fn test_allocation_failure() {
        let err = WindowBuffer::new(usize::MAX / 2, 3, 1).unwrap_err();
        assert!(matches!(err, FilterError::AllocationFailed { .. }));
        let err = WindowBuffer::new(1 << 20, 1 << 20, 1 << 20).unwrap_err();
        assert!(matches!(err, FilterError::AllocationFailed { .. }));
    }
}
