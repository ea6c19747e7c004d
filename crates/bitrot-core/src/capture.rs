//! Fixed-length stereo capture buffer.
//!
//! [`StereoCapture`] owns one `Vec<f32>` per channel. Its length only changes
//! in [`resize`](StereoCapture::resize), which engines call from
//! `set_sample_rate`; everything else is allocation-free and bounds-safe
//! (out-of-range writes are dropped, out-of-range reads return silence).

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Two equal-length channels of captured audio.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoCapture {
    left: Vec<f32>,
    right: Vec<f32>,
}

impl StereoCapture {
    /// Allocate a silent buffer of `len` frames.
    pub fn new(len: usize) -> Self {
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
        }
    }

    /// Length in frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the buffer has zero frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Change the length, keeping existing content.
    ///
    /// Grows with silence, truncates when shrinking. Allocates; never call
    /// from the audio path.
    pub fn resize(&mut self, len: usize) {
        self.left.resize(len, 0.0);
        self.right.resize(len, 0.0);
        #[cfg(feature = "tracing")]
        tracing::debug!(frames = len, "capture_resize");
    }

    /// Fill both channels with silence.
    #[inline]
    pub fn clear(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
    }

    /// Store one frame. Ignored when `index` is out of range.
    #[inline]
    pub fn write(&mut self, index: usize, l: f32, r: f32) {
        if let (Some(dl), Some(dr)) = (self.left.get_mut(index), self.right.get_mut(index)) {
            *dl = l;
            *dr = r;
        }
    }

    /// Copy as much of a block as fits starting at `start`.
    ///
    /// Returns the number of frames written.
    pub fn write_block(&mut self, start: usize, left: &[f32], right: &[f32]) -> usize {
        let room = self.len().saturating_sub(start);
        let n = left.len().min(right.len()).min(room);
        if n > 0 {
            self.left[start..start + n].copy_from_slice(&left[..n]);
            self.right[start..start + n].copy_from_slice(&right[..n]);
        }
        n
    }

    /// Read one frame; silence when `index` is out of range.
    #[inline]
    pub fn frame(&self, index: usize) -> (f32, f32) {
        match (self.left.get(index), self.right.get(index)) {
            (Some(&l), Some(&r)) => (l, r),
            _ => (0.0, 0.0),
        }
    }

    /// Read the frame under a fractional cursor (truncated toward zero).
    #[inline]
    pub fn frame_at(&self, pos: f64) -> (f32, f32) {
        if pos < 0.0 {
            return (0.0, 0.0);
        }
        self.frame(pos as usize)
    }

    /// Copy the whole of `other` into `self` (lengths must match).
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.len(), other.len());
        let n = self.len().min(other.len());
        self.left[..n].copy_from_slice(&other.left[..n]);
        self.right[..n].copy_from_slice(&other.right[..n]);
    }

    /// Copy a single frame from `other`.
    #[inline]
    pub fn copy_frame_from(&mut self, other: &Self, index: usize) {
        let (l, r) = other.frame(index);
        self.write(index, l, r);
    }

    /// Left channel.
    #[inline]
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel.
    #[inline]
    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Whether every sample in both channels is exactly zero.
    pub fn is_silent(&self) -> bool {
        self.left.iter().chain(self.right.iter()).all(|&s| s == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_and_read_back() {
        let mut c = StereoCapture::new(4);
        c.write(2, 0.5, -0.5);
        assert_eq!(c.frame(2), (0.5, -0.5));
        assert_eq!(c.frame_at(2.9), (0.5, -0.5));
        assert_eq!(c.frame(4), (0.0, 0.0));
        c.write(10, 1.0, 1.0);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn write_block_truncates_at_end() {
        let mut c = StereoCapture::new(4);
        let written = c.write_block(2, &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert_eq!(written, 2);
        assert_eq!(c.left(), &[0.0, 0.0, 1.0, 2.0]);
        assert_eq!(c.right(), &[0.0, 0.0, 4.0, 5.0]);
        assert_eq!(c.write_block(4, &[1.0], &[1.0]), 0);
        assert_eq!(c.write_block(9, &[1.0], &[1.0]), 0);
    }

    #[test]
    fn resize_keeps_content() {
        let mut c = StereoCapture::new(2);
        c.write(1, 0.25, 0.75);
        c.resize(4);
        assert_eq!(c.frame(1), (0.25, 0.75));
        assert_eq!(c.frame(3), (0.0, 0.0));
        c.resize(1);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn clear_silences() {
        let mut c = StereoCapture::new(3);
        c.write(0, 1.0, 1.0);
        assert!(!c.is_silent());
        c.clear();
        assert!(c.is_silent());
    }

    #[test]
    fn copy_whole_and_single_frame() {
        let mut src = StereoCapture::new(3);
        src.write(0, 1.0, 2.0);
        src.write(2, 3.0, 4.0);
        let mut dst = StereoCapture::new(3);
        dst.copy_frame_from(&src, 2);
        assert_eq!(dst.frame(0), (0.0, 0.0));
        assert_eq!(dst.frame(2), (3.0, 4.0));
        dst.copy_from(&src);
        assert_eq!(dst, src);
    }
}
