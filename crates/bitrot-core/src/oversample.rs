//! Oversampled fractional-position reads from a capture buffer.
//!
//! Variable-speed playback advances a fractional read cursor by a non-integer
//! step each frame. Reading only at the frame boundary aliases badly at low
//! speeds, so the frame is split into [`OVERSAMPLING`] sub-steps: each sub-step
//! reads the sample under the cursor (truncated index), advances the cursor by
//! `step / OVERSAMPLING`, and the reads are averaged.
//!
//! ```text
//! out = (1/N) · Σ_{k=0}^{N-1} buf[floor(pos + k·step/N)] · weight
//! ```
//!
//! Reads past the end of the buffer return silence.

use crate::capture::StereoCapture;

/// Number of sub-steps per output frame.
pub const OVERSAMPLING: usize = 32;

/// Read one oversampled stereo frame and advance `pos`.
///
/// `sub_step` is the cursor increment per sub-step (already divided by
/// [`OVERSAMPLING`]); every read is scaled by `weight` before averaging.
#[inline]
pub fn read_averaged(
    capture: &StereoCapture,
    pos: &mut f64,
    sub_step: f64,
    weight: f32,
) -> (f32, f32) {
    let mut l = 0.0;
    let mut r = 0.0;
    for _ in 0..OVERSAMPLING {
        let (sl, sr) = capture.frame_at(*pos);
        l += sl * weight;
        r += sr * weight;
        *pos += sub_step;
    }
    (l / OVERSAMPLING as f32, r / OVERSAMPLING as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_capture(len: usize) -> StereoCapture {
        let mut capture = StereoCapture::new(len);
        for i in 0..len {
            capture.write(i, i as f32, -(i as f32));
        }
        capture
    }

    #[test]
    fn unit_speed_reads_one_frame() {
        let capture = ramp_capture(8);
        let mut pos = 3.0;
        let (l, r) = read_averaged(&capture, &mut pos, 1.0 / OVERSAMPLING as f64, 1.0);
        assert_eq!((l, r), (3.0, -3.0));
        assert!((pos - 4.0).abs() < 1e-9);
    }

    #[test]
    fn double_speed_averages_two_frames() {
        let capture = ramp_capture(8);
        let mut pos = 2.0;
        let (l, _) = read_averaged(&capture, &mut pos, 2.0 / OVERSAMPLING as f64, 1.0);
        // Half the sub-steps land on frame 2, half on frame 3.
        assert!((l - 2.5).abs() < 1e-6, "got {l}");
        assert!((pos - 4.0).abs() < 1e-9);
    }

    #[test]
    fn weight_scales_output() {
        let capture = ramp_capture(4);
        let mut pos = 1.0;
        let (l, _) = read_averaged(&capture, &mut pos, 0.0, 0.5);
        assert_eq!(l, 0.5);
        assert_eq!(pos, 1.0);
    }

    #[test]
    fn past_end_reads_silence() {
        let capture = ramp_capture(4);
        let mut pos = 10.0;
        let (l, r) = read_averaged(&capture, &mut pos, 0.1, 1.0);
        assert_eq!((l, r), (0.0, 0.0));
    }
}
