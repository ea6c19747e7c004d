//! Core Effect trait.
//!
//! The [`Effect`] trait is the contract between an engine and whatever drives
//! it (a plugin host shim, the offline renderer, a test). Every engine in this
//! workspace implements it.
//!
//! ## Design Decisions
//!
//! - **Stereo blocks**: Engines are fed two input channels and two output
//!   channels per call. The frame count is the slice length; there is no
//!   separate `frames` argument to get out of sync.
//!
//! - **Object-safe**: `dyn Effect` works, which is what the registry hands
//!   out. Engines are still concrete types and can be used statically.
//!
//! - **No allocations**: `process` must never allocate, block, or fail.
//!   Buffers are sized in the constructor and in [`Effect::set_sample_rate`].

/// Core trait for all bitrot engines.
///
/// The host calls these methods strictly sequentially for one instance:
/// construction, [`set_sample_rate`](Self::set_sample_rate),
/// [`reset`](Self::reset), then [`process`](Self::process) once per block.
/// Parameter updates arrive between blocks through
/// [`ParameterInfo::set_param`](crate::ParameterInfo::set_param).
///
/// # Example
///
/// ```rust
/// use bitrot_core::Effect;
///
/// struct Swap;
///
/// impl Effect for Swap {
///     fn process(&mut self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2]) {
///         let [out_l, out_r] = outputs;
///         out_l.copy_from_slice(inputs[1]);
///         out_r.copy_from_slice(inputs[0]);
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut swap = Swap;
/// let (l, r) = ([1.0, 2.0], [3.0, 4.0]);
/// let (mut out_l, mut out_r) = ([0.0; 2], [0.0; 2]);
/// swap.process([&l, &r], [&mut out_l, &mut out_r]);
/// assert_eq!(out_l, [3.0, 4.0]);
/// ```
pub trait Effect {
    /// Process one block of stereo audio.
    ///
    /// `inputs` and `outputs` hold the left and right channels. All four
    /// slices should have the same length; engines process
    /// [`block_len`] frames. A zero-length block is valid.
    fn process(&mut self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2]);

    /// Update the sample rate.
    ///
    /// Called when the host sample rate changes. This is the only place an
    /// engine may reallocate its capture buffers.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset transport state.
    ///
    /// Called when processing (re)starts. Rewinds cursors without touching
    /// parameter values.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}

/// Number of frames in a stereo block.
///
/// Hosts always pass equal-length channels; if they don't, the shortest
/// slice wins so indexing stays in bounds.
#[inline]
pub fn block_len(inputs: &[&[f32]; 2], outputs: &[&mut [f32]; 2]) -> usize {
    debug_assert!(
        inputs[0].len() == inputs[1].len()
            && outputs[0].len() == outputs[1].len()
            && inputs[0].len() == outputs[0].len(),
        "Input and output channels must have the same length"
    );
    inputs[0]
        .len()
        .min(inputs[1].len())
        .min(outputs[0].len())
        .min(outputs[1].len())
}

/// Copy the first `frames` input frames straight to the outputs.
#[inline]
pub fn pass_through(inputs: [&[f32]; 2], outputs: [&mut [f32]; 2], frames: usize) {
    let [out_l, out_r] = outputs;
    out_l[..frames].copy_from_slice(&inputs[0][..frames]);
    out_r[..frames].copy_from_slice(&inputs[1][..frames]);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process(&mut self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2]) {
            let frames = block_len(&inputs, &outputs);
            let [out_l, out_r] = outputs;
            for i in 0..frames {
                out_l[i] = inputs[0][i] * self.0;
                out_r[i] = inputs[1][i] * self.0;
            }
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    #[test]
    fn test_process_through_dyn() {
        let mut effect: Box<dyn Effect> = Box::new(Gain(2.0));
        let (l, r) = ([1.0, 2.0, 3.0], [-1.0, 0.5, 0.0]);
        let (mut out_l, mut out_r) = ([0.0; 3], [0.0; 3]);
        effect.process([&l, &r], [&mut out_l, &mut out_r]);
        assert_eq!(out_l, [2.0, 4.0, 6.0]);
        assert_eq!(out_r, [-2.0, 1.0, 0.0]);
        assert_eq!(effect.latency_samples(), 0);
    }

    #[test]
    fn test_pass_through_copies_prefix() {
        let (l, r) = ([0.1, 0.2], [0.3, 0.4]);
        let (mut out_l, mut out_r) = ([9.0; 2], [9.0; 2]);
        pass_through([&l, &r], [&mut out_l, &mut out_r], 1);
        assert_eq!(out_l, [0.1, 9.0]);
        assert_eq!(out_r, [0.3, 9.0]);
    }

    #[test]
    fn test_block_len_empty() {
        let empty: [f32; 0] = [];
        let (mut a, mut b): ([f32; 0], [f32; 0]) = ([], []);
        assert_eq!(block_len(&[&empty, &empty], &[&mut a, &mut b]), 0);
    }
}
