//! Crush: sample-and-hold rate reduction with soft clipping and noise.
//!
//! # Theory
//!
//! ## Sample-and-hold
//!
//! A frame counter runs continuously. Every `downsample`-th frame a new
//! sample is latched from the input; in between, the latched value repeats.
//! This is a zero-order hold at `fs / downsample`, which folds everything
//! above the reduced Nyquist back into the audible band (aliasing is the
//! point here).
//!
//! ## Shaping
//!
//! Latched samples go through a boosted soft clip and then multiplicative
//! noise before they are held:
//!
//! ```text
//! held = noise(clip(x, distort, 2), prenoise)
//! ```
//!
//! Every output frame (held or not) then passes through a second, unboosted
//! clip and a second noise stage:
//!
//! ```text
//! y = noise(clip(held, postclip, 1), postnoise)
//! ```
//!
//! The noise term is `x²·(n − bias)` with `n` uniform in `[0, 1]`, so the
//! grit scales with signal level and `bias` sets how much of it is DC-ish
//! push versus symmetric hiss. See [`bitrot_core::math`].
//!
//! The noise generator is drawn in a fixed order (pre L, pre R on latched
//! frames; post L, post R every frame) so output is bit-reproducible.

use bitrot_core::{
    Effect, Lcg, ParamDescriptor, ParamId, ParameterInfo, SmoothedPair, block_len, inject_noise,
    soft_clip,
};

/// Bit/rate degradation engine.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Symbol | Range | Default | Smoothed |
/// |-------|------|--------|-------|---------|----------|
/// | 0 | Downsample | `downsample` | 1–16 (integer) | 1 | no |
/// | 1 | Noise Bias | `noisebias` | 0–1 | 0.5 | yes |
/// | 2 | Input Noise | `prenoise` | 0–1 | 0 | yes |
/// | 3 | Output Noise | `postnoise` | 0–1 | 0 | yes |
/// | 4 | Distort | `distort` | 0–1 | 0 | yes |
/// | 5 | Post Clip | `postclip` | 0–1 | 0 | yes |
///
/// # Example
///
/// ```rust
/// use bitrot_core::{Effect, ParameterInfo};
/// use bitrot_effects::Crush;
///
/// let mut crush = Crush::new();
/// crush.set_param(Crush::DOWNSAMPLE, 4.0);
///
/// let input = [0.5f32; 8];
/// let (mut out_l, mut out_r) = ([0.0; 8], [0.0; 8]);
/// crush.process([&input, &input], [&mut out_l, &mut out_r]);
/// assert!(out_l.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct Crush {
    /// Hold length in frames. Read as an integer, floored at 1.
    downsample: f32,
    noise_bias: SmoothedPair,
    pre_noise: SmoothedPair,
    post_noise: SmoothedPair,
    distort: SmoothedPair,
    post_clip: SmoothedPair,
    rng: Lcg,
    held_l: f32,
    held_r: f32,
    /// Frames since activation; wraps at `u32::MAX`.
    counter: u32,
}

impl Crush {
    /// Downsample factor.
    pub const DOWNSAMPLE: usize = 0;
    /// Noise bias.
    pub const NOISE_BIAS: usize = 1;
    /// Pre-hold noise amount.
    pub const PRE_NOISE: usize = 2;
    /// Post-hold noise amount.
    pub const POST_NOISE: usize = 3;
    /// Pre-hold distortion amount.
    pub const DISTORT: usize = 4;
    /// Post-hold clip amount.
    pub const POST_CLIP: usize = 5;

    const PARAM_COUNT: usize = 6;

    /// Boost applied by the pre-hold soft clip.
    const DISTORT_BOOST: f32 = 2.0;

    /// Create a `Crush` with every parameter at its default.
    pub fn new() -> Self {
        let mut crush = Self {
            downsample: 1.0,
            noise_bias: SmoothedPair::default(),
            pre_noise: SmoothedPair::default(),
            post_noise: SmoothedPair::default(),
            distort: SmoothedPair::default(),
            post_clip: SmoothedPair::default(),
            rng: Lcg::default(),
            held_l: 0.0,
            held_r: 0.0,
            counter: 0,
        };
        crush.apply_defaults();
        crush.commit_params();
        crush
    }

    /// Hold length actually used by `process`.
    #[inline]
    fn hold_frames(&self) -> u32 {
        (self.downsample as u32).max(1)
    }

    fn commit_params(&mut self) {
        self.noise_bias.commit();
        self.pre_noise.commit();
        self.post_noise.commit();
        self.distort.commit();
        self.post_clip.commit();
    }
}

impl Default for Crush {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Crush {
    fn process(&mut self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2]) {
        let frames = block_len(&inputs, &outputs);

        let distort = self.distort.ramp(frames);
        let pre_noise = self.pre_noise.ramp(frames);
        let post_clip = self.post_clip.ramp(frames);
        let post_noise = self.post_noise.ramp(frames);
        let noise_bias = self.noise_bias.ramp(frames);
        let hold = self.hold_frames();

        let [out_l, out_r] = outputs;
        for i in 0..frames {
            let bias = noise_bias.at(i);

            if self.counter % hold == 0 {
                let amount = distort.at(i);
                let l = soft_clip(inputs[0][i], amount, Self::DISTORT_BOOST);
                let r = soft_clip(inputs[1][i], amount, Self::DISTORT_BOOST);

                let amount = pre_noise.at(i);
                self.held_l = inject_noise(l, amount, self.rng.next_unit(), bias);
                self.held_r = inject_noise(r, amount, self.rng.next_unit(), bias);
            }
            self.counter = self.counter.wrapping_add(1);

            let amount = post_clip.at(i);
            let l = soft_clip(self.held_l, amount, 1.0);
            let r = soft_clip(self.held_r, amount, 1.0);

            let amount = post_noise.at(i);
            out_l[i] = inject_noise(l, amount, self.rng.next_unit(), bias);
            out_r[i] = inject_noise(r, amount, self.rng.next_unit(), bias);
        }

        self.commit_params();
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {
        // Rate-independent: the hold length is in frames.
    }

    /// Clear held samples and the frame counter, and drop pending ramps.
    ///
    /// The noise generator keeps its position; it is seeded once per instance.
    fn reset(&mut self) {
        self.held_l = 0.0;
        self.held_r = 0.0;
        self.counter = 0;
        self.commit_params();
    }
}

impl ParameterInfo for Crush {
    fn param_count(&self) -> usize {
        Self::PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        let desc = match index {
            Self::DOWNSAMPLE => {
                ParamDescriptor::integer("Downsample", "downsample", 1.0, 16.0, 1.0)
            }
            Self::NOISE_BIAS => ParamDescriptor::new("Noise Bias", "noisebias", 0.0, 1.0, 0.5),
            Self::PRE_NOISE => ParamDescriptor::new("Input Noise", "prenoise", 0.0, 1.0, 0.0),
            Self::POST_NOISE => ParamDescriptor::new("Output Noise", "postnoise", 0.0, 1.0, 0.0),
            Self::DISTORT => ParamDescriptor::new("Distort", "distort", 0.0, 1.0, 0.0),
            Self::POST_CLIP => ParamDescriptor::new("Post Clip", "postclip", 0.0, 1.0, 0.0),
            _ => return None,
        };
        Some(desc.with_id(ParamId(2690 + index as u32)))
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            Self::DOWNSAMPLE => self.downsample,
            Self::NOISE_BIAS => self.noise_bias.current(),
            Self::PRE_NOISE => self.pre_noise.current(),
            Self::POST_NOISE => self.post_noise.current(),
            Self::DISTORT => self.distort.current(),
            Self::POST_CLIP => self.post_clip.current(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            Self::DOWNSAMPLE => self.downsample = value,
            Self::NOISE_BIAS => self.noise_bias.set(value),
            Self::PRE_NOISE => self.pre_noise.set(value),
            Self::POST_NOISE => self.post_noise.set(value),
            Self::DISTORT => self.distort.set(value),
            Self::POST_CLIP => self.post_clip.set(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(crush: &mut Crush, left: &[f32], right: &[f32]) -> (Vec<f32>, Vec<f32>) {
        let mut out_l = vec![0.0; left.len()];
        let mut out_r = vec![0.0; right.len()];
        crush.process([left, right], [&mut out_l, &mut out_r]);
        (out_l, out_r)
    }

    #[test]
    fn test_default_params() {
        let crush = Crush::new();
        assert_eq!(crush.param_count(), 6);

        let down = crush.param_info(Crush::DOWNSAMPLE).unwrap();
        assert_eq!(down.name, "Downsample");
        assert_eq!(down.symbol, "downsample");
        assert_eq!((down.min, down.max, down.default), (1.0, 16.0, 1.0));

        let bias = crush.param_info(Crush::NOISE_BIAS).unwrap();
        assert_eq!(bias.symbol, "noisebias");
        assert_eq!(crush.get_param(Crush::NOISE_BIAS), 0.5);

        assert!(crush.param_info(6).is_none());
        assert_eq!(crush.param_id(5), Some(ParamId(2695)));
    }

    #[test]
    fn test_passthrough_when_neutral() {
        let mut crush = Crush::new();
        let left: Vec<f32> = (0..256).map(|i| libm::sinf(i as f32 * 0.05) * 0.8).collect();
        let right: Vec<f32> = left.iter().map(|s| -s * 0.5).collect();

        let (out_l, out_r) = run(&mut crush, &left, &right);
        assert_eq!(out_l, left);
        assert_eq!(out_r, right);
    }

    #[test]
    fn test_downsample_holds() {
        let mut crush = Crush::new();
        crush.set_param(Crush::DOWNSAMPLE, 4.0);

        let input: Vec<f32> = (0..8).map(|i| i as f32 * 0.1).collect();
        let (out_l, _) = run(&mut crush, &input, &input);
        assert_eq!(out_l[..4], [0.0; 4]);
        assert_eq!(out_l[4..], [input[4]; 4]);
    }

    #[test]
    fn test_hold_spans_blocks() {
        let mut crush = Crush::new();
        crush.set_param(Crush::DOWNSAMPLE, 3.0);

        let (a, _) = run(&mut crush, &[0.1, 0.2], &[0.1, 0.2]);
        let (b, _) = run(&mut crush, &[0.3, 0.4], &[0.3, 0.4]);
        // Latch on frames 0 and 3 of the stream.
        assert_eq!(a, [0.1, 0.1]);
        assert_eq!(b, [0.1, 0.4]);
    }

    #[test]
    fn test_downsample_below_one_acts_as_one() {
        let mut crush = Crush::new();
        crush.set_param(Crush::DOWNSAMPLE, 0.0);
        let input = [0.1, 0.2, 0.3];
        let (out, _) = run(&mut crush, &input, &input);
        assert_eq!(out, input);
    }

    #[test]
    fn test_noise_reproducible() {
        let mut a = Crush::new();
        let mut b = Crush::new();
        for crush in [&mut a, &mut b] {
            crush.set_param(Crush::PRE_NOISE, 1.0);
            crush.set_param(Crush::POST_NOISE, 1.0);
            crush.set_param(Crush::DOWNSAMPLE, 2.0);
        }
        let input: Vec<f32> = (0..512).map(|i| libm::sinf(i as f32 * 0.1)).collect();
        for _ in 0..4 {
            assert_eq!(run(&mut a, &input, &input), run(&mut b, &input, &input));
        }
    }

    #[test]
    fn test_noise_changes_signal() {
        let mut crush = Crush::new();
        crush.set_param(Crush::POST_NOISE, 1.0);
        crush.set_param(Crush::NOISE_BIAS, 0.0);
        let input = [0.5f32; 64];
        // Settle the ramp first.
        run(&mut crush, &input, &input);
        let (out, _) = run(&mut crush, &input, &input);
        // bias 0: y = x + x^2 * n >= x
        assert!(out.iter().all(|&y| y >= 0.5));
        assert!(out.iter().any(|&y| y > 0.5));
    }

    #[test]
    fn test_distort_ramps_from_zero() {
        let mut crush = Crush::new();
        crush.set_param(Crush::DISTORT, 1.0);
        let input = [0.9f32; 16];
        let (first, _) = run(&mut crush, &input, &input);
        // Frame 0 of the ramp still has amount 0.
        assert_eq!(first[0], 0.9);
        let (second, _) = run(&mut crush, &input, &input);
        let expected = 2.0 * bitrot_core::rational_tanh(0.9);
        assert!((second[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_post_clip_bounded() {
        let mut crush = Crush::new();
        crush.set_param(Crush::POST_CLIP, 1.0);
        crush.reset();
        let input: Vec<f32> = (0..1024).map(|i| libm::sinf(i as f32 * 0.01) * 3.0).collect();
        let (out_l, out_r) = run(&mut crush, &input, &input);
        for (l, r) in out_l.iter().zip(out_r.iter()) {
            assert!(l.abs() <= 1.0 + 1e-6 && r.abs() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut crush = Crush::new();
        crush.set_param(Crush::DOWNSAMPLE, 8.0);
        run(&mut crush, &[0.7; 5], &[0.7; 5]);
        assert!(crush.counter > 0);

        crush.reset();
        assert_eq!(crush.held_l, 0.0);
        assert_eq!(crush.held_r, 0.0);
        assert_eq!(crush.counter, 0);
    }

    #[test]
    fn test_param_set_get_roundtrip() {
        let mut crush = Crush::new();
        for i in 0..crush.param_count() {
            crush.set_param(i, 0.25 + i as f32);
            assert_eq!(crush.get_param(i), 0.25 + i as f32);
        }
        crush.set_param(99, 1.0);
        assert_eq!(crush.get_param(99), 0.0);
    }
}
