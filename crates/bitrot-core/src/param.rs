//! Per-block parameter smoothing.
//!
//! Hosts deliver parameter values between blocks. To avoid zipper noise,
//! continuous parameters are ramped linearly across the next block, from the
//! value in effect when the previous block ended to the newly set value.
//!
//! - [`SmoothedPair`] stores the two snapshots (`old`, `current`).
//! - [`BlockRamp`] is the per-block interpolator built from a pair.
//!
//! ## Usage
//!
//! ```rust
//! use bitrot_core::SmoothedPair;
//!
//! let mut gain = SmoothedPair::new(0.0);
//! gain.set(4.0);
//!
//! // At the top of the block:
//! let ramp = gain.ramp(4);
//! let values: Vec<f32> = (0..4).map(|f| ramp.at(f)).collect();
//! assert_eq!(values, [0.0, 1.0, 2.0, 3.0]);
//!
//! // At the end of the block:
//! gain.commit();
//! assert_eq!(gain.old(), 4.0);
//! ```

/// Linear interpolation of one parameter across a block.
///
/// Frame `f` of an `n`-frame block evaluates to
/// `old + (current - old) * (f / n)`. A zero-length block is treated as one
/// frame long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRamp {
    old: f32,
    current: f32,
    frames: f32,
}

impl BlockRamp {
    /// Create a ramp from `old` to `current` over `frames` frames.
    #[inline]
    pub fn new(old: f32, current: f32, frames: usize) -> Self {
        let frames = if frames == 0 { 1.0 } else { frames as f32 };
        Self {
            old,
            current,
            frames,
        }
    }

    /// Value at frame index `frame`.
    #[inline]
    pub fn at(&self, frame: usize) -> f32 {
        self.at_position(frame as f32)
    }

    /// Value at a fractional position within the block.
    ///
    /// `at_position(0.0)` is `old`, `at_position(frames)` would be `current`.
    /// Positions outside the block extrapolate along the same line.
    #[inline]
    pub fn at_position(&self, position: f32) -> f32 {
        let fac = position / self.frames;
        self.old + (self.current - self.old) * fac
    }
}

/// The `(old, current)` snapshot pair of a block-smoothed parameter.
///
/// `old` is the value effective at the start of the next block, `current`
/// the value the host last set. After [`commit`](Self::commit) both are
/// equal until the next [`set`](Self::set).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedPair {
    old: f32,
    current: f32,
}

impl SmoothedPair {
    /// Create a settled pair.
    pub const fn new(value: f32) -> Self {
        Self {
            old: value,
            current: value,
        }
    }

    /// Set the value the next block ramps toward.
    #[inline]
    pub fn set(&mut self, value: f32) {
        self.current = value;
    }

    /// Last value set by the host.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Value the next block starts from.
    #[inline]
    pub fn old(&self) -> f32 {
        self.old
    }

    /// Build the ramp for an `frames`-long block.
    #[inline]
    pub fn ramp(&self, frames: usize) -> BlockRamp {
        BlockRamp::new(self.old, self.current, frames)
    }

    /// End-of-block bookkeeping: the next block starts where this one ended.
    #[inline]
    pub fn commit(&mut self) {
        self.old = self.current;
    }

    /// Whether a ramp is pending.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.old == self.current
    }
}

impl Default for SmoothedPair {
    fn default() -> Self {
        Self::new(0.0)
    }
}
