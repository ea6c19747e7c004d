//! Seedable linear congruential noise source.
//!
//! Each engine owns its own [`Lcg`]; there is no shared generator state.
//! Sequences are bit-reproducible for a given seed and call count.

/// Multiplier.
pub const LCG_MULTIPLIER: u32 = 24691;
/// Increment.
pub const LCG_INCREMENT: u32 = 1_103_515_245;
/// Seed used by [`Lcg::default`].
pub const LCG_DEFAULT_SEED: u32 = 1;

/// 32-bit linear congruential generator, modulus 2^32.
///
/// `x[n+1] = 24691 * x[n] + 1103515245 (mod 2^32)`. The first value drawn
/// is `x[1]`; the seed itself is never returned.
///
/// ```rust
/// use bitrot_core::Lcg;
///
/// let mut a = Lcg::default();
/// let mut b = Lcg::new(1);
/// assert_eq!(a.next_u32(), b.next_u32());
/// assert_eq!(a.next_u32(), 24691u32.wrapping_mul(1_103_539_936).wrapping_add(1_103_515_245));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from `seed`.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance and return the raw 32-bit state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Advance and return a value in `[0, 1]`.
    ///
    /// Computed as `x / 0xffffffff` in `f32`. Values within one float ULP of
    /// `u32::MAX` round to exactly 1.0.
    #[inline]
    pub fn next_unit(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(LCG_DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_values_from_default_seed() {
        let mut rng = Lcg::default();
        // 24691 * 1 + 1103515245
        assert_eq!(rng.next_u32(), 1_103_539_936);
        let expected = 1_103_539_936u32
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        assert_eq!(rng.next_u32(), expected);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn unit_range() {
        let mut rng = Lcg::default();
        for _ in 0..10_000 {
            let v = rng.next_unit();
            assert!((0.0..=1.0).contains(&v), "out of range: {v}");
        }
    }
}
