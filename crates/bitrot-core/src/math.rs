//! Waveshaping and noise-injection helpers.
//!
//! All functions are total over finite floats and allocation-free.

/// Rational approximation of `tanh`.
///
/// `x * (27 + x²) / (27 + 9x²)` inside `[-3, 3]`, saturating to ±1 outside.
/// The curve reaches exactly ±1 at ±3, so it is continuous.
///
/// Reference: musicdsp.org archive #238 (cschueler).
#[inline]
pub fn rational_tanh(x: f32) -> f32 {
    if x < -3.0 {
        -1.0
    } else if x > 3.0 {
        1.0
    } else {
        x * (27.0 + x * x) / (27.0 + 9.0 * x * x)
    }
}

/// Blend between the dry sample and a boosted soft clip.
///
/// `y = x·(1 − amount) + amount·boost·rational_tanh(x)`
///
/// - `amount = 0` is the identity.
/// - `amount = 1` gives `boost·rational_tanh(x)`, bounded by `±boost`.
#[inline]
pub fn soft_clip(x: f32, amount: f32, boost: f32) -> f32 {
    let mut y = x * (1.0 - amount);
    y += amount * boost * rational_tanh(x);
    y
}

/// Multiplicative noise injection.
///
/// Blends the dry sample with `x + x²·(noise − bias)`. The noise term scales
/// with `x²`, so silence stays silent and loud passages get grittier.
/// `noise` is expected in `[0, 1]`; `bias` shifts its centre.
#[inline]
pub fn inject_noise(x: f32, amount: f32, noise: f32, bias: f32) -> f32 {
    let n = noise - bias;
    let mut y = x * (1.0 - amount);
    y += amount * (x + x * x * n);
    y
}
