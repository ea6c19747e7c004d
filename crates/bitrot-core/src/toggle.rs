//! Boolean interpretation of continuous parameters.
//!
//! Hosts send every parameter as `f32`. Switches are "on" at or above
//! [`TOGGLE_THRESHOLD`], which is fixed at build time: 1.0 by default, 0.5
//! with the `vst-threshold` feature (VST hosts send normalized 0..1 values and
//! never quite reach 1.0 on some controllers).

/// Value at or above which a toggle reads as on.
#[cfg(not(feature = "vst-threshold"))]
pub const TOGGLE_THRESHOLD: f32 = 1.0;

/// Value at or above which a toggle reads as on.
#[cfg(feature = "vst-threshold")]
pub const TOGGLE_THRESHOLD: f32 = 0.5;

/// Whether a toggle parameter value reads as on.
#[inline]
pub fn is_on(value: f32) -> bool {
    value >= TOGGLE_THRESHOLD
}

/// `1.0` when on, `0.0` when off. Used to smooth a toggle as a 0/1 ramp.
#[inline]
pub fn as_unit(value: f32) -> f32 {
    if is_on(value) { 1.0 } else { 0.0 }
}

/// Rising-edge detector for trigger parameters.
///
/// Fires once when the value turns on, then stays latched until the value
/// turns off again, so a held trigger doesn't refire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerLatch {
    latched: bool,
}

impl TriggerLatch {
    /// New, unlatched.
    pub const fn new() -> Self {
        Self { latched: false }
    }

    /// Feed a new parameter value. Returns `true` on a rising edge.
    #[inline]
    pub fn update(&mut self, value: f32) -> bool {
        if is_on(value) {
            if self.latched {
                false
            } else {
                self.latched = true;
                true
            }
        } else {
            self.latched = false;
            false
        }
    }

    /// Whether the trigger is currently held.
    #[inline]
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Drop the latch without an edge.
    #[inline]
    pub fn release(&mut self) {
        self.latched = false;
    }
}
