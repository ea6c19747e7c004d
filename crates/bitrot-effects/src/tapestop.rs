//! Tapestop: slows playback to a halt like a tape machine losing power.
//!
//! On activation the engine starts recording into a fixed buffer and plays
//! that buffer back from the start at a speed that decays geometrically:
//!
//! ```text
//! speed[n+1] = speed[n] · k,    k = 0.9999 + (1 − s) · 0.00009
//! ```
//!
//! where `s` is the Speed parameter (1 stops fastest, 0 slowest). Playback
//! uses the oversampled reader, so the pitch glides down smoothly. With Fade
//! on, each read is scaled by the current speed, so the stop fades out as it
//! slows.
//!
//! The buffer is a fixed 192000 frames regardless of sample rate. Capture
//! stops when it is full; by then playback is far behind the write cursor.

use bitrot_core::{
    BlockRamp, Effect, OVERSAMPLING, ParamDescriptor, ParamId, ParameterInfo, SmoothedPair,
    StereoCapture, as_unit, block_len, is_on, pass_through, read_averaged,
};

/// Capture length in frames.
pub const BUFFER_SIZE: usize = 192_000;

/// Tape-stop engine.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Symbol | Range | Default | Hints |
/// |-------|------|--------|-------|---------|-------|
/// | 0 | Active | `active` | 0–1 | 0 | toggle |
/// | 1 | Speed | `speed` | 0–1 | 0.5 | |
/// | 2 | Fade | `fade` | 0–1 | 1 | toggle, smoothed |
///
/// # Example
///
/// ```rust
/// use bitrot_core::{Effect, ParameterInfo};
/// use bitrot_effects::Tapestop;
///
/// let mut tapestop = Tapestop::new();
/// tapestop.set_param(Tapestop::ACTIVE, 1.0);
///
/// let input = [0.5f32; 256];
/// let (mut out_l, mut out_r) = ([0.0; 256], [0.0; 256]);
/// tapestop.process([&input, &input], [&mut out_l, &mut out_r]);
/// assert!(tapestop.play_speed() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tapestop {
    active: f32,
    speed: f32,
    fade: SmoothedPair,

    play_speed: f64,
    slowdown: f64,

    capture: StereoCapture,
    write_pos: usize,
    read_pos: f64,
}

impl Tapestop {
    /// On/off.
    pub const ACTIVE: usize = 0;
    /// How quickly playback slows.
    pub const SPEED: usize = 1;
    /// Fade out with the slowdown.
    pub const FADE: usize = 2;

    const PARAM_COUNT: usize = 3;

    /// Create a `Tapestop` with default parameters.
    pub fn new() -> Self {
        let mut tapestop = Self {
            active: 0.0,
            speed: 0.5,
            fade: SmoothedPair::new(1.0),
            play_speed: 1.0,
            slowdown: slowdown_factor(0.5),
            capture: StereoCapture::new(BUFFER_SIZE),
            write_pos: 0,
            read_pos: 0.0,
        };
        tapestop.apply_defaults();
        tapestop.fade.commit();
        tapestop
    }

    /// Current playback speed, `1.0` at activation.
    pub fn play_speed(&self) -> f64 {
        self.play_speed
    }

    /// Per-frame multiplier applied to the playback speed.
    pub fn slowdown(&self) -> f64 {
        self.slowdown
    }

    /// Current read cursor.
    pub fn read_pos(&self) -> f64 {
        self.read_pos
    }

    /// Frames captured since activation.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }
}

impl Default for Tapestop {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometric decay factor for a Speed setting.
fn slowdown_factor(speed: f32) -> f64 {
    0.9999 + (1.0 - f64::from(speed)) * 0.00009
}

impl Effect for Tapestop {
    fn process(&mut self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2]) {
        let frames = block_len(&inputs, &outputs);
        let fade = BlockRamp::new(
            as_unit(self.fade.old()),
            as_unit(self.fade.current()),
            frames,
        );

        if !is_on(self.active) {
            self.play_speed = 1.0;
            self.write_pos = 0;
            self.read_pos = 0.0;
            pass_through(inputs, outputs, frames);
            self.fade.commit();
            return;
        }

        let [in_l, in_r] = inputs;
        let [out_l, out_r] = outputs;
        for i in 0..frames {
            if self.write_pos < self.capture.len() {
                self.capture.write(self.write_pos, in_l[i], in_r[i]);
                self.write_pos += 1;
            }

            let weight = 1.0 + (self.play_speed as f32 - 1.0) * fade.at(i);
            let sub_step = self.play_speed / OVERSAMPLING as f64;
            let (l, r) = read_averaged(&self.capture, &mut self.read_pos, sub_step, weight);
            out_l[i] = l;
            out_r[i] = r;

            self.play_speed *= self.slowdown;
        }

        self.fade.commit();
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    fn reset(&mut self) {
        self.play_speed = 1.0;
        self.write_pos = 0;
        self.read_pos = 0.0;
        self.fade.commit();
    }
}

impl ParameterInfo for Tapestop {
    fn param_count(&self) -> usize {
        Self::PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        let desc = match index {
            Self::ACTIVE => ParamDescriptor::toggle("Active", "active", 0.0),
            Self::SPEED => ParamDescriptor::new("Speed", "speed", 0.0, 1.0, 0.5),
            Self::FADE => ParamDescriptor::toggle("Fade", "fade", 1.0),
            _ => return None,
        };
        Some(desc.with_id(ParamId(2680 + index as u32)))
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            Self::ACTIVE => self.active,
            Self::SPEED => self.speed,
            Self::FADE => self.fade.current(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            Self::ACTIVE => self.active = value,
            Self::SPEED => {
                self.speed = value;
                self.slowdown = slowdown_factor(value);
            }
            Self::FADE => self.fade.set(value),
            _ => {}
        }
    }
}
