//! Repeat: tempo-synced capture-and-loop (beat repeat / stutter).
//!
//! # Theory
//!
//! While active, incoming audio is appended to a capture buffer and the
//! output is read back from the same buffer, looping over the first
//! `loop_length` frames:
//!
//! ```text
//! frames_per_beat = (60 / bpm) · fs
//! loop_length     = frames_per_beat · beats / division
//! ```
//!
//! The buffer holds a fixed window (`24 s` at the current rate). Once it is
//! full, capture stops; the loop keeps playing what was caught. It does not
//! wrap like a delay line because the loop is anchored at the moment of
//! activation (or the last retrigger).
//!
//! ## Envelope
//!
//! Each pass through the loop is shaped by an attack/hold/release gain. On
//! every wrap the gain drops to 0; it then rises by the attack increment per
//! frame while the read cursor is inside the hold region
//! (`max(hold, 0.1) · loop_length`) and falls by the release increment after
//! it. Increments are `1 / (fs · value / 10)`, or instantaneous at 0, and
//! are scaled by the playback speed so the envelope tracks the material.
//!
//! ## Varispeed
//!
//! With varispeed on, the cursor advances by `speed` per frame using the
//! oversampled reader ([`bitrot_core::oversample`]). The first pass plays at
//! unit speed when `speed >= 1`, so a fast repeat can't outrun the capture.

use bitrot_core::{
    Effect, OVERSAMPLING, ParamDescriptor, ParamFlags, ParamId, ParameterInfo, SmoothedPair,
    StereoCapture, TriggerLatch, block_len, is_on, pass_through, read_averaged,
};

/// Seconds of audio the capture buffer can hold.
const CAPTURE_SECONDS: usize = 24;

/// Floor on the hold fraction so the attack always gets some room.
const MIN_HOLD: f32 = 0.1;

/// Beat-repeat engine.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Symbol | Range | Default | Hints |
/// |-------|------|--------|-------|---------|-------|
/// | 0 | Active | `active` | 0–1 | 0 | toggle |
/// | 1 | BPM | `bpm` | 10–480 | 100 | integer |
/// | 2 | Beats | `beats` | 1–4 | 2 | integer |
/// | 3 | Division | `division` | 1–16 | 4 | integer |
/// | 4 | Retrigger | `retrigger` | 0–1 | 0 | toggle, trigger |
/// | 5 | Attack | `attack` | 0–1 | 0 | |
/// | 6 | Hold | `hold` | 0–1 | 1 | |
/// | 7 | Release | `release` | 0–1 | 1 | |
/// | 8 | Varispeed | `varispeed` | 0–1 | 0 | toggle |
/// | 9 | Speed | `speed` | 0.25–4 | 1 | logarithmic, smoothed |
///
/// # Example
///
/// ```rust
/// use bitrot_core::{Effect, ParameterInfo};
/// use bitrot_effects::Repeat;
///
/// let mut repeat = Repeat::new(48000.0);
/// repeat.set_param(Repeat::BPM, 120.0);
/// repeat.set_param(Repeat::ACTIVE, 1.0);
/// assert_eq!(repeat.loop_length(), 12000.0);
/// ```
#[derive(Debug, Clone)]
pub struct Repeat {
    sample_rate: f64,

    active: f32,
    bpm: f32,
    beats: f32,
    division: f32,
    retrigger: f32,
    attack: f32,
    hold: f32,
    release: f32,
    varispeed: f32,
    speed: SmoothedPair,

    capture: StereoCapture,
    /// Set whenever the capture holds audio, so the inactive path only
    /// clears it once.
    capture_dirty: bool,
    write_pos: usize,
    read_pos: f64,
    loop_length: f64,
    looped: bool,

    attack_delta: f32,
    release_delta: f32,
    gain: f32,
    retrigger_latch: TriggerLatch,
}

impl Repeat {
    /// On/off.
    pub const ACTIVE: usize = 0;
    /// Tempo in beats per minute.
    pub const BPM: usize = 1;
    /// Loop length numerator, in beats.
    pub const BEATS: usize = 2;
    /// Loop length denominator.
    pub const DIVISION: usize = 3;
    /// Clear the capture and restart the loop.
    pub const RETRIGGER: usize = 4;
    /// Envelope attack.
    pub const ATTACK: usize = 5;
    /// Fraction of the loop spent before release.
    pub const HOLD: usize = 6;
    /// Envelope release.
    pub const RELEASE: usize = 7;
    /// Variable-speed playback on/off.
    pub const VARISPEED: usize = 8;
    /// Playback speed used by varispeed.
    pub const SPEED: usize = 9;

    const PARAM_COUNT: usize = 10;

    /// Create a `Repeat` at the given sample rate with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let rate = f64::from(sample_rate);
        let mut repeat = Self {
            sample_rate: rate,
            active: 0.0,
            bpm: 100.0,
            beats: 2.0,
            division: 4.0,
            retrigger: 0.0,
            attack: 0.0,
            hold: 1.0,
            release: 1.0,
            varispeed: 0.0,
            speed: SmoothedPair::new(1.0),
            capture: StereoCapture::new(capture_len(rate)),
            capture_dirty: false,
            write_pos: 0,
            read_pos: 0.0,
            loop_length: 0.0,
            looped: false,
            attack_delta: 1.0,
            release_delta: 1.0,
            gain: 1.0,
            retrigger_latch: TriggerLatch::new(),
        };
        repeat.apply_defaults();
        repeat.speed.commit();
        repeat
    }

    /// Loop length in (fractional) frames.
    pub fn loop_length(&self) -> f64 {
        self.loop_length
    }

    /// Current read cursor.
    pub fn read_pos(&self) -> f64 {
        self.read_pos
    }

    /// Frames captured since activation or the last retrigger.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Current envelope gain in `[0, 1]`.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Whether the read cursor has wrapped since the loop was armed.
    pub fn is_looped(&self) -> bool {
        self.looped
    }

    /// The capture buffer.
    pub fn capture(&self) -> &StereoCapture {
        &self.capture
    }

    fn update_loop(&mut self) {
        let bpm = f64::from((self.bpm as u32).max(1));
        let beats = f64::from((self.beats as u32).max(1));
        let division = f64::from((self.division as u32).max(1));

        let frames_per_beat = (60.0 / bpm) * self.sample_rate;
        self.loop_length = (frames_per_beat * beats / division).max(1.0);
    }

    fn update_envelope(&mut self) {
        self.attack_delta = envelope_delta(self.attack, self.sample_rate);
        self.release_delta = envelope_delta(self.release, self.sample_rate);
    }

    fn retrigger_now(&mut self) {
        self.capture.clear();
        self.capture_dirty = false;
        self.write_pos = 0;
        self.read_pos = 0.0;
        self.looped = false;
    }

    /// Wrap the read cursor back into `[0, loop_length)`.
    #[inline]
    fn wrap_read_pos(&mut self) {
        while self.read_pos >= self.loop_length {
            self.read_pos -= self.loop_length;
            self.gain = 0.0;
            self.looped = true;
        }
    }

    #[inline]
    fn advance_envelope(&mut self, speed: f32) {
        let hold_end = f64::from(self.hold.max(MIN_HOLD)) * self.loop_length;
        if self.read_pos <= hold_end {
            self.gain = (self.gain + self.attack_delta * speed).min(1.0);
        } else {
            self.gain = (self.gain - self.release_delta * speed).max(0.0);
        }
    }
}

/// Capture length in frames for a sample rate.
fn capture_len(sample_rate: f64) -> usize {
    (libm::ceil(sample_rate.max(0.0)) as usize) * CAPTURE_SECONDS
}

/// Per-frame envelope increment for an attack or release setting.
fn envelope_delta(value: f32, sample_rate: f64) -> f32 {
    if value != 0.0 {
        (1.0 / (sample_rate * f64::from(value / 10.0))) as f32
    } else {
        1.0
    }
}

impl Effect for Repeat {
    fn process(&mut self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2]) {
        let frames = block_len(&inputs, &outputs);
        let speed = self.speed.ramp(frames);

        if !is_on(self.active) {
            self.write_pos = 0;
            self.read_pos = 0.0;
            self.retrigger_latch.release();
            self.looped = false;
            self.gain = 1.0;
            if self.capture_dirty {
                self.capture.clear();
                self.capture_dirty = false;
            }
            pass_through(inputs, outputs, frames);
            self.speed.commit();
            return;
        }

        if self.write_pos < self.capture.len() {
            let written = self.capture.write_block(
                self.write_pos,
                &inputs[0][..frames],
                &inputs[1][..frames],
            );
            self.write_pos += written;
            self.capture_dirty |= written > 0;
        }

        let varispeed = is_on(self.varispeed);
        let [out_l, out_r] = outputs;
        for i in 0..frames {
            let s = speed.at(i);

            let (l, r) = if varispeed && (self.looped || s < 1.0) {
                let sub_step = f64::from(s / OVERSAMPLING as f32);
                read_averaged(&self.capture, &mut self.read_pos, sub_step, self.gain)
            } else {
                let (l, r) = self.capture.frame_at(self.read_pos);
                self.read_pos += 1.0;
                (l * self.gain, r * self.gain)
            };
            out_l[i] = l;
            out_r[i] = r;

            self.wrap_read_pos();
            self.advance_envelope(s);
        }

        self.speed.commit();
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = f64::from(sample_rate);
        self.capture.resize(capture_len(self.sample_rate));
        self.write_pos = self.write_pos.min(self.capture.len());
        self.update_loop();
        self.update_envelope();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            capture_frames = self.capture.len(),
            loop_length = self.loop_length,
            "repeat_sample_rate"
        );
    }

    fn reset(&mut self) {
        self.write_pos = 0;
        self.read_pos = 0.0;
    }
}

impl ParameterInfo for Repeat {
    fn param_count(&self) -> usize {
        Self::PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        let desc = match index {
            Self::ACTIVE => ParamDescriptor::toggle("Active", "active", 0.0),
            Self::BPM => ParamDescriptor::integer("BPM", "bpm", 10.0, 480.0, 100.0),
            Self::BEATS => ParamDescriptor::integer("Beats", "beats", 1.0, 4.0, 2.0),
            Self::DIVISION => ParamDescriptor::integer("Division", "division", 1.0, 16.0, 4.0),
            Self::RETRIGGER => ParamDescriptor::toggle("Retrigger", "retrigger", 0.0).with_flags(
                ParamFlags::AUTOMATABLE
                    .union(ParamFlags::TOGGLE)
                    .union(ParamFlags::TRIGGER),
            ),
            Self::ATTACK => ParamDescriptor::new("Attack", "attack", 0.0, 1.0, 0.0),
            Self::HOLD => ParamDescriptor::new("Hold", "hold", 0.0, 1.0, 1.0),
            Self::RELEASE => ParamDescriptor::new("Release", "release", 0.0, 1.0, 1.0),
            Self::VARISPEED => ParamDescriptor::toggle("Varispeed", "varispeed", 0.0),
            Self::SPEED => ParamDescriptor::new("Speed", "speed", 0.25, 4.0, 1.0)
                .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::LOGARITHMIC)),
            _ => return None,
        };
        Some(desc.with_id(ParamId(2700 + index as u32)))
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            Self::ACTIVE => self.active,
            Self::BPM => self.bpm,
            Self::BEATS => self.beats,
            Self::DIVISION => self.division,
            Self::RETRIGGER => self.retrigger,
            Self::ATTACK => self.attack,
            Self::HOLD => self.hold,
            Self::RELEASE => self.release,
            Self::VARISPEED => self.varispeed,
            Self::SPEED => self.speed.current(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            Self::ACTIVE => self.active = value,
            Self::BPM => {
                self.bpm = value;
                self.update_loop();
            }
            Self::BEATS => {
                self.beats = value;
                self.update_loop();
            }
            Self::DIVISION => {
                self.division = value;
                self.update_loop();
            }
            Self::RETRIGGER => {
                self.retrigger = value;
                if self.retrigger_latch.update(value) {
                    self.retrigger_now();
                }
            }
            Self::ATTACK => {
                self.attack = value;
                self.attack_delta = envelope_delta(value, self.sample_rate);
            }
            Self::HOLD => self.hold = value,
            Self::RELEASE => {
                self.release = value;
                self.release_delta = envelope_delta(value, self.sample_rate);
            }
            Self::VARISPEED => self.varispeed = value,
            Self::SPEED => self.speed.set(value),
            _ => {}
        }
    }
}
