//! Reverser: plays the last few seconds backwards while held.
//!
//! Two stereo buffers of `4 s` each run side by side. The working buffer is
//! a circular recorder that is always fed, active or not. On the first
//! active frame the whole working buffer is copied into a frozen buffer and
//! playback starts from the frozen copy, stepping the read cursor one frame
//! per output frame (backwards by default, forwards when the direction
//! switch is on).
//!
//! While playing, the frozen copy is refreshed from the working buffer at
//! the write position, one frame per output frame, for at most half the
//! buffer length. Without that cap the refresh would eventually catch the
//! read cursor and the reverse would turn into a forward echo.
//!
//! Cursors wrap modulo the buffer length in both directions.

use bitrot_core::{
    Effect, ParamDescriptor, ParamFlags, ParamId, ParameterInfo, StereoCapture, block_len, is_on,
    pass_through,
};

/// Seconds of audio kept by each buffer.
const BUFFER_SECONDS: usize = 4;

/// Reverse-playback engine.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Symbol | Range | Default | Hints |
/// |-------|------|--------|-------|---------|-------|
/// | 0 | Active | `active` | 0–1 | 0 | toggle |
/// | 1 | Switch Direction | `switch` | 0–1 | 0 | automatable only |
#[derive(Debug, Clone)]
pub struct Reverser {
    active: f32,
    switch_direction: f32,
    working: StereoCapture,
    frozen: StereoCapture,
    write_pos: usize,
    read_pos: usize,
    /// `None` until the next full copy; then the number of single-frame
    /// refreshes made since.
    refreshed: Option<usize>,
}

impl Reverser {
    /// On/off.
    pub const ACTIVE: usize = 0;
    /// Play forwards instead of backwards when on.
    pub const SWITCH_DIRECTION: usize = 1;

    const PARAM_COUNT: usize = 2;

    /// Create a `Reverser` at the given sample rate with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let len = buffer_len(sample_rate);
        let mut reverser = Self {
            active: 0.0,
            switch_direction: 0.0,
            working: StereoCapture::new(len),
            frozen: StereoCapture::new(len),
            write_pos: 0,
            read_pos: 0,
            refreshed: None,
        };
        reverser.apply_defaults();
        reverser
    }

    /// The always-recording circular buffer.
    pub fn working(&self) -> &StereoCapture {
        &self.working
    }

    /// The snapshot being played back.
    pub fn frozen(&self) -> &StereoCapture {
        &self.frozen
    }

    /// Next write slot in the working buffer.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Current playback slot.
    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// Single-frame refreshes made since the last full copy, if any.
    pub fn refreshed(&self) -> Option<usize> {
        self.refreshed
    }

    fn refresh_frozen(&mut self, slot: usize) {
        match self.refreshed {
            None => {
                self.frozen.copy_from(&self.working);
                self.refreshed = Some(0);
            }
            Some(n) if n < self.working.len() / 2 => {
                self.frozen.copy_frame_from(&self.working, slot);
                self.refreshed = Some(n + 1);
            }
            Some(_) => {}
        }
    }
}

fn buffer_len(sample_rate: f32) -> usize {
    (libm::ceilf(sample_rate.max(0.0)) as usize) * BUFFER_SECONDS
}

impl Effect for Reverser {
    fn process(&mut self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2]) {
        let frames = block_len(&inputs, &outputs);
        let size = self.working.len();
        if size == 0 {
            pass_through(inputs, outputs, frames);
            return;
        }

        let playing = is_on(self.active);
        let step: isize = if is_on(self.switch_direction) { 1 } else { -1 };
        let [in_l, in_r] = inputs;
        let [out_l, out_r] = outputs;

        for i in 0..frames {
            let slot = self.write_pos % size;
            self.working.write(slot, in_l[i], in_r[i]);

            let (l, r) = if playing {
                self.refresh_frozen(slot);
                self.read_pos = (self.read_pos as isize + step).rem_euclid(size as isize) as usize;
                self.frozen.frame(self.read_pos)
            } else {
                self.read_pos = slot;
                self.refreshed = None;
                self.working.frame(slot)
            };
            out_l[i] = l;
            out_r[i] = r;

            self.write_pos = (self.write_pos + 1) % size;
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let len = buffer_len(sample_rate);
        self.working.resize(len);
        self.frozen.resize(len);
        if len > 0 {
            self.write_pos %= len;
            self.read_pos %= len;
        } else {
            self.write_pos = 0;
            self.read_pos = 0;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, buffer_frames = len, "reverser_sample_rate");
    }

    fn reset(&mut self) {
        self.write_pos = 0;
        self.read_pos = 0;
        self.refreshed = None;
    }
}

impl ParameterInfo for Reverser {
    fn param_count(&self) -> usize {
        Self::PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        let desc = match index {
            Self::ACTIVE => ParamDescriptor::toggle("Active", "active", 0.0),
            Self::SWITCH_DIRECTION => {
                ParamDescriptor::new("Switch Direction", "switch", 0.0, 1.0, 0.0)
                    .with_flags(ParamFlags::AUTOMATABLE)
            }
            _ => return None,
        };
        Some(desc.with_id(ParamId(2670 + index as u32)))
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            Self::ACTIVE => self.active,
            Self::SWITCH_DIRECTION => self.switch_direction,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            Self::ACTIVE => self.active = value,
            Self::SWITCH_DIRECTION => self.switch_direction = value,
            _ => {}
        }
    }
}
