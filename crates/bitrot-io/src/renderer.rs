//! Offline block renderer.

use crate::{Error, Result, StereoSamples};
use bitrot_core::Effect;
use bitrot_registry::{EffectRegistry, EffectWithParams};

/// Drives one engine over a whole buffer in fixed-size blocks.
///
/// Mirrors what a plugin host does: the engine gets `set_sample_rate` and
/// `reset` once up front, parameter changes land between blocks, and each
/// block is one `process` call.
pub struct BlockRenderer {
    effect: Box<dyn EffectWithParams + Send>,
    sample_rate: f32,
    block_size: usize,
}

impl BlockRenderer {
    /// Wrap an engine. A `block_size` of 0 is treated as 1.
    pub fn new(
        mut effect: Box<dyn EffectWithParams + Send>,
        sample_rate: f32,
        block_size: usize,
    ) -> Self {
        effect.set_sample_rate(sample_rate);
        effect.reset();
        let block_size = block_size.max(1);
        tracing::debug!(sample_rate, block_size, "renderer_ready");
        Self {
            effect,
            sample_rate,
            block_size,
        }
    }

    /// Create the engine registered as `id` and wrap it.
    pub fn from_registry(
        registry: &EffectRegistry,
        id: &str,
        sample_rate: f32,
        block_size: usize,
    ) -> Result<Self> {
        let effect = registry
            .create(id, sample_rate)
            .ok_or_else(|| Error::UnknownEffect(id.to_string()))?;
        Ok(Self::new(effect, sample_rate, block_size))
    }

    /// Sample rate the engine was prepared for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Frames per `process` call.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The wrapped engine.
    pub fn effect(&self) -> &(dyn EffectWithParams + Send) {
        self.effect.as_ref()
    }

    /// Set a parameter by name or symbol. Returns its index.
    pub fn set_param(&mut self, name: &str, value: f32) -> Result<usize> {
        let index = self.param_index(name)?;
        self.effect.effect_set_param(index, value);
        tracing::debug!(param = name, index, value, "set_param");
        Ok(index)
    }

    /// Set a parameter from text: a number, or `on`/`off` for toggles.
    pub fn set_param_text(&mut self, name: &str, text: &str) -> Result<usize> {
        let index = self.param_index(name)?;
        let value = self
            .effect
            .effect_parse_value(index, text)
            .ok_or_else(|| Error::InvalidValue {
                param: name.to_string(),
                value: text.to_string(),
            })?;
        self.effect.effect_set_param(index, value);
        tracing::debug!(param = name, index, value, "set_param");
        Ok(index)
    }

    fn param_index(&self, name: &str) -> Result<usize> {
        self.effect
            .effect_find_param(name)
            .ok_or_else(|| Error::UnknownParam(name.to_string()))
    }

    /// Render `input` through the engine.
    pub fn render(&mut self, input: &StereoSamples) -> StereoSamples {
        self.render_with_progress(input, |_| {})
    }

    /// Render `input`, calling `on_block` with the frame count after each block.
    pub fn render_with_progress(
        &mut self,
        input: &StereoSamples,
        mut on_block: impl FnMut(usize),
    ) -> StereoSamples {
        let frames = input.left.len().min(input.right.len());
        let mut output = StereoSamples::silence(frames);
        let size = self.block_size;

        let blocks = input.left[..frames]
            .chunks(size)
            .zip(input.right[..frames].chunks(size))
            .zip(output.left.chunks_mut(size))
            .zip(output.right.chunks_mut(size));
        for (((in_l, in_r), out_l), out_r) in blocks {
            self.effect.process([in_l, in_r], [out_l, out_r]);
            on_block(in_l.len());
        }

        output
    }
}
