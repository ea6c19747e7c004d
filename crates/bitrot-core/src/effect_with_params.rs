//! Combined `Effect` + `ParameterInfo` trait for boxed engines.
//!
//! [`EffectWithParams`] lets a `Box<dyn ...>` expose both audio processing and
//! the parameter table through one vtable. A blanket impl covers every type
//! that implements both traits; the registry hands engines out as
//! `Box<dyn EffectWithParams + Send>`.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::effect::Effect;
use crate::param_info::{ParamDescriptor, ParameterInfo};

/// Object-safe view of an engine's parameter table.
pub trait EffectWithParams: Effect {
    /// Get the parameter count.
    fn effect_param_count(&self) -> usize;

    /// Get parameter info by index.
    fn effect_param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Get parameter value by index.
    fn effect_get_param(&self, index: usize) -> f32;

    /// Set parameter value by index.
    fn effect_set_param(&mut self, index: usize, value: f32);

    /// Find a parameter by name or symbol (case-insensitive).
    fn effect_find_param(&self, name: &str) -> Option<usize>;

    /// Format a parameter value as display text.
    ///
    /// Returns `None` if the index is out of range.
    fn effect_format_value(&self, index: usize, value: f32) -> Option<String>;

    /// Parse display text back to a parameter value.
    fn effect_parse_value(&self, index: usize, text: &str) -> Option<f32>;
}

impl<T: Effect + ParameterInfo> EffectWithParams for T {
    fn effect_param_count(&self) -> usize {
        self.param_count()
    }

    fn effect_param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.param_info(index)
    }

    fn effect_get_param(&self, index: usize) -> f32 {
        self.get_param(index)
    }

    fn effect_set_param(&mut self, index: usize, value: f32) {
        self.set_param(index, value)
    }

    fn effect_find_param(&self, name: &str) -> Option<usize> {
        self.find_param_by_name(name)
    }

    fn effect_format_value(&self, index: usize, value: f32) -> Option<String> {
        self.param_info(index).map(|desc| desc.format_value(value))
    }

    fn effect_parse_value(&self, index: usize, text: &str) -> Option<f32> {
        self.param_info(index)
            .and_then(|desc| desc.parse_value(text))
    }
}
