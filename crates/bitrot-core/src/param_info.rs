//! Parameter introspection for host-facing parameter tables.
//!
//! Every engine publishes a stable, ordered list of parameters. A host shim
//! (plugin wrapper, CLI, metadata exporter) reads the table through
//! [`ParameterInfo`] and forwards plain `f32` values by index.
//!
//! # Design
//!
//! Each parameter is described by a [`ParamDescriptor`]:
//!
//! - `name` / `symbol` - display name and stable symbolic id (`"downsample"`)
//! - [`ParamId`] - stable numeric id for automation and presets
//! - `min` / `max` / `default` - inclusive range and initial value
//! - [`ParamFlags`] - presentation hints (integer, toggle, trigger, ...)
//!
//! Hints tell a host how to present or quantize a control. Engines never
//! read them; they always consume the raw value.
//!
//! # Example
//!
//! ```rust
//! use bitrot_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Level {
//!     level: f32,
//! }
//!
//! impl ParameterInfo for Level {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::new("Level", "level", 0.0, 1.0, 1.0)
//!                 .with_id(ParamId(100))),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.level,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.level = value;
//!         }
//!     }
//! }
//!
//! let mut level = Level { level: 1.0 };
//! assert_eq!(level.find_param_by_name("LEVEL"), Some(0));
//! level.set_param(0, 0.5);
//! assert_eq!(level.get_param(0), 0.5);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

use libm::{expf, logf};

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
///
/// # Convention
///
/// Each engine gets a base id; params are sequential from there:
/// - Reverser: 2670, 2671
/// - Crush: 2690..=2695
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParamId(pub u32);

/// Parameter presentation hints.
///
/// Bit set mirroring the boolean hints plugin hosts understand. Use
/// [`union`](Self::union) to combine.
///
/// ```rust
/// use bitrot_core::ParamFlags;
///
/// let flags = ParamFlags::TOGGLE.union(ParamFlags::TRIGGER);
/// assert!(flags.contains(ParamFlags::TRIGGER));
/// assert!(!flags.contains(ParamFlags::INTEGER));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Only whole numbers are meaningful.
    pub const INTEGER: Self = Self(1 << 1);
    /// On/off switch; see [`crate::toggle::is_on`].
    pub const TOGGLE: Self = Self(1 << 2);
    /// Momentary: acts on the rising edge and latches while held.
    pub const TRIGGER: Self = Self(1 << 3);
    /// Present on a logarithmic scale. Requires `min > 0`.
    pub const LOGARITHMIC: Self = Self(1 << 4);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Raw bits, for host shims that export hints as a mask.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for engines that expose an indexed parameter table.
///
/// Indices are zero-based and stable for the lifetime of the type. Reads and
/// writes outside `0..param_count()` are ignored (`get_param` returns 0).
pub trait ParameterInfo {
    /// Returns the number of parameters.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at `index`.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at `index`.
    ///
    /// The value is taken as-is; range and hints are the host's business.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name or symbol (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name) || desc.symbol.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Returns the stable [`ParamId`] for the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// Scans all parameters (O(n)); suitable for setup paths, not audio.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }

    /// Apply every parameter's default value through [`set_param`](Self::set_param).
    fn apply_defaults(&mut self) {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i) {
                self.set_param(i, desc.default);
            }
        }
    }
}

/// Describes a single parameter for hosts and tooling.
///
/// Carries exactly what a host-side metadata exporter needs: name, symbol,
/// numeric range, default, and boolean hints.
///
/// ```rust
/// use bitrot_core::{ParamDescriptor, ParamFlags, ParamId};
///
/// let bpm = ParamDescriptor::integer("BPM", "bpm", 10.0, 480.0, 100.0)
///     .with_id(ParamId(2701));
/// assert!(bpm.flags.contains(ParamFlags::INTEGER));
/// assert_eq!(bpm.format_value(120.4), "120");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name (e.g., "Noise Bias").
    pub name: &'static str,

    /// Stable symbolic id (e.g., `"noisebias"`). Lowercase, no spaces.
    pub symbol: &'static str,

    /// Stable numeric id. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Minimum value (inclusive).
    pub min: f32,

    /// Maximum value (inclusive).
    pub max: f32,

    /// Value applied at construction.
    pub default: f32,

    /// Presentation hints. Default: [`ParamFlags::AUTOMATABLE`].
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous, automatable parameter.
    pub const fn new(
        name: &'static str,
        symbol: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            symbol,
            id: ParamId(0),
            min,
            max,
            default,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Whole-number parameter.
    pub const fn integer(
        name: &'static str,
        symbol: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, symbol, min, max, default)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::INTEGER))
    }

    /// On/off switch over `[0, 1]`.
    pub const fn toggle(name: &'static str, symbol: &'static str, default: f32) -> Self {
        Self::new(name, symbol, 0.0, 1.0, default)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::TOGGLE))
    }

    /// Set the stable numeric id.
    pub const fn with_id(mut self, id: ParamId) -> Self {
        self.id = id;
        self
    }

    /// Replace the hint flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamp `value` into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Map a plain value to `[0, 1]`.
    ///
    /// Logarithmic when [`ParamFlags::LOGARITHMIC`] is set and `min > 0`,
    /// linear otherwise. Degenerate ranges map to 0.
    pub fn normalize(&self, value: f32) -> f32 {
        let value = self.clamp(value);
        if self.max <= self.min {
            return 0.0;
        }
        if self.is_log() {
            logf(value / self.min) / logf(self.max / self.min)
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let t = normalized.clamp(0.0, 1.0);
        if self.is_log() {
            self.min * expf(t * logf(self.max / self.min))
        } else {
            self.min + t * (self.max - self.min)
        }
    }

    /// Human-readable value: toggles as `on`/`off`, integers without decimals.
    pub fn format_value(&self, value: f32) -> String {
        if self.flags.contains(ParamFlags::TOGGLE) {
            let on = crate::toggle::is_on(value);
            String::from(if on { "on" } else { "off" })
        } else if self.flags.contains(ParamFlags::INTEGER) {
            format!("{}", value as i64)
        } else {
            format!("{value:.3}")
        }
    }

    /// Parse text produced by [`format_value`](Self::format_value), or a plain number.
    pub fn parse_value(&self, text: &str) -> Option<f32> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("on") || text.eq_ignore_ascii_case("true") {
            return Some(self.max);
        }
        if text.eq_ignore_ascii_case("off") || text.eq_ignore_ascii_case("false") {
            return Some(self.min);
        }
        text.parse::<f32>().ok()
    }

    fn is_log(&self) -> bool {
        self.flags.contains(ParamFlags::LOGARITHMIC) && self.min > 0.0
    }
}
