//! Engine registry and factory for the bitrot effects.
//!
//! This crate provides a centralized registry for discovering and
//! instantiating the engines by id, so tools can select one at runtime and
//! build parameter listings from its descriptors.
//!
//! # Example
//!
//! ```rust
//! use bitrot_registry::EffectRegistry;
//!
//! let registry = EffectRegistry::new();
//!
//! for effect in registry.all_effects() {
//!     println!("{}: {}", effect.name, effect.description);
//! }
//!
//! let mut repeat = registry.create("repeat", 48000.0).unwrap();
//! let bpm = registry.param_index_by_name("repeat", "BPM").unwrap();
//! repeat.effect_set_param(bpm, 140.0);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! bitrot-registry = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use bitrot_core::Effect;
pub use bitrot_core::EffectWithParams;
use bitrot_effects::{Crush, Repeat, Reverser, Tapestop};

/// Describes an engine in the registry.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Unique identifier (lowercase, no spaces).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Number of parameters.
    pub param_count: usize,
}

/// Factory function type for creating engines.
type EffectFactory = fn(f32) -> Box<dyn EffectWithParams + Send>;

struct RegistryEntry {
    descriptor: EffectDescriptor,
    factory: EffectFactory,
}

/// Registry of every available engine.
pub struct EffectRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRegistry {
    /// Create a new registry with all built-in engines registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(4),
        };
        registry.register_builtin_effects();
        registry
    }

    fn register_builtin_effects(&mut self) {
        self.register(
            EffectDescriptor {
                id: "crush",
                name: "Crush",
                description: "Sample-and-hold rate reduction with soft clipping and noise",
                param_count: 6,
            },
            |sr| {
                let mut crush = Crush::new();
                crush.set_sample_rate(sr);
                Box::new(crush)
            },
        );

        self.register(
            EffectDescriptor {
                id: "repeat",
                name: "Repeat",
                description: "Tempo-synced beat repeat with envelope and varispeed",
                param_count: 10,
            },
            |sr| Box::new(Repeat::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "reverser",
                name: "Reverser",
                description: "Plays the last four seconds backwards while active",
                param_count: 2,
            },
            |sr| Box::new(Reverser::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "tapestop",
                name: "Tapestop",
                description: "Slows playback to a halt with optional fade",
                param_count: 3,
            },
            |sr| {
                let mut tapestop = Tapestop::new();
                tapestop.set_sample_rate(sr);
                Box::new(tapestop)
            },
        );
    }

    fn register(&mut self, descriptor: EffectDescriptor, factory: EffectFactory) {
        self.entries.push(RegistryEntry {
            descriptor,
            factory,
        });
    }

    /// Returns descriptors for all registered engines, in registration order.
    pub fn all_effects(&self) -> Vec<&EffectDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Get a descriptor by engine id.
    pub fn get(&self, id: &str) -> Option<&EffectDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| &e.descriptor)
    }

    /// Create an engine instance by id.
    ///
    /// Returns `None` if the id is not registered. The engine is built at
    /// `sample_rate` with every parameter at its default.
    pub fn create(&self, id: &str, sample_rate: f32) -> Option<Box<dyn EffectWithParams + Send>> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| (e.factory)(sample_rate))
    }

    /// Find a parameter index by name or symbol for a given engine.
    ///
    /// Creates a temporary instance to scan its descriptors. Returns `None`
    /// if the engine or parameter is not found.
    pub fn param_index_by_name(&self, effect_id: &str, param_name: &str) -> Option<usize> {
        // Descriptors don't depend on the rate; keep the buffers tiny.
        let effect = self.create(effect_id, 1.0)?;
        effect.effect_find_param(param_name)
    }

    /// Returns the number of registered engines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no engines are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_all_effects_order() {
        let registry = EffectRegistry::new();
        let ids: Vec<_> = registry.all_effects().iter().map(|d| d.id).collect();
        assert_eq!(ids, ["crush", "repeat", "reverser", "tapestop"]);
    }

    #[test]
    fn test_get_effect() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.get("repeat").unwrap().name, "Repeat");
        assert!(registry.get("distortion").is_none());
    }

    #[test]
    fn test_descriptor_param_counts_match() {
        let registry = EffectRegistry::new();
        for descriptor in registry.all_effects() {
            let effect = registry.create(descriptor.id, 48000.0).unwrap();
            assert_eq!(
                effect.effect_param_count(),
                descriptor.param_count,
                "{}",
                descriptor.id
            );
        }
    }

    #[test]
    fn test_all_effects_can_be_created() {
        let registry = EffectRegistry::new();
        let input = [0.5f32; 64];

        for descriptor in registry.all_effects() {
            let mut effect = registry
                .create(descriptor.id, 48000.0)
                .unwrap_or_else(|| panic!("Failed to create effect: {}", descriptor.id));

            let mut out_l = [0.0f32; 64];
            let mut out_r = [0.0f32; 64];
            effect.process([&input, &input], [&mut out_l, &mut out_r]);
            // Everything is inactive or neutral at defaults.
            assert_eq!(out_l, input, "{} is not transparent at defaults", descriptor.id);
            assert_eq!(out_r, input);
        }
    }

    #[test]
    fn test_param_index_by_name() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.param_index_by_name("repeat", "BPM"), Some(1));
        assert_eq!(registry.param_index_by_name("repeat", "speed"), Some(9));
        assert_eq!(registry.param_index_by_name("crush", "Noise Bias"), Some(1));
        assert_eq!(registry.param_index_by_name("crush", "noisebias"), Some(1));
        assert_eq!(registry.param_index_by_name("reverser", "switch"), Some(1));
        assert_eq!(registry.param_index_by_name("tapestop", "nope"), None);
        assert_eq!(registry.param_index_by_name("nope", "active"), None);
    }

    #[test]
    fn test_unique_param_ids() {
        let registry = EffectRegistry::new();
        let mut ids = Vec::new();
        for descriptor in registry.all_effects() {
            let effect = registry.create(descriptor.id, 48000.0).unwrap();
            for i in 0..effect.effect_param_count() {
                ids.push(effect.effect_param_info(i).unwrap().id);
            }
        }
        let count = ids.len();
        ids.sort_by_key(|id| id.0);
        ids.dedup();
        assert_eq!(ids.len(), count);
    }
}
