//! Bitrot Core - shared primitives for the bitrot effect engines
//!
//! This crate holds everything the engines have in common, designed for
//! deadline-bound audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe stereo block-processing trait
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Indexed parameter tables for hosts
//! - [`EffectWithParams`] - Both of the above behind one vtable
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedPair`] - `(old, current)` snapshot of a host parameter
//! - [`BlockRamp`] - Linear interpolation of a pair across one block
//!
//! ## Building Blocks
//!
//! - [`StereoCapture`] - Fixed-length stereo capture buffer
//! - [`read_averaged`] - Oversampled fractional-position reads
//! - [`Lcg`] - Seedable linear congruential noise source
//! - [`is_on`] / [`TriggerLatch`] - Toggle and trigger interpretation
//! - [`soft_clip`], [`inject_noise`], [`rational_tanh`] - Waveshaping helpers
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for capture buffers).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bitrot-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Features
//!
//! - `std` (default) - link the standard library
//! - `tracing` - debug logs when buffers are reallocated
//! - `vst-threshold` - toggles switch on at 0.5 instead of 1.0
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks, or I/O in `process`
//! - **Total**: Every operation is defined for every finite input; no errors
//! - **One owner**: Each engine instance owns all of its state and buffers

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod capture;
pub mod effect;
pub mod effect_with_params;
pub mod math;
pub mod oversample;
pub mod param;
pub mod param_info;
pub mod rng;
pub mod toggle;

// Re-export main types at crate root
pub use capture::StereoCapture;
pub use effect::{Effect, block_len, pass_through};
pub use effect_with_params::EffectWithParams;
pub use math::{inject_noise, rational_tanh, soft_clip};
pub use oversample::{OVERSAMPLING, read_averaged};
pub use param::{BlockRamp, SmoothedPair};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParameterInfo};
pub use rng::Lcg;
pub use toggle::{TOGGLE_THRESHOLD, TriggerLatch, as_unit, is_on};
