//! Bitrot Effects - glitch engines built on bitrot-core
//!
//! Four independent stereo engines, each implementing
//! [`Effect`](bitrot_core::Effect) and
//! [`ParameterInfo`](bitrot_core::ParameterInfo):
//!
//! - [`Crush`] - Sample-and-hold rate reduction with soft clipping and noise
//! - [`Repeat`] - Tempo-synced beat repeat with envelope and varispeed
//! - [`Reverser`] - Reverse playback of the last few seconds
//! - [`Tapestop`] - Decaying-speed playback with optional fade
//!
//! ## Example
//!
//! ```rust
//! use bitrot_core::{Effect, ParameterInfo};
//! use bitrot_effects::{Crush, Repeat};
//!
//! let mut crush = Crush::new();
//! crush.set_param(Crush::DOWNSAMPLE, 8.0);
//!
//! let mut repeat = Repeat::new(48000.0);
//! repeat.set_param(Repeat::ACTIVE, 1.0);
//!
//! let input = [0.25f32; 64];
//! let (mut mid_l, mut mid_r) = ([0.0; 64], [0.0; 64]);
//! let (mut out_l, mut out_r) = ([0.0; 64], [0.0; 64]);
//! crush.process([&input, &input], [&mut mid_l, &mut mid_r]);
//! repeat.process([&mid_l, &mid_r], [&mut out_l, &mut out_r]);
//! ```
//!
//! Engines never allocate in `process`. Buffers are sized at construction
//! and only reallocated by `set_sample_rate`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod crush;
pub mod repeat;
pub mod reverser;
pub mod tapestop;

// Re-export main types at crate root
pub use crush::Crush;
pub use repeat::Repeat;
pub use reverser::Reverser;
pub use tapestop::Tapestop;
